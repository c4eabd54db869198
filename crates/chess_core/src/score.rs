use std::fmt;

/// Numeric stand-in for the sentinels when a plain integer is needed.
pub const MATE_VALUE: i32 = 1_000_000;

/// Search value from the engine's own point of view.
///
/// Forced results are separate variants rather than large integers, so no
/// heuristic sum can ever be mistaken for one. Ordering is
/// `Loss < Eval(_) < Win`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Score {
    /// Forced loss for the engine's color (−INF).
    Loss,
    Eval(i32),
    /// Forced win for the engine's color (+INF).
    Win,
}

impl Score {
    pub const INF: Score = Score::Win;
    pub const NEG_INF: Score = Score::Loss;
    pub const DRAW: Score = Score::Eval(0);

    pub fn is_decisive(self) -> bool {
        !matches!(self, Score::Eval(_))
    }

    /// Integer form, with the sentinels mapped to ±[`MATE_VALUE`].
    pub fn as_i32(self) -> i32 {
        match self {
            Score::Loss => -MATE_VALUE,
            Score::Eval(v) => v,
            Score::Win => MATE_VALUE,
        }
    }
}

impl Default for Score {
    fn default() -> Self {
        Score::DRAW
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Loss => f.write_str("-INF"),
            Score::Eval(v) => write!(f, "{v}"),
            Score::Win => f.write_str("+INF"),
        }
    }
}
