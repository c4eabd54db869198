use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chess_core::{legal_moves, DrawReason, SearchResult};
use opening_book::{BookError, WeightedBook};

/// Engine that always answers with the first legal move and counts calls.
struct FirstMoveEngine {
    calls: Arc<AtomicUsize>,
}

impl Engine for FirstMoveEngine {
    fn search(&mut self, pos: &Position, depth: u8) -> SearchResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        SearchResult {
            best_move: legal_moves(pos).first().copied(),
            score: Score::DRAW,
            depth,
            nodes: 1,
        }
    }

    fn name(&self) -> &str {
        "first-move"
    }
}

struct BrokenBook;

impl OpeningBook for BrokenBook {
    fn query(&mut self, pos: &Position) -> Result<Option<Move>, BookError> {
        Err(BookError::Entry {
            key: pos.book_key(),
            reason: "corrupt".to_string(),
        })
    }

    fn len(&self) -> usize {
        1
    }
}

fn counting_agent(own: Color, book: Box<dyn OpeningBook>) -> (Agent, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = FirstMoveEngine {
        calls: Arc::clone(&calls),
    };
    (Agent::new(own, 2, book, Box::new(engine)), calls)
}

fn mv(s: &str) -> Move {
    s.parse().unwrap()
}

#[test]
fn test_book_move_overrides_search() {
    let mut book = WeightedBook::new();
    let after_e4 = Position::startpos().apply_move(mv("e2e4")).unwrap();
    book.insert(&after_e4, mv("c7c5"), 1);

    let (mut agent, calls) = counting_agent(Color::Black, Box::new(book));
    agent.observe("e2e4").unwrap();
    let decision = agent.choose_move().unwrap();

    assert_eq!(decision.mv, mv("c7c5"));
    assert_eq!(decision.source, MoveSource::Book);
    assert_eq!(decision.score, None);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_book_miss_falls_back_to_search() {
    let (mut agent, calls) = counting_agent(Color::White, Box::new(NoBook));
    let decision = agent.choose_move().unwrap();

    assert_eq!(decision.source, MoveSource::Search);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(Position::startpos().is_legal(decision.mv));
}

#[test]
fn test_book_errors_fall_back_to_search() {
    let (mut agent, calls) = counting_agent(Color::White, Box::new(BrokenBook));
    let decision = agent.choose_move().unwrap();
    assert_eq!(decision.source, MoveSource::Search);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // A stored move that is not legal in the position counts as a miss too.
    let mut book = WeightedBook::new();
    book.insert(&Position::startpos(), mv("e2e5"), 1);
    let (mut agent, calls) = counting_agent(Color::White, Box::new(book));
    let decision = agent.choose_move().unwrap();
    assert_eq!(decision.source, MoveSource::Search);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_chosen_move_is_played() {
    let (mut agent, _) = counting_agent(Color::White, Box::new(NoBook));
    let decision = agent.choose_move().unwrap();

    let expected = Position::startpos().apply_move(decision.mv).unwrap();
    assert_eq!(agent.position(), &expected);
    assert_eq!(agent.position().side_to_move(), Color::Black);
}

#[test]
fn test_invalid_opponent_move() {
    let (mut agent, _) = counting_agent(Color::Black, Box::new(NoBook));

    let err = agent.observe("e2e5").unwrap_err();
    assert!(matches!(err, AgentError::Rules(RulesError::InvalidMove { .. })));
    let err = agent.observe("zz").unwrap_err();
    assert!(matches!(err, AgentError::Rules(RulesError::BadNotation(_))));

    assert_eq!(agent.position(), &Position::startpos());
}

#[test]
fn test_not_our_turn() {
    let (mut agent, calls) = counting_agent(Color::Black, Box::new(NoBook));
    let err = agent.choose_move().unwrap_err();

    assert!(matches!(
        err,
        AgentError::NotOurTurn {
            own: Color::Black,
            to_move: Color::White
        }
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_no_move_after_game_over() {
    let (mut agent, calls) = counting_agent(Color::White, Box::new(NoBook));
    let mut mated = Position::startpos();
    for m in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        mated.play(mv(m)).unwrap();
    }
    agent.set_position(mated);

    let err = agent.choose_move().unwrap_err();
    assert!(matches!(err, AgentError::GameOver(Outcome::Winner(Color::Black))));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    agent.set_position(Position::from_fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1").unwrap());
    agent.set_color(Color::Black);
    let err = agent.choose_move().unwrap_err();
    assert!(matches!(
        err,
        AgentError::GameOver(Outcome::Draw(DrawReason::Stalemate))
    ));
}

#[test]
fn test_decided_draw_with_moves_still_plays() {
    let (mut agent, _) = counting_agent(Color::White, Box::new(NoBook));
    agent.set_position(Position::from_fen("8/8/4k3/8/8/4K3/8/8 w - - 0 1").unwrap());
    assert_eq!(
        agent.position().outcome(),
        Some(Outcome::Draw(DrawReason::InsufficientMaterial))
    );

    let decision = agent.choose_move().unwrap();
    assert_eq!(decision.source, MoveSource::Search);
}

#[test]
fn test_second_player_answers_e4() {
    let engine = MinimaxEngine::new();
    let mut agent = Agent::new(Color::Black, 2, Box::new(NoBook), Box::new(engine));
    agent.observe("e2e4").unwrap();

    let before = agent.position().clone();
    let decision = agent.choose_move().unwrap();

    assert!(before.is_legal(decision.mv));
    assert!(decision.nodes > 0);
    assert!(decision.score.is_some());
    assert_eq!(agent.position().side_to_move(), Color::White);
}

#[test]
fn test_reset_starts_over() {
    let (mut agent, _) = counting_agent(Color::White, Box::new(NoBook));
    agent.choose_move().unwrap();

    agent.reset(Color::Black);
    assert_eq!(agent.own_color(), Color::Black);
    assert_eq!(agent.position(), &Position::startpos());
}

#[test]
fn test_from_config_without_book_file() {
    let config = PlayerConfig {
        book: Some("/nonexistent/book.json".into()),
        depth: 1,
        ..PlayerConfig::default()
    };
    let mut agent = Agent::from_config(&config);

    assert_eq!(agent.own_color(), Color::Black);
    assert_eq!(agent.depth(), 1);
    agent.set_color(Color::White);
    let decision = agent.choose_move().unwrap();
    assert_eq!(decision.source, MoveSource::Search);
}
