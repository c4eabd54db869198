//! Scoped pass-turn probe.

use std::ops::Deref;

use cozy_chess::Board;

use crate::board::Position;

/// A position with the turn handed to the other side.
///
/// Created by [`Position::pass_turn`]. Dropping the guard puts the original
/// position back, so the passed state never outlives the probing scope, even
/// when that scope unwinds.
pub struct PassedTurn<'a> {
    pos: &'a mut Position,
    saved: Board,
}

impl<'a> PassedTurn<'a> {
    pub(crate) fn new(pos: &'a mut Position, passed: Board) -> Self {
        let saved = std::mem::replace(&mut pos.board, passed);
        PassedTurn { pos, saved }
    }
}

impl Deref for PassedTurn<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.pos
    }
}

impl Drop for PassedTurn<'_> {
    fn drop(&mut self) {
        std::mem::swap(&mut self.pos.board, &mut self.saved);
    }
}
