//! Puzzle world contract.

use ferry_search::SearchWorldV1;

/// A search world that also knows where its puzzle starts and ends.
///
/// The runner uses this to search a puzzle without the caller spelling out
/// endpoints. Both states must have the world's dimension, and the initial
/// state is expected to be legal (the search rejects it otherwise).
pub trait PuzzleWorldV1: SearchWorldV1 {
    /// Where the puzzle starts.
    fn initial_state(&self) -> Self::State;

    /// Where the puzzle must end.
    fn goal_state(&self) -> Self::State;
}
