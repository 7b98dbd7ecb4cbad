use crate::error::ImageError;

use super::Board;

/// Something that animates over time and paints itself onto a board frame.
pub trait Piece {
    /// Called once when a run starts.
    fn reset(&mut self, now_ms: u64);

    /// Advances animation/physics state to `now_ms`.
    fn update(&mut self, now_ms: u64);

    /// Paints the piece onto `frame`, a throwaway copy of the board.
    fn draw_on(&mut self, frame: &mut Board) -> Result<(), ImageError>;
}

/// Game rules plugged into [`Game`](super::Game).
pub trait Rules<P> {
    /// Command type produced by input threads.
    type Command: Send + 'static;

    fn is_win(&self, pieces: &[P]) -> bool;

    fn process_input(&mut self, pieces: &mut [P], cmd: Self::Command);

    /// Resolves collisions/captures after a frame was presented. May remove
    /// pieces.
    fn resolve_collisions(&mut self, pieces: &mut Vec<P>);

    fn announce_win(&mut self, pieces: &[P]);
}
