//! Game-loop boundary.
//!
//! The compositor is driven by a generic run loop: pieces animate on
//! monotonic time, queued commands from input threads are drained once per
//! frame, every frame is painted onto a copy of the pristine board and
//! presented, then captures are resolved. Game rules stay with the caller
//! through the [`Rules`] trait.

mod board;
mod command;
mod piece;
mod runner;

pub use board::Board;
pub use command::{CommandQueue, CommandSender};
pub use piece::{Piece, Rules};
pub use runner::{Game, GameConfig, GameOutcome};
