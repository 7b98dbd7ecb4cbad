use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::error::ImageError;
use crate::present::{Surface, SurfaceStatus};
use crate::time::FrameClock;

use super::{Board, CommandQueue, CommandSender, Piece, Rules};

/// Run-loop configuration.
#[derive(Debug, Clone, Default)]
pub struct GameConfig {
    /// Minimum wall time per frame. `None` runs as fast as presenting allows.
    pub frame_interval: Option<Duration>,
    /// Stop after this many presented frames.
    pub max_frames: Option<u64>,
}

/// How a run ended.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GameOutcome {
    pub frames: u64,
    pub won: bool,
}

/// Generic board-game runner.
pub struct Game<P, R>
where
    R: Rules<P>,
{
    pieces: Vec<P>,
    board: Board,
    rules: R,
    queue: CommandQueue<R::Command>,
    clock: FrameClock,
    config: GameConfig,
}

impl<P, R> Game<P, R>
where
    P: Piece,
    R: Rules<P>,
{
    pub fn new(pieces: Vec<P>, board: Board, rules: R) -> Self {
        Self {
            pieces,
            board,
            rules,
            queue: CommandQueue::new(),
            clock: FrameClock::new(),
            config: GameConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Handle for an input thread to queue commands.
    pub fn command_sender(&self) -> CommandSender<R::Command> {
        self.queue.sender()
    }

    pub fn pieces(&self) -> &[P] {
        &self.pieces
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Runs until the rules report a win, the surface closes, or the frame
    /// limit is hit.
    ///
    /// Per frame: update pieces, drain queued commands, paint a board copy,
    /// present it, resolve collisions.
    pub fn run<S>(&mut self, surface: &mut S) -> Result<GameOutcome>
    where
        S: Surface + ?Sized,
    {
        let start = self.clock.game_time_ms();
        for piece in &mut self.pieces {
            piece.reset(start);
        }
        log::info!("game started with {} pieces", self.pieces.len());

        let mut frames = 0;
        while !self.rules.is_win(&self.pieces) {
            if self.config.max_frames.is_some_and(|max| frames >= max) {
                log::info!("frame limit {frames} reached");
                break;
            }

            let started = Instant::now();
            let ft = self.clock.tick();

            for piece in &mut self.pieces {
                piece.update(ft.game_ms);
            }

            for cmd in self.queue.drain() {
                self.rules.process_input(&mut self.pieces, cmd);
            }

            let frame = self
                .draw_frame()
                .with_context(|| format!("failed to draw frame {}", ft.frame_index))?;
            let status = frame
                .image()
                .show(surface)
                .with_context(|| format!("failed to present frame {}", ft.frame_index))?;
            frames += 1;

            if status == SurfaceStatus::Closed {
                log::info!("surface closed after {frames} frames");
                break;
            }

            self.rules.resolve_collisions(&mut self.pieces);

            if let Some(interval) = self.config.frame_interval {
                std::thread::sleep(interval.saturating_sub(started.elapsed()));
            }
        }

        let won = self.rules.is_win(&self.pieces);
        if won {
            self.rules.announce_win(&self.pieces);
        }
        Ok(GameOutcome { frames, won })
    }

    fn draw_frame(&mut self) -> Result<Board, ImageError> {
        let mut frame = self.board.duplicate();
        for piece in &mut self.pieces {
            piece.draw_on(&mut frame)?;
        }
        Ok(frame)
    }
}
