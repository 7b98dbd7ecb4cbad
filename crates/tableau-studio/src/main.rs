use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tableau_engine::coords::Size;
use tableau_engine::game::{Board, Game, GameConfig, Piece, Rules};
use tableau_engine::image::{Channels, Raster};
use tableau_engine::logging::{LoggingConfig, init_logging};
use tableau_engine::paint::Color;
use tableau_engine::present::PngSurface;
use tableau_engine::text::{FontId, FontSystem, PIXELS_PER_FONT_UNIT, TextStyle};
use tableau_engine::{Image, ImageError};

const CELL: u32 = 64;
const CELLS: u32 = 8;
const FRAMES: u64 = 24;
const STEP_MS: u64 = 40;
const HUD_SIZE: f32 = 0.8;
const HUD_MARGIN: u32 = 8;

/// Usage: `tableau-studio [BOARD_IMAGE [PIECE_IMAGE...]]`
///
/// Frames are written to `$TABLEAU_OUT` (default `frames/`). Set
/// `$TABLEAU_FONT` to a TTF/OTF file to rasterize the HUD text.
fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut args = std::env::args().skip(1);
    let board = match args.next() {
        Some(path) => load_board(&path)?,
        None => checkerboard()?,
    };

    let mut pieces: Vec<StudioPiece> = Vec::new();
    let sprite_paths: Vec<String> = args.collect();
    if sprite_paths.is_empty() {
        pieces.push(StudioPiece::token(solid_sprite(Color::from_rgba(220, 40, 40, 200)), 0, 1));
        pieces.push(StudioPiece::token(solid_sprite(Color::from_rgba(40, 40, 220, 200)), 3, 6));
    } else {
        for (i, path) in sprite_paths.iter().enumerate() {
            let mut sprite = Image::new();
            sprite
                .load(path, Some((CELL, CELL)), true)
                .with_context(|| format!("failed to load piece {path}"))?;
            pieces.push(StudioPiece::token(sprite, i as u32 % CELLS, i as u32 / CELLS));
        }
    }
    pieces.push(StudioPiece::Hud(Hud::from_env()?));

    let out = std::env::var_os("TABLEAU_OUT")
        .map_or_else(|| PathBuf::from("frames"), PathBuf::from);
    let mut surface = PngSurface::new(&out)
        .with_context(|| format!("failed to open output directory {}", out.display()))?
        .with_frame_limit(FRAMES);

    let config = GameConfig {
        frame_interval: Some(Duration::from_millis(STEP_MS)),
        max_frames: None,
    };
    let mut game = Game::new(pieces, board, Captures::default()).with_config(config);
    let outcome = game.run(&mut surface)?;

    log::info!(
        "{} frames written to {} ({} captures)",
        outcome.frames,
        out.display(),
        game.rules().captures
    );
    Ok(())
}

fn load_board(path: &str) -> Result<Board> {
    let mut image = Image::new();
    image
        .load(path, Some((CELL * CELLS, CELL * CELLS)), false)
        .with_context(|| format!("failed to load board {path}"))?;
    Ok(Board::new(Size::new(CELL, CELL), Size::new(CELLS, CELLS), image)?)
}

/// Board painted from two tile images, so the pristine board is itself a
/// composition.
fn checkerboard() -> Result<Board> {
    let side = CELL * CELLS;
    let solid_tile = |name: &str, color: Color| {
        Image::from_raster(name, Raster::filled(Size::new(CELL, CELL), Channels::Rgb, color))
    };
    let mut image =
        Image::from_raster("checkerboard", Raster::blank(Size::new(side, side), Channels::Rgb));
    let mut light = solid_tile("light", Color::from_rgb(238, 238, 210));
    let mut dark = solid_tile("dark", Color::from_rgb(118, 150, 86));

    for row in 0..CELLS {
        for col in 0..CELLS {
            let tile = if (row + col) % 2 == 0 { &mut light } else { &mut dark };
            tile.draw_on(&mut image, (col * CELL) as i32, (row * CELL) as i32)?;
        }
    }
    Ok(Board::new(Size::new(CELL, CELL), Size::new(CELLS, CELLS), image)?)
}

fn solid_sprite(color: Color) -> Image {
    let inset = CELL / 8;
    let size = Size::new(CELL - 2 * inset, CELL - 2 * inset);
    Image::from_raster("token", Raster::filled(size, Channels::Rgba, color))
}

// ── pieces ────────────────────────────────────────────────────────────────

struct Token {
    sprite: Image,
    col: u32,
    row: u32,
    start_col: u32,
    started_ms: u64,
}

struct Hud {
    fonts: FontSystem,
    font: Option<FontId>,
    now_ms: u64,
}

impl Hud {
    fn from_env() -> Result<Self> {
        let mut fonts = FontSystem::new();
        let font = match std::env::var_os("TABLEAU_FONT") {
            Some(path) => Some(fonts.load_font_file(&path)?),
            None => None,
        };
        Ok(Self { fonts, font, now_ms: 0 })
    }
}

enum StudioPiece {
    Token(Token),
    Hud(Hud),
}

impl StudioPiece {
    fn token(sprite: Image, col: u32, row: u32) -> Self {
        StudioPiece::Token(Token { sprite, col, row, start_col: col, started_ms: 0 })
    }

    fn cell(&self) -> Option<(u32, u32)> {
        match self {
            StudioPiece::Token(t) => Some((t.col, t.row)),
            StudioPiece::Hud(_) => None,
        }
    }
}

impl Piece for StudioPiece {
    fn reset(&mut self, now_ms: u64) {
        if let StudioPiece::Token(t) = self {
            t.started_ms = now_ms;
            t.col = t.start_col;
        }
    }

    fn update(&mut self, now_ms: u64) {
        match self {
            StudioPiece::Token(t) => {
                let steps = (now_ms.saturating_sub(t.started_ms) / (STEP_MS * 4)) as u32;
                t.col = (t.start_col + steps) % CELLS;
            }
            StudioPiece::Hud(h) => h.now_ms = now_ms,
        }
    }

    fn draw_on(&mut self, frame: &mut Board) -> Result<(), ImageError> {
        match self {
            StudioPiece::Token(t) => {
                let Some(cell) = frame.cell_rect(t.col, t.row) else { return Ok(()) };
                let inset_x = cell.width.saturating_sub(t.sprite.width()) as i32 / 2;
                let inset_y = cell.height.saturating_sub(t.sprite.height()) as i32 / 2;
                t.sprite.draw_on(frame.image_mut(), cell.x + inset_x, cell.y + inset_y)
            }
            StudioPiece::Hud(h) => {
                let text = format!("t={}ms", h.now_ms);
                let mut style = TextStyle::new().color([255, 255, 0]).thickness(1);
                let mut x = HUD_MARGIN;
                if let Some(id) = h.font {
                    style = style.font(&h.fonts, id);
                    // Right-aligned against the frame edge.
                    let px = HUD_SIZE * PIXELS_PER_FONT_UNIT;
                    let width = h.fonts.measure_text(&text, id, px).width;
                    x = frame.image().width().saturating_sub(width.saturating_add(HUD_MARGIN));
                }
                frame.image_mut().put_text(&text, x as i32, 24, HUD_SIZE, &style)
            }
        }
    }
}

// ── rules ─────────────────────────────────────────────────────────────────

/// A token landing on another token's cell captures it; one token left wins.
#[derive(Default)]
struct Captures {
    captures: u32,
}

impl Rules<StudioPiece> for Captures {
    type Command = ();

    fn is_win(&self, pieces: &[StudioPiece]) -> bool {
        pieces.iter().filter(|p| p.cell().is_some()).count() <= 1
    }

    fn process_input(&mut self, _pieces: &mut [StudioPiece], _cmd: ()) {}

    fn resolve_collisions(&mut self, pieces: &mut Vec<StudioPiece>) {
        let mut occupied = Vec::new();
        let before = pieces.len();
        pieces.retain(|p| match p.cell() {
            Some(cell) if occupied.contains(&cell) => false,
            Some(cell) => {
                occupied.push(cell);
                true
            }
            None => true,
        });
        let captured = (before - pieces.len()) as u32;
        if captured > 0 {
            log::info!("{captured} piece(s) captured");
            self.captures += captured;
        }
    }

    fn announce_win(&mut self, _pieces: &[StudioPiece]) {
        log::info!("one token left standing after {} captures", self.captures);
    }
}
