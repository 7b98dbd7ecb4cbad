//! End-to-end composition scenarios against the public API.

use tableau_engine::backend::{FsBackend, RasterBackend, SyntheticBackend};
use tableau_engine::coords::Size;
use tableau_engine::image::{Channels, Raster};
use tableau_engine::logging::{LoggingConfig, init_logging};
use tableau_engine::paint::Color;
use tableau_engine::present::{LogSurface, PngSurface, SurfaceStatus};
use tableau_engine::text::TextStyle;
use tableau_engine::{Image, ImageError, LoadOptions};

fn load(backend: &SyntheticBackend, path: &str, w: u32, h: u32, keep_aspect: bool) -> Image {
    let mut img = Image::new();
    img.load_with(backend, path, LoadOptions::new().size(w, h).keep_aspect(keep_aspect))
        .unwrap();
    img
}

#[test]
fn complete_workflow() {
    init_logging(LoggingConfig::for_tests());
    let backend = SyntheticBackend::new();

    let mut background = load(&backend, "game_bg.jpg", 1024, 768, false);
    let mut player = load(&backend, "player.png", 64, 64, true);
    let mut logo = load(&backend, "logo.png", 128, 64, false);

    player.draw_on(&mut background, 100, 200).unwrap();
    logo.draw_on(&mut background, 50, 50).unwrap();

    background
        .put_text("Score: 1500", 900, 50, 1.0, &TextStyle::new().color([255, 255, 0]))
        .unwrap();
    background
        .put_text("Lives: 3", 900, 80, 1.0, &TextStyle::new().color([255, 0, 0]))
        .unwrap();

    let mut surface = LogSurface::new();
    assert_eq!(background.show(&mut surface), Ok(SurfaceStatus::Open));

    let ops = background.info().operations;
    assert!(ops.len() >= 4);
    let drawn: Vec<&String> = ops.iter().filter(|op| op.starts_with("DRAWN_ON")).collect();
    assert_eq!(drawn, vec!["DRAWN_ON: 64x48 at (100,200)", "DRAWN_ON: 128x64 at (50,50)"]);
    assert_eq!(ops.last().map(String::as_str), Some("TEXT: 'Lives: 3' at (900,80) size=1.0"));
}

#[test]
fn failed_draw_keeps_operation_counts() {
    let backend = SyntheticBackend::new();
    let mut sprite = load(&backend, "sprite.png", 100, 100, false);
    let mut small = load(&backend, "small_bg.jpg", 50, 50, false);

    assert!(matches!(sprite.draw_on(&mut small, 0, 0), Err(ImageError::OutOfBounds { .. })));

    assert!(sprite.is_loaded() && small.is_loaded());
    assert_eq!(sprite.info().operations.len(), 2);
    assert_eq!(small.info().operations.len(), 2);
}

#[test]
fn files_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();

    // Board and a half-transparent marker written with the PNG surface.
    let blue = Color::from_rgb(0, 0, 200);
    let board = Image::from_raster("board", Raster::filled(Size::new(40, 30), Channels::Rgb, blue));
    let half_red = Color::from_rgba(200, 0, 0, 128);
    let marker =
        Image::from_raster("marker", Raster::filled(Size::new(10, 10), Channels::Rgba, half_red));
    let mut surface = PngSurface::new(dir.path()).unwrap();
    let board_path = surface.next_path();
    board.show(&mut surface).unwrap();
    let marker_path = surface.next_path();
    marker.show(&mut surface).unwrap();

    let mut bg = Image::new();
    bg.load(&board_path, None, false).unwrap();
    let mut piece = Image::new();
    piece.load(&marker_path, Some((20, 20)), true).unwrap();
    assert_eq!((piece.width(), piece.height(), piece.channels()), (20, 20, 4));

    piece.draw_on(&mut bg, 5, 5).unwrap();

    // Alpha came from the file, so the blend mixes red over blue.
    let px = bg.raster().and_then(|r| r.pixel(10, 10)).unwrap();
    assert_eq!(px, &[100, 0, 100]);
    assert_eq!(piece.channels(), 3);

    let decoded = FsBackend::new().decode(&board_path).unwrap();
    assert_eq!(decoded.size(), Size::new(40, 30));
}

#[test]
fn missing_file_is_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut img = Image::new();
    let err = img.load(dir.path().join("absent.png"), None, false).unwrap_err();
    assert!(matches!(err, ImageError::LoadFailure { .. }));
    assert!(!img.is_loaded());
}
