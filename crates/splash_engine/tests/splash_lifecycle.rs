//! End-to-end runs of the splash engine against the headless backend

use std::path::{Path, PathBuf};

use splash_engine::foundation::logging;
use splash_engine::prelude::*;
use splash_engine::render::backends::{DrawCommand, HeadlessRenderer};

fn write_cyan_png(dir: &Path) -> PathBuf {
    let path = dir.join("splash.png");
    image::RgbaImage::from_pixel(1, 1, image::Rgba([0, 255, 255, 255]))
        .save(&path)
        .unwrap();
    path
}

fn headless_engine(config: ApplicationConfig) -> Engine<HeadlessRenderer> {
    Engine::new(
        HeadlessRenderer::new(config.window.width, config.window.height),
        ImageDecoder::init().unwrap(),
        None,
        config,
    )
}

#[test]
fn quit_on_first_poll_terminates_after_one_frame() {
    logging::init_for_tests();
    let dir = tempfile::tempdir().unwrap();
    let mut config = ApplicationConfig::default();
    config.assets.splash_path = write_cyan_png(dir.path());

    let engine = headless_engine(config);
    assert_eq!(engine.state(), LifecycleState::Initialized);
    let live = engine.backend().live_texture_counter();

    let mut events = ScriptedEvents::from_frames([vec![InputEvent::Quit]]);
    let summary = engine.run(&mut events).unwrap();

    assert_eq!(summary.frames, 1);
    assert_eq!(summary.draw_failures, 0);
    assert_eq!(summary.final_state, LifecycleState::Terminated);
    assert_eq!(live.get(), 0, "texture leaked past shutdown");
}

#[test]
fn cyan_pixel_is_uploaded_transparent() {
    logging::init_for_tests();
    let dir = tempfile::tempdir().unwrap();
    let mut config = ApplicationConfig::default();
    config.assets.splash_path = write_cyan_png(dir.path());

    let mut engine = headless_engine(config);
    engine.load_media().unwrap();

    let texture = engine.splash().texture().unwrap();
    assert_eq!(texture.size(), (1, 1));
    assert_eq!(texture.pixels(), &[0, 255, 255, 0]);

    engine.shutdown();
}

#[test]
fn missing_image_fails_media_but_tears_down_cleanly() {
    logging::init_for_tests();
    let dir = tempfile::tempdir().unwrap();
    let mut config = ApplicationConfig::default();
    config.assets.splash_path = dir.path().join("missing.png");

    let mut engine = headless_engine(config);
    let live = engine.backend().live_texture_counter();

    let err = engine.load_media().unwrap_err();
    assert!(matches!(err, AppError::Media(_)), "unexpected error: {err}");
    assert!(err.to_string().contains("missing.png"));
    assert_eq!(engine.state(), LifecycleState::Initialized);
    assert!(!engine.splash().is_loaded());

    // Window and renderer are still usable after the failed load.
    assert_eq!(engine.backend().output_size().unwrap(), (640, 480));
    engine.render_frame();
    assert_eq!(engine.backend().frames_presented(), 1);

    let summary = engine.shutdown();
    assert_eq!(summary.final_state, LifecycleState::Terminated);
    assert_eq!(live.get(), 0);
}

#[test]
fn run_with_missing_image_reports_failure_without_looping() {
    logging::init_for_tests();
    let dir = tempfile::tempdir().unwrap();
    let mut config = ApplicationConfig::default();
    config.assets.splash_path = dir.path().join("missing.png");

    let engine = headless_engine(config);
    let mut events = ScriptedEvents::default();

    assert!(matches!(engine.run(&mut events), Err(AppError::Media(_))));
    assert_eq!(events.polled(), 0);
}

#[test]
fn every_frame_clears_draws_and_presents() {
    logging::init_for_tests();
    let dir = tempfile::tempdir().unwrap();
    let mut config = ApplicationConfig::default();
    config.assets.splash_path = write_cyan_png(dir.path());
    config.renderer.clear_color = Color::rgb(10, 20, 30);

    let mut engine = headless_engine(config);
    engine.load_media().unwrap();
    engine.backend_mut().clear_commands();

    let mut events = ScriptedEvents::from_frames([vec![], vec![], vec![InputEvent::Quit]]);
    assert_eq!(engine.run_loop(&mut events).unwrap(), 3);

    let commands = engine.backend().commands();
    assert_eq!(commands.len(), 12);
    for frame in commands.chunks(4) {
        assert_eq!(frame[0], DrawCommand::SetDrawColor(Color::rgb(10, 20, 30)));
        assert_eq!(frame[1], DrawCommand::Clear);
        assert!(matches!(frame[2], DrawCommand::Copy { src: None, dst, .. } if dst == Rect::new(0, 0, 1, 1)));
        assert_eq!(frame[3], DrawCommand::Present);
    }
}
