//! Application driver
//!
//! The engine owns everything the splash screen needs once the platform is
//! up: the render backend (renderer + window), the image decoder, the splash
//! texture and the optional rumble controller. It sequences media loading,
//! the frame loop and teardown, and tracks the [`LifecycleState`].

use crate::{
    application::{AppError, LifecycleState},
    assets::ImageDecoder,
    core::config::ApplicationConfig,
    input::{EventSource, InputEvent, RumbleDevice},
    render::{RenderBackend, TextureHandle},
};

/// Counters collected over a run, returned by [`Engine::shutdown`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames presented
    pub frames: u64,
    /// Rumbles played successfully
    pub rumbles_played: u64,
    /// Rumbles that failed or had no device
    pub rumble_failures: u64,
    /// Frames where the splash could not be drawn
    pub draw_failures: u64,
    /// State after teardown
    pub final_state: LifecycleState,
}

/// Main engine struct
///
/// Field order is teardown order: the texture goes first, then the
/// controller, then the renderer and window, and image decoding last.
pub struct Engine<B: RenderBackend> {
    splash: TextureHandle<B::Texture>,
    controller: Option<Box<dyn RumbleDevice>>,
    backend: B,
    decoder: ImageDecoder,
    config: ApplicationConfig,
    state: LifecycleState,
    quit_requested: bool,
    summary: RunSummary,
}

impl<B: RenderBackend> Engine<B> {
    /// Take ownership of initialized subsystems
    ///
    /// Sets the initial draw color and moves to [`LifecycleState::Initialized`].
    pub fn new(
        mut backend: B,
        decoder: ImageDecoder,
        controller: Option<Box<dyn RumbleDevice>>,
        config: ApplicationConfig,
    ) -> Self {
        backend.set_draw_color(config.renderer.clear_color);

        match &controller {
            Some(device) => log::info!("Rumble enabled on {}", device.name()),
            None => log::info!("No rumble device, controller feedback disabled"),
        }

        let mut engine = Self {
            splash: TextureHandle::new(),
            controller,
            backend,
            decoder,
            config,
            state: LifecycleState::Uninitialized,
            quit_requested: false,
            summary: RunSummary::default(),
        };
        engine.state = LifecycleState::Initialized;
        log::info!("Lifecycle: {:?} -> {:?}", LifecycleState::Uninitialized, engine.state);
        engine
    }

    /// Load the splash texture
    pub fn load_media(&mut self) -> Result<(), AppError> {
        self.expect_state(LifecycleState::Initialized, LifecycleState::MediaLoaded)?;

        let path = self.config.assets.splash_path.clone();
        if let Err(e) = self.splash.load(
            &mut self.backend,
            &self.decoder,
            &path,
            self.config.assets.color_key,
        ) {
            log::error!("Failed to load media!");
            return Err(e.into());
        }

        self.advance(LifecycleState::MediaLoaded)
    }

    /// Run frames until a quit event is seen
    ///
    /// Each iteration drains every pending event, then clears, draws the
    /// splash at the origin and presents. Presentation blocks on vsync when
    /// the backend was created with it, which is the only frame pacing.
    /// Returns the number of frames presented by this call.
    pub fn run_loop(&mut self, events: &mut impl EventSource) -> Result<u64, AppError> {
        self.advance(LifecycleState::Running)?;
        log::info!("Starting main loop...");

        let start = self.summary.frames;
        while !self.quit_requested {
            while let Some(event) = events.poll_event() {
                self.handle_event(event);
            }
            self.render_frame();
        }

        let frames = self.summary.frames - start;
        log::info!("Main loop finished after {} frame(s)", frames);
        Ok(frames)
    }

    /// React to one input event
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => {
                log::info!("Quit requested");
                self.quit_requested = true;
            }
            InputEvent::ControllerButtonDown { which, button } => {
                log::debug!("Button {} pressed on device {}", button, which);
                self.rumble();
            }
            InputEvent::Other => {}
        }
    }

    /// Clear, draw the splash and present one frame
    pub fn render_frame(&mut self) {
        self.backend.set_draw_color(self.config.renderer.clear_color);
        self.backend.clear();

        if let Err(e) = self.splash.draw(&mut self.backend, 0, 0) {
            self.summary.draw_failures += 1;
            log::warn!("Unable to draw splash: {}", e);
        }

        self.backend.present();
        self.summary.frames += 1;
        log::trace!("Frame {} presented", self.summary.frames);
    }

    fn rumble(&mut self) {
        let strength = self.config.haptics.strength;
        let duration = self.config.haptics.duration();

        let Some(controller) = self.controller.as_mut() else {
            self.summary.rumble_failures += 1;
            log::warn!("Warning: Unable to play rumble! No haptic device is open");
            return;
        };

        match controller.play_rumble(strength, duration) {
            Ok(()) => self.summary.rumbles_played += 1,
            Err(e) => {
                self.summary.rumble_failures += 1;
                log::warn!("Warning: {}", e);
            }
        }
    }

    /// Load media, run the loop, and always tear down
    pub fn run(mut self, events: &mut impl EventSource) -> Result<RunSummary, AppError> {
        let outcome = self.load_media().and_then(|()| self.run_loop(events));
        let summary = self.shutdown();
        outcome.map(|_| summary)
    }

    /// Release everything in reverse order of acquisition
    pub fn shutdown(mut self) -> RunSummary {
        let from = self.state;
        if let Err(e) = self.advance(LifecycleState::ShuttingDown) {
            log::warn!("{}", e);
        }
        log::info!("Shutting down from {:?}", from);

        let Self { mut splash, controller, backend, decoder, mut summary, .. } = self;

        splash.free();
        drop(splash);
        log::debug!("Splash texture released");

        if controller.is_some() {
            drop(controller);
            log::debug!("Controller closed");
        }

        drop(backend);
        log::debug!("Renderer and window released");

        drop(decoder);

        summary.final_state = LifecycleState::Terminated;
        log::info!("Lifecycle: {:?} -> {:?}", LifecycleState::ShuttingDown, LifecycleState::Terminated);
        summary
    }

    fn expect_state(&self, required: LifecycleState, next: LifecycleState) -> Result<(), AppError> {
        if self.state == required {
            Ok(())
        } else {
            Err(AppError::InvalidTransition { from: self.state, to: next })
        }
    }

    fn advance(&mut self, next: LifecycleState) -> Result<(), AppError> {
        if !self.state.can_advance_to(next) {
            return Err(AppError::InvalidTransition { from: self.state, to: next });
        }
        log::info!("Lifecycle: {:?} -> {:?}", self.state, next);
        self.state = next;
        Ok(())
    }

    /// Current lifecycle state
    pub const fn state(&self) -> LifecycleState {
        self.state
    }

    /// Whether a quit event has been handled
    pub const fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Counters so far
    pub const fn summary(&self) -> RunSummary {
        self.summary
    }

    /// The splash texture
    pub const fn splash(&self) -> &TextureHandle<B::Texture> {
        &self.splash
    }

    /// The render backend
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the render backend
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Active configuration
    pub const fn config(&self) -> &ApplicationConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{PeripheralError, ScriptedEvents};
    use crate::render::backends::headless::{DrawCommand, HeadlessRenderer};
    use crate::render::{Color, Rect};
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;
    use std::time::Duration;

    #[derive(Default)]
    struct RumbleLog {
        calls: Vec<(f32, Duration)>,
    }

    struct RecordingRumble {
        log: Rc<RefCell<RumbleLog>>,
        fail: bool,
    }

    impl RumbleDevice for RecordingRumble {
        fn play_rumble(&mut self, strength: f32, duration: Duration) -> Result<(), PeripheralError> {
            self.log.borrow_mut().calls.push((strength, duration));
            if self.fail {
                Err(PeripheralError::RumbleFailed("motor stalled".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn config_for(dir: &Path) -> ApplicationConfig {
        let path = dir.join("splash.png");
        image::RgbaImage::from_pixel(4, 3, image::Rgba([0, 255, 255, 255]))
            .save(&path)
            .unwrap();
        let mut config = ApplicationConfig::default();
        config.assets.splash_path = path;
        config
    }

    fn engine(config: ApplicationConfig, controller: Option<Box<dyn RumbleDevice>>) -> Engine<HeadlessRenderer> {
        Engine::new(
            HeadlessRenderer::new(config.window.width, config.window.height),
            ImageDecoder::init().unwrap(),
            controller,
            config,
        )
    }

    #[test]
    fn test_new_sets_initial_draw_color() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_for(dir.path());
        config.renderer.clear_color = Color::rgb(1, 2, 3);

        let engine = engine(config, None);
        assert_eq!(engine.state(), LifecycleState::Initialized);
        assert_eq!(engine.backend().draw_color(), Color::rgb(1, 2, 3));
    }

    #[test]
    fn test_frame_draws_splash_at_origin() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine(config_for(dir.path()), None);
        engine.load_media().unwrap();
        engine.backend_mut().clear_commands();

        engine.render_frame();

        let commands = engine.backend().commands();
        assert_eq!(commands.len(), 4);
        assert_eq!(commands[0], DrawCommand::SetDrawColor(Color::WHITE));
        assert_eq!(commands[1], DrawCommand::Clear);
        assert!(matches!(commands[2], DrawCommand::Copy { src: None, dst, .. } if dst == Rect::new(0, 0, 4, 3)));
        assert_eq!(commands[3], DrawCommand::Present);
    }

    #[test]
    fn test_quit_on_first_poll_runs_one_frame() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine(config_for(dir.path()), None);
        engine.load_media().unwrap();

        let mut events = ScriptedEvents::from_frames([vec![InputEvent::Quit]]);
        assert_eq!(engine.run_loop(&mut events).unwrap(), 1);
        assert!(engine.quit_requested());
        assert_eq!(engine.state(), LifecycleState::Running);
    }

    #[test]
    fn test_events_are_drained_before_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine(config_for(dir.path()), None);
        engine.load_media().unwrap();

        let mut events = ScriptedEvents::from_frames([
            vec![InputEvent::Other, InputEvent::Other],
            vec![InputEvent::Other],
            vec![InputEvent::Other, InputEvent::Quit, InputEvent::Other],
        ]);
        assert_eq!(engine.run_loop(&mut events).unwrap(), 3);
        assert_eq!(events.polled(), 6);
    }

    #[test]
    fn test_button_press_plays_configured_rumble() {
        let dir = tempfile::tempdir().unwrap();
        let log = Rc::new(RefCell::new(RumbleLog::default()));
        let device = RecordingRumble { log: Rc::clone(&log), fail: false };
        let mut engine = engine(config_for(dir.path()), Some(Box::new(device)));
        engine.load_media().unwrap();

        let mut events = ScriptedEvents::from_frames([
            vec![InputEvent::ControllerButtonDown { which: 0, button: 2 }],
            vec![InputEvent::Quit],
        ]);
        engine.run_loop(&mut events).unwrap();

        assert_eq!(log.borrow().calls, vec![(0.75, Duration::from_millis(500))]);
        assert_eq!(engine.summary().rumbles_played, 1);
    }

    #[test]
    fn test_rumble_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let log = Rc::new(RefCell::new(RumbleLog::default()));
        let device = RecordingRumble { log: Rc::clone(&log), fail: true };
        let mut engine = engine(config_for(dir.path()), Some(Box::new(device)));
        engine.load_media().unwrap();

        let mut events = ScriptedEvents::from_frames([
            vec![InputEvent::ControllerButtonDown { which: 0, button: 0 }],
            vec![InputEvent::ControllerButtonDown { which: 0, button: 1 }, InputEvent::Quit],
        ]);
        assert_eq!(engine.run_loop(&mut events).unwrap(), 2);
        assert_eq!(engine.summary().rumble_failures, 2);
        assert_eq!(log.borrow().calls.len(), 2);
    }

    #[test]
    fn test_button_without_controller_is_counted() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine(config_for(dir.path()), None);
        engine.handle_event(InputEvent::ControllerButtonDown { which: 3, button: 0 });
        assert_eq!(engine.summary().rumble_failures, 1);
    }

    #[test]
    fn test_draw_failure_keeps_running() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine(config_for(dir.path()), None);
        engine.load_media().unwrap();
        engine.backend_mut().fail_copies(true);

        let mut events = ScriptedEvents::from_frames([vec![], vec![InputEvent::Quit]]);
        assert_eq!(engine.run_loop(&mut events).unwrap(), 2);
        assert_eq!(engine.summary().draw_failures, 2);
        assert_eq!(engine.backend().frames_presented(), 2);
    }

    #[test]
    fn test_run_loop_requires_media() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine(config_for(dir.path()), None);
        let mut events = ScriptedEvents::default();

        let err = engine.run_loop(&mut events).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidTransition { from: LifecycleState::Initialized, to: LifecycleState::Running }
        ));
    }

    #[test]
    fn test_load_media_twice_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine(config_for(dir.path()), None);
        engine.load_media().unwrap();
        assert!(matches!(engine.load_media(), Err(AppError::InvalidTransition { .. })));
        assert!(engine.splash().is_loaded());
    }

    #[test]
    fn test_shutdown_releases_texture() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine(config_for(dir.path()), None);
        engine.load_media().unwrap();
        let live = engine.backend().live_texture_counter();
        assert_eq!(live.get(), 1);

        let summary = engine.shutdown();
        assert_eq!(summary.final_state, LifecycleState::Terminated);
        assert_eq!(live.get(), 0);
    }
}
