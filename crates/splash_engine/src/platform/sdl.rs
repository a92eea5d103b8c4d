//! SDL2 platform layer
//!
//! Brings up the SDL subsystems, opens the first joystick (and its haptic
//! interface when it has one), creates the window and renderer, and adapts
//! the SDL event pump to [`EventSource`]. [`run`] ties it together with the
//! [`Engine`].

use std::time::Duration;

use sdl2::event::Event;
use sdl2::haptic::Haptic;
use sdl2::joystick::Joystick;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::{EventPump, HapticSubsystem, JoystickSubsystem, Sdl, VideoSubsystem};

use crate::application::{abort_initialization, AppError};
use crate::assets::ImageDecoder;
use crate::core::config::{ApplicationConfig, RendererConfig, WindowConfig};
use crate::engine::{Engine, RunSummary};
use crate::input::haptics::{duration_ms, motor_intensity};
use crate::input::{EventSource, InputEvent, PeripheralError, RumbleDevice};
use crate::platform::PlatformError;
use crate::render::backends::SdlRenderer;

const SCALE_QUALITY_HINT: &str = "SDL_RENDER_SCALE_QUALITY";

/// Initialized SDL context and subsystems
///
/// Fields are declared in teardown order; SDL itself shuts down when the
/// last field is dropped.
pub struct SdlPlatform {
    event_pump: EventPump,
    haptic: HapticSubsystem,
    joystick: JoystickSubsystem,
    video: VideoSubsystem,
    _sdl: Sdl,
}

fn subsystem_error(subsystem: &'static str) -> impl FnOnce(String) -> PlatformError {
    move |message| PlatformError::Subsystem { subsystem, message }
}

impl SdlPlatform {
    /// Initialize video, joystick and haptic support
    ///
    /// Failing to enable linear filtering is only a warning.
    pub fn init(renderer: &RendererConfig) -> Result<Self, PlatformError> {
        let sdl = sdl2::init().map_err(subsystem_error("core"))?;
        let video = sdl.video().map_err(subsystem_error("video"))?;
        let joystick = sdl.joystick().map_err(subsystem_error("joystick"))?;
        let haptic = sdl.haptic().map_err(subsystem_error("haptic"))?;

        if renderer.linear_filtering && !sdl2::hint::set(SCALE_QUALITY_HINT, "1") {
            log::warn!("Warning: Linear texture filtering not enabled!");
        }

        let event_pump = sdl.event_pump().map_err(subsystem_error("events"))?;
        log::info!("SDL initialized (video, joystick, haptic)");

        Ok(Self {
            event_pump,
            haptic,
            joystick,
            video,
            _sdl: sdl,
        })
    }

    /// Open the first joystick and, if possible, its haptic interface
    ///
    /// A missing haptic interface only disables the haptic path; the
    /// joystick's own rumble motors are still used.
    pub fn open_controller(&self) -> Result<SdlController, PeripheralError> {
        let count = self
            .joystick
            .num_joysticks()
            .map_err(PeripheralError::OpenFailed)?;
        if count < 1 {
            return Err(PeripheralError::NoJoystick);
        }

        let joystick = self
            .joystick
            .open(0)
            .map_err(|e| PeripheralError::OpenFailed(e.to_string()))?;
        log::info!("Opened game controller {:?}", joystick.name());

        // The binding initializes rumble as part of opening the device.
        let haptic = match self.haptic.open_from_joystick_id(0) {
            Ok(haptic) => Some(haptic),
            Err(e) => {
                log::warn!("Warning: {}", PeripheralError::HapticUnavailable(e.to_string()));
                None
            }
        };

        Ok(SdlController { haptic, joystick })
    }

    /// Create the window and an SDL renderer for it
    pub fn create_canvas(
        &self,
        window: &WindowConfig,
        renderer: &RendererConfig,
    ) -> Result<Canvas<Window>, PlatformError> {
        let sdl_window = self
            .video
            .window(&window.title, window.width, window.height)
            .build()
            .map_err(|e| PlatformError::Window(e.to_string()))?;
        log::info!("Created {}x{} window {:?}", window.width, window.height, window.title);

        let mut builder = sdl_window.into_canvas();
        if renderer.accelerated {
            builder = builder.accelerated();
        }
        if renderer.vsync {
            builder = builder.present_vsync();
        }
        let canvas = builder
            .build()
            .map_err(|e| PlatformError::Renderer(e.to_string()))?;

        let info = canvas.info();
        log::info!("Created renderer {:?} (vsync: {})", info.name, renderer.vsync);
        Ok(canvas)
    }

    /// Event source reading from the SDL event queue
    pub fn events(&mut self) -> SdlEvents<'_> {
        SdlEvents { pump: &mut self.event_pump }
    }
}

impl Drop for SdlPlatform {
    fn drop(&mut self) {
        log::info!("SDL shut down");
    }
}

/// Adapts the SDL event pump to [`EventSource`]
pub struct SdlEvents<'a> {
    pump: &'a mut EventPump,
}

/// Map an SDL event to the events the application cares about
pub fn translate_event(event: &Event) -> InputEvent {
    match *event {
        Event::Quit { .. } => InputEvent::Quit,
        Event::JoyButtonDown { which, button_idx, .. } => InputEvent::ControllerButtonDown {
            which,
            button: button_idx,
        },
        _ => InputEvent::Other,
    }
}

impl EventSource for SdlEvents<'_> {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.pump.poll_event().map(|event| translate_event(&event))
    }
}

/// Which rumble mechanism a controller should use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RumblePath {
    /// The joystick's own rumble motors accepted the request
    Joystick,
    /// Fall back to the haptic device
    Haptic,
    /// Neither mechanism is usable
    Unavailable,
}

/// Choose the rumble mechanism from the joystick rumble outcome
///
/// The joystick API is preferred because it reports errors.
pub const fn rumble_path(joystick_ok: bool, has_haptic: bool) -> RumblePath {
    match (joystick_ok, has_haptic) {
        (true, _) => RumblePath::Joystick,
        (false, true) => RumblePath::Haptic,
        (false, false) => RumblePath::Unavailable,
    }
}

/// First joystick plus its optional haptic interface
pub struct SdlController {
    haptic: Option<Haptic>,
    joystick: Joystick,
}

impl SdlController {
    /// Whether a haptic interface was opened
    pub const fn has_haptic(&self) -> bool {
        self.haptic.is_some()
    }
}

impl RumbleDevice for SdlController {
    fn play_rumble(&mut self, strength: f32, duration: Duration) -> Result<(), PeripheralError> {
        let ms = duration_ms(duration);
        let intensity = motor_intensity(strength);

        let joystick_result = self.joystick.set_rumble(intensity, intensity, ms);
        match (rumble_path(joystick_result.is_ok(), self.has_haptic()), joystick_result) {
            (RumblePath::Haptic, Err(e)) => {
                log::debug!("Joystick rumble unavailable ({}), using haptic device", e);
                if let Some(haptic) = self.haptic.as_mut() {
                    haptic.rumble_play(strength, ms);
                }
                Ok(())
            }
            (RumblePath::Unavailable, Err(e)) => Err(PeripheralError::RumbleFailed(e.to_string())),
            _ => Ok(()),
        }
    }

    fn name(&self) -> String {
        self.joystick.name()
    }
}

/// Bring up SDL, run the splash screen until quit, and tear everything down
///
/// Resources are acquired in the order platform, controller, window and
/// renderer, image decoding; every exit path, including early errors,
/// releases them in reverse. A bring-up failure is logged as
/// `Uninitialized -> ShuttingDown -> Terminated`.
pub fn run(config: &ApplicationConfig) -> Result<RunSummary, AppError> {
    log::info!("Lifecycle: starting from Uninitialized");
    let mut platform = SdlPlatform::init(&config.renderer).map_err(abort_initialization)?;

    let controller: Option<Box<dyn RumbleDevice>> = match platform.open_controller() {
        Ok(controller) => {
            if !controller.has_haptic() {
                log::debug!("Rumble will use the joystick motors only");
            }
            Some(Box::new(controller))
        }
        Err(e) => {
            log::warn!("Warning: {}", e);
            None
        }
    };

    let canvas = platform
        .create_canvas(&config.window, &config.renderer)
        .map_err(abort_initialization)?;
    let creator = canvas.texture_creator();
    let decoder = ImageDecoder::init()
        .map_err(|e| abort_initialization(PlatformError::from(e)))?;

    let engine = Engine::new(SdlRenderer::new(canvas, &creator), decoder, controller, config.clone());
    let mut events = platform.events();
    engine.run(&mut events)
}
