//! Splash screen application
//!
//! Shows `splash.png` in a 640x480 window until the window is closed. A
//! joystick button press plays a short rumble when a controller is present.
//! Settings can be overridden with `splash.toml` (or the file named by
//! `SPLASH_CONFIG`).

use std::io::{BufRead, IsTerminal};
use std::process::ExitCode;

use splash_engine::foundation::logging;
use splash_engine::platform::sdl;
use splash_engine::prelude::*;

fn wait_for_enter() {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        return;
    }
    println!("Press Enter to exit...");
    let mut line = String::new();
    let _ = stdin.lock().read_line(&mut line);
}

fn main() -> ExitCode {
    logging::init();

    let config_path = ApplicationConfig::resolve_path();
    let config = match ApplicationConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", AppError::from(e));
            return ExitCode::FAILURE;
        }
    };

    match sdl::run(&config) {
        Ok(summary) => {
            log::info!(
                "Exited cleanly after {} frame(s), {} rumble(s)",
                summary.frames,
                summary.rumbles_played
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            if config.pause_on_failure {
                wait_for_enter();
            }
            ExitCode::FAILURE
        }
    }
}
