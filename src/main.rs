//! Bounce Pong entry point
//!
//! Opens the window, runs the loop until quit or a missed ball, and tears
//! everything down on the way out.

use std::process::ExitCode;

use bounce_pong::platform::WinitPlatform;
use bounce_pong::{Game, Tuning};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Bounce Pong starting...");

    let mut game = match Game::initialize(Tuning::default(), WinitPlatform::create) {
        Ok(game) => game,
        // Already logged with the platform's message
        Err(_) => return ExitCode::FAILURE,
    };

    let reason = game.run();
    game.shutdown();
    log::info!("Bounce Pong exited: {:?}", reason);

    ExitCode::SUCCESS
}
