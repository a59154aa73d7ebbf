//=========================================================================
// Frogger
//
// Opens the window and plays the game.
//
// The game renders into a `Canvas` that the window shows each redraw;
// win/lose text goes to the window title. F12 writes the current frame
// to `screenshots/frame-NNNN.png`.
//
// Environment:
// - `FROGGER_ASSETS`: directory holding `images/` (default `assets`)
// - `RUST_LOG`: log filter (default `info`)
//
//=========================================================================

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use log::{error, info, warn};

use frogger_engine::prelude::*;

const SCREENSHOT_DIR: &str = "screenshots";

//=== Screenshots =========================================================

/// The game plus an F12 frame dump.
struct WithScreenshots {
    game: Frogger<Canvas>,
    directory: PathBuf,
    taken: u32,
}

impl WithScreenshots {
    fn save(&mut self) {
        if let Err(e) = fs::create_dir_all(&self.directory) {
            warn!("Cannot create {}: {}", self.directory.display(), e);
            return;
        }

        let path = self.directory.join(format!("frame-{:04}.png", self.taken));
        match self.game.engine().surface().save_png(&path) {
            Ok(()) => {
                self.taken += 1;
                info!("Saved {}", path.display());
            }
            Err(e) => warn!("Screenshot failed: {}", e),
        }

        for caption in self.game.engine().surface().captions().iter().filter(|c| !c.stroked) {
            info!("Caption: {}", caption.text);
        }
    }
}

impl Game for WithScreenshots {
    fn key_up(&mut self, key: KeyCode) {
        match key {
            KeyCode::F12 => self.save(),
            key => self.game.handle_key(key),
        }
    }

    fn frame(&mut self, now: f64) -> Result<(), EngineError> {
        Game::frame(&mut self.game, now)
    }

    fn shutdown(&mut self) {
        Game::shutdown(&mut self.game);
    }

    fn presentation(&self) -> Option<Presentation<'_>> {
        self.game.presentation()
    }
}

//=== Entry Point =========================================================

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let assets = std::env::var("FROGGER_ASSETS").unwrap_or_else(|_| "assets".to_string());
    info!("Frogger starting (assets: {})", assets);

    let config = GameConfig::default();
    let (width, height) = (config.field_width, config.field_height);

    let result = RuntimeBuilder::new()
        .with_title("Frogger")
        .with_window_size(width, height)
        .build()
        .run(move || {
            let surface = Canvas::new(width, height);
            let mut game = Frogger::new(surface, FileImageLoader::new(assets), config)?;
            game.start()?;
            Ok(WithScreenshots {
                game,
                directory: PathBuf::from(SCREENSHOT_DIR),
                taken: 0,
            })
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Frogger exited with an error: {}", e);
            ExitCode::FAILURE
        }
    }
}
