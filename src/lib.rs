//=========================================================================
// Frogger Engine Library Root
//
// A small layered 2D engine plus the Frogger-like game built on it.
//
// Responsibilities:
// - Expose the engine (`Engine`), its layers and resources
// - Expose the game (`game::Frogger`) and the window runtime (`Runtime`)
// - Keep OS integration (`platform`) out of the public API
//
// Typical usage:
// ```no_run
// use frogger_engine::prelude::*;
//
// fn main() -> Result<(), Box<dyn std::error::Error>> {
//     RuntimeBuilder::new().build().run(|| {
//         let config = GameConfig::default();
//         let surface = Canvas::new(505, 606);
//         let mut game = Frogger::new(surface, FileImageLoader::new("assets"), config)?;
//         game.start()?;
//         Ok(game)
//     })?;
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the engine building blocks (layers, resources, input
// routing, geometry, surfaces). `game` is the Frogger content on top.
//
pub mod core;
pub mod engine;
pub mod game;
pub mod prelude;
pub mod runtime;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the Winit window and event loop; only `runtime`
// talks to it.
//
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, EngineError, EnginePhase, TickStatus};
pub use runtime::{Game, Presentation, Runtime, RuntimeBuilder};
