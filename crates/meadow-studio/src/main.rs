//! Meadow studio: an animated night landscape.
//!
//! Keys: `S` solid, `W` wireframe, `P` points, `Esc` quits.

mod anim;
mod app;
mod config;
mod landscape;

use anyhow::Result;
use clap::Parser;
use meadow_engine::logging::init_logging;
use meadow_engine::window::Runtime;

use crate::app::StudioApp;
use crate::config::StudioArgs;

fn main() -> Result<()> {
    let args = StudioArgs::parse();
    init_logging(args.logging_config());

    log::info!("starting in {} mode ({}x{})", args.mode, args.width, args.height);

    Runtime::run(args.runtime_config(), args.gpu_init(), StudioApp::new(args.mode))
}
