//! Entry point for chessview.

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let config = cli::Cli::parse().into_config();
    log::info!(
        "Starting chessview. Backends: {:?}, show_fps={}, window_size={}x{}, assets={}",
        config.backends,
        config.show_fps,
        config.width,
        config.height,
        config.asset_root.display()
    );
    log::info!("Controls: W/S zoom, A/D orbit, Up/Down tilt, mouse look, L light, Esc quit");

    platform::run_with_renderer(config)?;

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}
