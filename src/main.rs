//! RigScan-IO - Acquisition daemon for the field scanning rig

use rigscan_io::app::RigApp;
use rigscan_io::config::AppConfig;
use rigscan_io::error::Result;
use std::env;
use std::path::PathBuf;

/// Configuration file location from the command line: `--config <path>`
/// or `-c <path>`, a bare positional path, or `rigscan.toml` in the
/// working directory.
fn config_path() -> PathBuf {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                if let Some(path) = args.next() {
                    return PathBuf::from(path);
                }
            }
            _ if !arg.starts_with('-') => return PathBuf::from(arg),
            _ => {}
        }
    }
    PathBuf::from("rigscan.toml")
}

fn main() -> Result<()> {
    let path = config_path();
    let have_file = path.exists();
    let config = if have_file {
        AppConfig::from_file(&path)?
    } else {
        AppConfig::default()
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.clone()),
    )
    .init();

    log::info!("RigScan-IO v{} starting...", env!("CARGO_PKG_VERSION"));
    if have_file {
        log::info!("Using config: {}", path.display());
    } else {
        log::warn!("Config {} not found, using defaults", path.display());
    }

    let app = RigApp::new(config);
    app.run()?;

    log::info!("RigScan-IO stopped");
    Ok(())
}
