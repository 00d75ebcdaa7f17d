/// picoCAD command-line editor
///
/// Loads a picoCAD model, applies one edit and saves the result.
/// Examples:
///   - picocad robot.txt info
///   - picocad robot.txt recenter --mesh 2
///   - picocad robot.txt merge --into 1 --from 2 3 --overwrite

use clap::Parser;
use picocad_terminal::Config;
use tracing_subscriber::FmtSubscriber;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::debug!(?config, "starting picocad v{}", env!("CARGO_PKG_VERSION"));
    picocad_terminal::run(&config)
}
