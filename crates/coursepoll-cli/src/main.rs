use tracing_subscriber::{EnvFilter, filter::LevelFilter};

mod command;
mod util;

/// Environment variable holding a `tracing` filter directive
const LOG_ENV: &str = "COURSEPOLL_LOG";

fn main() -> anyhow::Result<()> {
    let args = command::parse();
    init_tracing(args.log_level());
    command::run(args)
}

fn init_tracing(default_level: tracing::Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(default_level).into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
