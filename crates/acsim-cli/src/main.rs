use tracing_subscriber::EnvFilter;

mod catalog;
mod command;
mod console;
mod schema;
mod util;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("acsim=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    command::run()
}
