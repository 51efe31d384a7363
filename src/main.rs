use anyhow::Result;
use bikeshare::{Config, Shell};
use std::io;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    // stdout belongs to the session; logs go to stderr
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();
    info!("startup");

    // ─── 2) configure city sources ───────────────────────────────────
    let config = Config::load()?;

    // ─── 3) interactive loop ─────────────────────────────────────────
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(&config, stdin.lock(), stdout.lock());
    if let Err(err) = shell.run() {
        error!("session aborted: {:#}", err);
        return Err(err);
    }

    info!("all done");
    Ok(())
}
