mod app;
mod config;
mod shell;
mod views;

use tracing::info;

use chatapp_api::Session;
use chatapp_crypto::IdentityHasher;
use chatapp_db::{MessageStore, UserDirectory};

use crate::app::App;
use crate::config::Config;
use crate::shell::TerminalShell;

fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so they don't interleave with the dialogs
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    info!("Starting ChatApp with {:?}", config);

    let hasher = match config.rng_seed {
        Some(seed) => IdentityHasher::seeded(seed),
        None => IdentityHasher::from_os_rng(),
    };
    let session = Session::new(UserDirectory::new(), MessageStore::new(hasher))
        .with_max_login_attempts(config.max_login_attempts);

    let mut shell = TerminalShell::stdio();
    let mut app = App::new(&mut shell, session, config.sample_data);
    let exit = app.run();

    let session = app.into_session();
    info!(
        "ChatApp exited ({:?}) with {} sent message(s)",
        exit,
        session.messages().sent().len()
    );

    Ok(())
}
