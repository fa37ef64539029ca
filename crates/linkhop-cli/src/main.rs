mod cli;
mod commands;

use crate::cli::{Command, StorageBackendArg, CLI};
use crate::commands::App;
use clap::Parser;
use linkhop_core::{Store, SystemClock};
use linkhop_storage::{InMemoryStore, RedbStore};
use linkhop_telemetry::TelemetrySettings;
use std::io::Write;
use std::sync::Arc;
use tracing::debug;

fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    let telemetry = TelemetrySettings {
        filter: config.log.clone(),
        format: config.log_format.into(),
        journal_path: config.journal.clone(),
    };
    linkhop_telemetry::init(&telemetry)?;

    debug!(
        storage_backend = %config.storage,
        db_path = %config.db_path.display(),
        base_url = %config.base_url,
        "starting linkhop"
    );

    let mut stdout = std::io::stdout().lock();
    match config.storage {
        StorageBackendArg::Redb => {
            let store = RedbStore::open(&config.db_path)?;
            run(&config, Arc::new(store), &mut stdout)
        }
        StorageBackendArg::InMemory => run(&config, Arc::new(InMemoryStore::new()), &mut stdout),
    }
}

fn run<S: Store>(config: &CLI, store: Arc<S>, out: &mut impl Write) -> anyhow::Result<()> {
    let app = App::new(store, SystemClock, config.base_url.as_str());

    match &config.command {
        Command::Shorten {
            url,
            alias,
            validity,
        } => app.shorten(out, url.clone(), alias.clone(), *validity),
        Command::Batch { file } => app.batch(out, file),
        Command::Open { code, referrer } => app.open(out, code, referrer.clone()),
        Command::Stats { code } => app.stats(out, code.as_deref()),
    }
}
