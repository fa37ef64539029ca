//! Logging setup for linkhop binaries.
//!
//! [`init`] installs a global `tracing` subscriber with a console layer and,
//! when configured, a [`JournalLayer`] that appends INFO and ERROR events to
//! a JSON-lines file.

mod error;
mod journal;
mod settings;

pub use error::{Result, TelemetryError};
pub use journal::{JournalEntry, JournalLayer};
pub use settings::{LogFormat, TelemetrySettings};

use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

/// Installs the global subscriber described by `settings`.
///
/// `log` records are forwarded to `tracing` as part of installation. Fails
/// if the filter does not parse, the journal cannot be opened, or a global
/// subscriber is already set.
pub fn init(settings: &TelemetrySettings) -> Result<()> {
    let filter = EnvFilter::try_new(&settings.filter)?;

    let console = match settings.format {
        LogFormat::Text => fmt::layer().with_writer(std::io::stderr).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
    };

    let journal = settings
        .journal_path
        .as_deref()
        .map(JournalLayer::open)
        .transpose()?;

    tracing_subscriber::registry()
        .with(console.with_filter(filter))
        .with(journal.map(|layer| layer.with_filter(LevelFilter::INFO)))
        .try_init()?;

    Ok(())
}
