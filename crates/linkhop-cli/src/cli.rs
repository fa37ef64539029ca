use clap::{Parser, Subcommand, ValueEnum};
use linkhop_telemetry::LogFormat;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "LINKHOP_DB_PATH";
pub const STORAGE_BACKEND_ENV: &str = "LINKHOP_STORAGE";
pub const BASE_URL_ENV: &str = "LINKHOP_BASE_URL";
pub const LOG_FILTER_ENV: &str = "LINKHOP_LOG";
pub const LOG_FORMAT_ENV: &str = "LINKHOP_LOG_FORMAT";
pub const JOURNAL_ENV: &str = "LINKHOP_JOURNAL";

pub const DEFAULT_DB_PATH: &str = "linkhop.redb";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "redb")]
    Redb,
    #[value(name = "in-memory")]
    InMemory,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::Redb => write!(f, "redb"),
            StorageBackendArg::InMemory => write!(f, "in-memory"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "linkhop", version, about = "Shorten URLs and follow short links")]
pub struct CLI {
    #[arg(long, env = DB_PATH_ENV, default_value = DEFAULT_DB_PATH, global = true)]
    pub db_path: PathBuf,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Redb,
        global = true
    )]
    pub storage: StorageBackendArg,

    /// Prefix used when printing short links.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    #[arg(long, env = LOG_FILTER_ENV, default_value = DEFAULT_LOG_FILTER, global = true)]
    pub log: String,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Text,
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Append INFO and ERROR events as JSON lines to this file.
    #[arg(long, env = JOURNAL_ENV, global = true)]
    pub journal: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shorten a single URL.
    Shorten {
        #[arg(long)]
        url: String,
        /// Custom short code instead of a generated one.
        #[arg(long)]
        alias: Option<String>,
        /// Minutes the link stays valid (default 30).
        #[arg(long)]
        validity: Option<u32>,
    },
    /// Shorten up to five URLs from a JSON file.
    ///
    /// The file holds an array of objects with `originalUrl` and optional
    /// `alias` and `validityMinutes`.
    Batch { file: PathBuf },
    /// Resolve a short code and print its target.
    Open {
        code: String,
        #[arg(long)]
        referrer: Option<String>,
    },
    /// Show statistics for every link, or for one short code.
    Stats { code: Option<String> },
}
