use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;
use typed_builder::TypedBuilder;

/// Output format of the console layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}', expected text or json")),
        }
    }
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct TelemetrySettings {
    /// `EnvFilter` directives for the console layer.
    #[builder(default = "info".to_string(), setter(into))]
    pub filter: String,
    #[builder(default)]
    pub format: LogFormat,
    /// Where to append the diagnostic journal. No journal when unset.
    #[builder(default, setter(strip_option, into))]
    pub journal_path: Option<PathBuf>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
