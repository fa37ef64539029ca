use jiff::Timestamp;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// One line of the diagnostic journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub timestamp: Timestamp,
    /// `INFO` or `ERROR`.
    pub level: String,
    pub message: String,
    /// The event's structured fields, minus the message.
    pub data: Map<String, Value>,
}

/// A [`Layer`] appending INFO and ERROR events as JSON lines.
///
/// Events at other levels are ignored. Write failures are dropped; the
/// journal never interrupts the code that logs.
pub struct JournalLayer<W> {
    writer: Mutex<W>,
}

impl JournalLayer<File> {
    /// Opens `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write + Send + 'static> JournalLayer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

#[derive(Default)]
struct JournalVisitor {
    message: String,
    data: Map<String, Value>,
}

impl JournalVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
        } else {
            self.data.insert(field.name().to_owned(), value);
        }
    }
}

impl Visit for JournalVisitor {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.insert(field, Value::String(format!("{value:?}")));
    }
}

impl<S, W> Layer<S> for JournalLayer<W>
where
    S: Subscriber,
    W: Write + Send + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = match *event.metadata().level() {
            Level::INFO => "INFO",
            Level::ERROR => "ERROR",
            _ => return,
        };

        let mut visitor = JournalVisitor::default();
        event.record(&mut visitor);

        let entry = JournalEntry {
            timestamp: Timestamp::now(),
            level: level.to_owned(),
            message: visitor.message,
            data: visitor.data,
        };

        let Ok(line) = serde_json::to_string(&entry) else {
            return;
        };
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "{line}").and_then(|()| writer.flush());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader};
    use std::sync::Arc;
    use tracing_subscriber::layer::SubscriberExt;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn entries(&self) -> Vec<JournalEntry> {
            let bytes = self.0.lock().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect()
        }
    }

    #[test]
    fn records_info_and_error_only() {
        let buf = SharedBuf::default();
        let subscriber = tracing_subscriber::registry().with(JournalLayer::new(buf.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("too chatty");
            tracing::info!(shortcode = "ex1", "originalUrl" = "https://example.com", "Redirecting to URL");
            tracing::warn!("not journaled");
            tracing::error!(shortcode = %"nope", "URL not found");
        });

        let entries = buf.entries();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].level, "INFO");
        assert_eq!(entries[0].message, "Redirecting to URL");
        assert_eq!(entries[0].data["shortcode"], "ex1");
        assert_eq!(entries[0].data["originalUrl"], "https://example.com");

        assert_eq!(entries[1].level, "ERROR");
        assert_eq!(entries[1].message, "URL not found");
        assert_eq!(entries[1].data["shortcode"], "nope");
    }

    #[test]
    fn typed_fields_keep_their_type() {
        let buf = SharedBuf::default();
        let subscriber = tracing_subscriber::registry().with(JournalLayer::new(buf.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(count = 5_u64, ok = true, "URL(s) shortened successfully");
        });

        let entry = &buf.entries()[0];
        assert_eq!(entry.data["count"], 5);
        assert_eq!(entry.data["ok"], true);
    }

    #[test]
    fn open_appends_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("journal.jsonl");

        for message in ["first", "second"] {
            let subscriber =
                tracing_subscriber::registry().with(JournalLayer::open(&path).unwrap());
            tracing::subscriber::with_default(subscriber, || tracing::info!("{message}"));
        }

        let lines: Vec<String> = BufReader::new(File::open(&path).unwrap())
            .lines()
            .map(Result::unwrap)
            .collect();
        assert_eq!(lines.len(), 2);

        let last: JournalEntry = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(last.message, "second");
    }
}
