#[cfg(test)]
pub mod test {
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use serde_json::json;
    use tempfile::TempDir;

    use crate::types::Document;

    /// The config file most tests start from.
    pub const SAMPLE: &str = r#"{
  "app": {
    "name": "TestApp",
    "version": "1.0.0"
  },
  "server": {
    "port": 8080
  }
}"#;

    pub fn sample_document() -> Document {
        match json!({
            "app": { "name": "TestApp", "version": "1.0.0" },
            "server": { "port": 8080 }
        }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    /// Write `content` to `config.json` inside `dir` and return its absolute path.
    pub fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        fs::write(&path, content).unwrap();
        path
    }

    /// Read the file back as a JSON value, for asserting on what was persisted.
    pub fn read_json(path: &std::path::Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    /// In-memory log sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with a thread-local subscriber and return its result plus
    /// everything it logged, at debug level and above.
    pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();

        let result = tracing::subscriber::with_default(subscriber, f);
        let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
        (result, logs)
    }

    #[test]
    fn capture_logs_collects_events() {
        let ((), logs) = capture_logs(|| tracing::warn!(key = "a.b", "something happened"));
        assert!(logs.contains("WARN"));
        assert!(logs.contains("something happened"));
        assert!(logs.contains("a.b"));
    }

    #[test]
    fn sample_matches_sample_document() {
        let parsed: Document = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(parsed, sample_document());
    }
}
