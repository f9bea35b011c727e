//! Config persistence: write the whole document back to disk under an
//! exclusive advisory lock.
//!
//! The lock (`fs2`, `flock`/`LockFileEx`) is taken on the config file itself
//! and held only for the truncate-and-write. It serializes writers sharing the
//! path so their bytes cannot interleave. It does not cover loading, so two
//! stores that load, mutate different keys, and save will lose the first
//! writer's change: last save wins.
//!
//! The lock is owned by a guard that releases it on every exit path. A failed
//! release is logged on its own and never turns a successful write into an
//! error.

use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use fs2::FileExt;
use tracing::{debug, warn};

use crate::error::JsonfigError;
use crate::types::Document;

const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Render a document as pretty JSON with 2-space indentation.
pub fn render_document(doc: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

/// I/O wrapper: lock `path`, replace its contents with `doc`, unlock.
///
/// Creates the file and its parent directories if needed. With
/// `lock_timeout = None` acquisition blocks until the lock is free; otherwise
/// it gives up with [`JsonfigError::LockTimeout`] once the timeout elapses.
/// The file is not truncated until the lock is held.
pub fn save_document(
    path: &Path,
    doc: &Document,
    lock_timeout: Option<Duration>,
) -> Result<(), JsonfigError> {
    let content = render_document(doc).map_err(|e| JsonfigError::WriteError {
        path: path.to_path_buf(),
        source: e.into(),
    })?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| JsonfigError::WriteError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|e| JsonfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

    let lock = FileLock::acquire(&file, path, lock_timeout)?;
    write_locked(lock.file, &content).map_err(|e| JsonfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!(path = %path.display(), bytes = content.len(), "config file written");
    Ok(())
}

fn write_locked(mut file: &File, content: &str) -> std::io::Result<()> {
    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}

/// Exclusive advisory lock on an open file, released on drop.
struct FileLock<'a> {
    file: &'a File,
    path: &'a Path,
}

impl<'a> FileLock<'a> {
    fn acquire(
        file: &'a File,
        path: &'a Path,
        timeout: Option<Duration>,
    ) -> Result<Self, JsonfigError> {
        // A timeout too large to form a deadline waits like no timeout at all.
        let deadline = timeout.and_then(|t| Instant::now().checked_add(t).map(|d| (t, d)));
        match deadline {
            None => FileExt::lock_exclusive(file).map_err(|e| JsonfigError::LockError {
                path: path.to_path_buf(),
                source: e,
            })?,
            Some((timeout, deadline)) => {
                loop {
                    match FileExt::try_lock_exclusive(file) {
                        Ok(()) => break,
                        Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                            if Instant::now() >= deadline {
                                return Err(JsonfigError::LockTimeout {
                                    path: path.to_path_buf(),
                                    timeout,
                                });
                            }
                            thread::sleep(LOCK_POLL_INTERVAL);
                        }
                        Err(e) => {
                            return Err(JsonfigError::LockError {
                                path: path.to_path_buf(),
                                source: e,
                            });
                        }
                    }
                }
            }
        }

        debug!(path = %path.display(), "acquired config file lock");
        Ok(Self { file, path })
    }
}

impl Drop for FileLock<'_> {
    fn drop(&mut self) {
        // std's inherent `File::unlock` would shadow the trait method.
        if let Err(e) = FileExt::unlock(self.file) {
            report_unlock_failure(self.path, e);
        }
    }
}

fn report_unlock_failure(path: &Path, source: std::io::Error) {
    let err = JsonfigError::UnlockError {
        path: path.to_path_buf(),
        source,
    };
    warn!(path = %path.display(), error = %err, "failed to release config file lock");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{SAMPLE, capture_logs, read_json, sample_document, write_config};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn render_uses_two_space_indent() {
        let doc = sample_document();
        let rendered = render_document(&doc).unwrap();
        assert_eq!(rendered, SAMPLE);
    }

    #[test]
    fn save_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        save_document(&path, &sample_document(), None).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, SAMPLE);
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub").join("dir").join("config.json");

        save_document(&path, &sample_document(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_replaces_entire_contents() {
        let dir = TempDir::new().unwrap();
        let long = format!("{{\"padding\": \"{}\"}}", "x".repeat(4096));
        let path = write_config(&dir, &long);

        let mut doc = Document::new();
        doc.insert("short".into(), json!(1));
        save_document(&path, &doc, None).unwrap();

        assert_eq!(read_json(&path), json!({"short": 1}));
    }

    #[test]
    fn save_to_directory_is_write_error() {
        let dir = TempDir::new().unwrap();
        let result = save_document(dir.path(), &sample_document(), None);
        assert!(matches!(result, Err(JsonfigError::WriteError { .. })));
    }

    #[test]
    fn lock_is_released_after_save() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, SAMPLE);

        save_document(&path, &sample_document(), None).unwrap();

        let other = File::open(&path).unwrap();
        FileExt::try_lock_exclusive(&other).unwrap();
        FileExt::unlock(&other).unwrap();
    }

    #[test]
    fn held_lock_times_out_without_touching_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, SAMPLE);

        let holder = File::open(&path).unwrap();
        FileExt::lock_exclusive(&holder).unwrap();

        let mut doc = sample_document();
        doc.insert("changed".into(), json!(true));
        let result = save_document(&path, &doc, Some(Duration::from_millis(50)));

        match result {
            Err(JsonfigError::LockTimeout { timeout, .. }) => {
                assert_eq!(timeout, Duration::from_millis(50));
            }
            other => panic!("Expected LockTimeout, got {other:?}"),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE);

        FileExt::unlock(&holder).unwrap();
    }

    #[test]
    fn blocking_save_waits_for_holder() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, SAMPLE);

        let holder = File::open(&path).unwrap();
        FileExt::lock_exclusive(&holder).unwrap();
        let release = thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            FileExt::unlock(&holder).unwrap();
        });

        let mut doc = Document::new();
        doc.insert("after".into(), json!("wait"));
        save_document(&path, &doc, None).unwrap();
        release.join().unwrap();

        assert_eq!(read_json(&path), json!({"after": "wait"}));
    }

    #[test]
    fn unbounded_timeout_saves_unlocked_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{}");

        save_document(&path, &sample_document(), Some(Duration::MAX)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE);
    }

    #[test]
    fn unbounded_timeout_waits_for_holder() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, SAMPLE);

        let holder = File::open(&path).unwrap();
        FileExt::lock_exclusive(&holder).unwrap();
        let release = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            FileExt::unlock(&holder).unwrap();
        });

        let mut doc = Document::new();
        doc.insert("after".into(), json!("wait"));
        save_document(&path, &doc, Some(Duration::MAX)).unwrap();
        release.join().unwrap();

        assert_eq!(read_json(&path), json!({"after": "wait"}));
    }

    #[test]
    fn unlock_failure_is_logged_as_warning() {
        let path = Path::new("/tmp/app.json");
        let source = std::io::Error::other("bad file descriptor");

        let ((), logs) = capture_logs(|| report_unlock_failure(path, source));
        assert!(logs.contains("WARN"));
        assert!(logs.contains("failed to release config file lock"));
        assert!(logs.contains("Failed to unlock /tmp/app.json"));
    }

    #[test]
    fn timeout_error_is_returned_not_logged() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, SAMPLE);
        let holder = File::open(&path).unwrap();
        FileExt::lock_exclusive(&holder).unwrap();

        let (result, logs) = capture_logs(|| {
            save_document(&path, &sample_document(), Some(Duration::from_millis(20)))
        });
        assert!(matches!(result, Err(JsonfigError::LockTimeout { .. })));
        assert!(!logs.contains("acquired config file lock"));

        FileExt::unlock(&holder).unwrap();
    }
}
