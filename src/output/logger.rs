//! Raw NDJSON stream logging.
//!
//! Every line the bridge emits is appended verbatim, so a log file is
//! exactly the input format of `chatfold replay`.

use chrono::Utc;
use std::env;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Best-effort append-only log of the raw bridge stream.
///
/// Creation and write failures disable the log rather than aborting the
/// stream; the transcript is the product, the log is a debugging aid.
pub struct RawLog {
    file: Option<File>,
    path: Option<PathBuf>,
}

impl RawLog {
    /// A log that drops everything (`--no-log`, tests).
    pub fn disabled() -> Self {
        Self {
            file: None,
            path: None,
        }
    }

    /// Create a timestamped log file under the log directory.
    pub fn create() -> Self {
        let dir = log_directory();
        if std::fs::create_dir_all(&dir).is_err() {
            return Self::disabled();
        }

        let timestamp = Utc::now().format("%Y%m%d-%H%M%S").to_string();
        let path = dir.join(format!("{}.jsonl", timestamp));
        match File::create(&path) {
            Ok(file) => Self {
                file: Some(file),
                path: Some(path),
            },
            Err(_) => Self::disabled(),
        }
    }

    /// Log to a specific file path.
    pub fn at(path: &Path) -> Self {
        match File::create(path) {
            Ok(file) => Self {
                file: Some(file),
                path: Some(path.to_path_buf()),
            },
            Err(_) => Self::disabled(),
        }
    }

    /// Append one raw line.
    pub fn append(&mut self, line: &str) {
        if let Some(file) = &mut self.file {
            writeln!(file, "{line}").ok();
        }
    }

    /// Where the log is being written, when enabled.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Get the log directory path.
pub fn log_directory() -> PathBuf {
    let base_dir = env::var("TMPDIR")
        .or_else(|_| env::var("XDG_RUNTIME_DIR"))
        .unwrap_or_else(|_| "/tmp".to_string());

    let project_name = env::current_dir()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| "unknown".to_string());

    PathBuf::from(base_dir)
        .join("chatfold")
        .join("logs")
        .join(project_name)
}
