//! Access to the accumulated warning log.

use std::io::{self, ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::error::OrchestratorError;

/// File name the log is delivered under.
pub const LOG_ATTACHMENT_NAME: &str = "logs.log";

/// Most bytes a single dump carries. Older lines beyond this are left out.
pub const DEFAULT_DUMP_LIMIT: u64 = 10 * 1024 * 1024;

/// The file that the WARN-level log layer writes into.
#[derive(Debug, Clone)]
pub struct WarningLog {
    path: PathBuf,
    max_bytes: u64,
}

impl WarningLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_limit(path, DEFAULT_DUMP_LIMIT)
    }

    pub fn with_limit(path: impl Into<PathBuf>, max_bytes: u64) -> Self {
        Self {
            path: path.into(),
            max_bytes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The newest part of the log, at most `max_bytes` long, or `None` when
    /// the file is missing or empty.
    ///
    /// A cut that lands inside a line drops that partial line.
    pub async fn read(&self) -> Result<Option<Vec<u8>>, OrchestratorError> {
        let file = match File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(OrchestratorError::Diagnostics(e)),
        };
        self.read_tail(file)
            .await
            .map_err(OrchestratorError::Diagnostics)
    }

    async fn read_tail(&self, mut file: File) -> io::Result<Option<Vec<u8>>> {
        let len = file.metadata().await?.len();
        let skip = len.saturating_sub(self.max_bytes);
        if skip > 0 {
            file.seek(SeekFrom::Start(skip)).await?;
        }

        let mut bytes = Vec::with_capacity(len.min(self.max_bytes) as usize);
        file.take(self.max_bytes).read_to_end(&mut bytes).await?;

        if skip > 0 {
            if let Some(newline) = bytes.iter().position(|&b| b == b'\n') {
                bytes.drain(..=newline);
            }
            tracing::debug!("Warning log is {} bytes, skipped the oldest {}", len, skip);
        }

        Ok((!bytes.is_empty()).then_some(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_and_empty_log() {
        let dir = tempfile::tempdir().unwrap();
        let log = WarningLog::new(dir.path().join("warning.log"));
        assert_eq!(log.read().await.unwrap(), None);

        std::fs::write(log.path(), b"").unwrap();
        assert_eq!(log.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_log_contents() {
        let dir = tempfile::tempdir().unwrap();
        let log = WarningLog::new(dir.path().join("warning.log"));
        std::fs::write(log.path(), "WARN something broke\n").unwrap();

        assert_eq!(
            log.read().await.unwrap().as_deref(),
            Some(b"WARN something broke\n".as_slice())
        );
    }

    #[tokio::test]
    async fn test_oversized_log_keeps_newest_whole_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log = WarningLog::with_limit(dir.path().join("warning.log"), 15);
        std::fs::write(log.path(), "first line\nsecond line\nthird line\n").unwrap();

        assert_eq!(
            log.read().await.unwrap().as_deref(),
            Some(b"third line\n".as_slice())
        );
    }

    #[tokio::test]
    async fn test_log_at_limit_is_whole() {
        let dir = tempfile::tempdir().unwrap();
        let log = WarningLog::with_limit(dir.path().join("warning.log"), 11);
        std::fs::write(log.path(), "first line\n").unwrap();

        assert_eq!(
            log.read().await.unwrap().as_deref(),
            Some(b"first line\n".as_slice())
        );
    }
}
