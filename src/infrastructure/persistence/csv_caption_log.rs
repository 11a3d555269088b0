use std::fs::OpenOptions;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::{CaptionLog, CaptionLogError};
use crate::domain::CaptionRecord;

const HEADER: [&str; 2] = ["Filename", "Caption"];

/// Append-only CSV log; the header row is written exactly once, when
/// the file is first created.
pub struct CsvCaptionLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvCaptionLog {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl CaptionLog for CsvCaptionLog {
    async fn append(&self, record: &CaptionRecord) -> Result<(), CaptionLogError> {
        let _guard = self.write_lock.lock().await;

        let file_exists = self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if !file_exists {
            writer
                .write_record(HEADER)
                .map_err(|e| CaptionLogError::WriteFailed(e.to_string()))?;
        }

        writer
            .write_record([record.filename.as_str(), record.caption.as_str()])
            .map_err(|e| CaptionLogError::WriteFailed(e.to_string()))?;

        writer
            .flush()
            .map_err(|e| CaptionLogError::WriteFailed(e.to_string()))?;

        Ok(())
    }
}
