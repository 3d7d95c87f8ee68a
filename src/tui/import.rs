use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::utils::StackError;

const CHUNK_SIZE: usize = 64 * 1024;

/// Progress of the file currently being imported
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadState {
    pub is_uploading: bool,
    /// Percent complete, 0-100
    pub progress: u8,
    pub file_size: u64,
    pub file_name: String,
}

impl UploadState {
    fn start(&mut self, file_name: String, file_size: u64) {
        self.is_uploading = true;
        self.progress = 0;
        self.file_name = file_name;
        self.file_size = file_size;
    }

    fn advance(&mut self, read: u64) {
        self.progress = if self.file_size == 0 {
            100
        } else {
            ((read.min(self.file_size) * 100) / self.file_size) as u8
        };
    }
}

/// Read `path` into the workspace in chunks, reporting progress through
/// `upload`. Returns the imported file name.
pub async fn import_file(path: &Path, upload: Arc<Mutex<UploadState>>) -> Result<String, StackError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| StackError::Ui(format!("not a file: {}", path.display())))?;

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.is_dir() {
        return Err(StackError::Ui(format!("{} is a directory", path.display())));
    }

    upload.lock().start(file_name.clone(), metadata.len());
    let result = read_chunks(path, &upload).await;
    *upload.lock() = UploadState::default();

    let total = result?;
    info!(file = %file_name, bytes = total, "file imported");
    Ok(file_name)
}

async fn read_chunks(path: &Path, upload: &Mutex<UploadState>) -> Result<u64, StackError> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let read = file.read(&mut buffer).await?;
        if read == 0 {
            break;
        }
        total += read as u64;
        upload.lock().advance(total);
        debug!(bytes = total, "import progress");
        tokio::task::yield_now().await;
    }

    upload.lock().advance(total);
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_progress_percent() {
        let mut state = UploadState::default();
        state.start("a.bin".to_string(), 200);
        state.advance(50);
        assert_eq!(state.progress, 25);
        state.advance(500);
        assert_eq!(state.progress, 100);

        state.start("empty".to_string(), 0);
        state.advance(0);
        assert_eq!(state.progress, 100);
    }

    #[tokio::test]
    async fn test_import_file_resets_state() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.pdf");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&vec![7u8; CHUNK_SIZE * 2 + 10]).unwrap();

        let upload = Arc::new(Mutex::new(UploadState::default()));
        let name = import_file(&path, upload.clone()).await.unwrap();

        assert_eq!(name, "report.pdf");
        assert_eq!(*upload.lock(), UploadState::default());
    }

    #[tokio::test]
    async fn test_import_missing_file() {
        let dir = TempDir::new().unwrap();
        let upload = Arc::new(Mutex::new(UploadState::default()));
        let err = import_file(&dir.path().join("missing.txt"), upload.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, StackError::Io(_)));
        assert!(!upload.lock().is_uploading);
    }

    #[tokio::test]
    async fn test_import_rejects_directory() {
        let dir = TempDir::new().unwrap();
        let upload = Arc::new(Mutex::new(UploadState::default()));
        let err = import_file(dir.path(), upload).await.unwrap_err();
        assert!(matches!(err, StackError::Ui(_)));
    }
}
