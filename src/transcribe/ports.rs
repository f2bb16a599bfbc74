use async_trait::async_trait;
use chrono::Local;
use std::path::{Path, PathBuf};

#[async_trait]
pub trait Downloader: Send + Sync {
    /// Fetches the media behind `url` into a local file. `None` on failure.
    async fn download_video(&self, url: &str) -> Option<PathBuf>;
}

#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe_audio(&self, audio_path: &Path) -> Option<String>;
}

#[async_trait]
pub trait Saver: Send + Sync {
    async fn save_text(&self, text: &str, output: &Path) -> bool;

    /// Where to save when the caller did not pick a name.
    fn default_output(&self) -> PathBuf {
        PathBuf::from(timestamped_filename())
    }
}

/// `file_<YYYY-mm-dd_HH-MM-SS>.txt` in local time.
pub fn timestamped_filename() -> String {
    format!("file_{}.txt", Local::now().format("%Y-%m-%d_%H-%M-%S"))
}
