use super::ports::{timestamped_filename, Saver};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Writes transcripts as UTF-8 text files under `output_dir`.
#[derive(Debug, Clone)]
pub struct TextSaver {
    output_dir: PathBuf,
}

impl TextSaver {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl Default for TextSaver {
    fn default() -> Self {
        Self::new(".")
    }
}

#[async_trait]
impl Saver for TextSaver {
    async fn save_text(&self, text: &str, output: &Path) -> bool {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                tracing::error!("cannot create {}: {}", parent.display(), e);
                return false;
            }
        }
        match tokio::fs::write(output, text).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("cannot write {}: {}", output.display(), e);
                false
            }
        }
    }

    fn default_output(&self) -> PathBuf {
        self.output_dir.join(timestamped_filename())
    }
}
