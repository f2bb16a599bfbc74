use super::ports::Downloader;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Downloads media over plain HTTP into `<work_dir>/<uuid>.mp3`.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: Client,
    work_dir: PathBuf,
}

impl HttpDownloader {
    /// Creates `work_dir` when it does not exist yet.
    pub fn new(work_dir: impl Into<PathBuf>) -> Result<Self> {
        let work_dir = work_dir.into();
        std::fs::create_dir_all(&work_dir)?;
        Ok(Self {
            client: Client::new(),
            work_dir,
        })
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    async fn fetch(&self, url: &str) -> Result<PathBuf> {
        let response = self.client.get(url).send().await?.error_for_status()?;

        let path = self.work_dir.join(format!("{}.mp3", Uuid::new_v4()));
        if let Err(e) = stream_to_file(response, &path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&path).await {
                tracing::warn!("could not remove partial download {}: {}", path.display(), cleanup);
            }
            return Err(e);
        }
        Ok(path)
    }
}

async fn stream_to_file(mut response: Response, path: &Path) -> Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download_video(&self, url: &str) -> Option<PathBuf> {
        match self.fetch(url).await {
            Ok(path) => {
                tracing::info!("audio downloaded to {}", path.display());
                Some(path)
            }
            Err(e) => {
                tracing::error!("download of {} failed: {}", url, e);
                None
            }
        }
    }
}
