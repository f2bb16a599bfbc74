use super::ports::{Downloader, Saver, Transcriber};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptionOutcome {
    Saved(PathBuf),
    DownloadFailed,
    TranscriptionFailed,
    SaveFailed,
}

impl TranscriptionOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

/// Download → transcribe → save, depending only on the three ports.
pub struct TranscriptionService {
    downloader: Box<dyn Downloader>,
    transcriber: Box<dyn Transcriber>,
    saver: Box<dyn Saver>,
}

impl TranscriptionService {
    pub fn new(
        downloader: Box<dyn Downloader>,
        transcriber: Box<dyn Transcriber>,
        saver: Box<dyn Saver>,
    ) -> Self {
        Self {
            downloader,
            transcriber,
            saver,
        }
    }

    /// Once the download succeeded the temporary audio file is removed,
    /// whatever happens afterwards.
    pub async fn transcribe_video(&self, url: &str, output: Option<&Path>) -> TranscriptionOutcome {
        tracing::info!("starting transcription of {}", url);

        let Some(audio_path) = self.downloader.download_video(url).await else {
            tracing::warn!("download failed, aborting");
            return TranscriptionOutcome::DownloadFailed;
        };

        let outcome = self.transcribe_and_save(&audio_path, output).await;
        cleanup(&audio_path).await;

        tracing::info!("transcription finished: {:?}", outcome);
        outcome
    }

    async fn transcribe_and_save(&self, audio_path: &Path, output: Option<&Path>) -> TranscriptionOutcome {
        let Some(text) = self.transcriber.transcribe_audio(audio_path).await else {
            tracing::warn!("transcription failed, aborting");
            return TranscriptionOutcome::TranscriptionFailed;
        };

        let target = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.saver.default_output());
        if self.saver.save_text(&text, &target).await {
            tracing::info!("transcript saved to '{}'", target.display());
            TranscriptionOutcome::Saved(target)
        } else {
            tracing::warn!("saving failed, the temporary file is removed anyway");
            TranscriptionOutcome::SaveFailed
        }
    }
}

async fn cleanup(audio_path: &Path) {
    if !tokio::fs::try_exists(audio_path).await.unwrap_or(false) {
        return;
    }
    match tokio::fs::remove_file(audio_path).await {
        Ok(()) => tracing::debug!("temporary file '{}' removed", audio_path.display()),
        Err(e) => tracing::error!(
            "could not remove temporary file '{}': {}",
            audio_path.display(),
            e
        ),
    }
}
