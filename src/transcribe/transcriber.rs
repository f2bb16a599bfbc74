use super::ports::Transcriber;
use crate::utils::error::{LabError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct TranscriptionBody {
    text: String,
}

/// Sends the audio to a speech-recognition service and reads back
/// `{"text": ...}`.
#[derive(Debug, Clone)]
pub struct HttpTranscriber {
    client: Client,
    endpoint: String,
    model: String,
}

impl HttpTranscriber {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    async fn request(&self, audio_path: &Path) -> Result<String> {
        let audio = tokio::fs::read(audio_path).await?;
        tracing::debug!(
            "sending {} bytes to {} (model {})",
            audio.len(),
            self.endpoint,
            self.model
        );

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("model", self.model.as_str())])
            .header("content-type", "audio/mpeg")
            .timeout(Duration::from_secs(600))
            .body(audio)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LabError::GatewayError {
                message: format!("transcriber answered {}", response.status()),
            });
        }
        let body: TranscriptionBody = response.json().await?;
        Ok(body.text)
    }
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    async fn transcribe_audio(&self, audio_path: &Path) -> Option<String> {
        match self.request(audio_path).await {
            Ok(text) if !text.trim().is_empty() => {
                tracing::info!("audio transcribed ({} characters)", text.len());
                Some(text)
            }
            Ok(_) => {
                tracing::warn!("the transcriber returned no text");
                None
            }
            Err(e) => {
                tracing::error!("transcription failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_posts_audio_and_reads_text() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/transcribe")
                    .query_param("model", "base")
                    .body("audio-bytes");
                then.status(200).json_body(json!({"text": "hello world"}));
            })
            .await;

        let dir = TempDir::new().unwrap();
        let audio = dir.path().join("a.mp3");
        std::fs::write(&audio, "audio-bytes").unwrap();

        let transcriber = HttpTranscriber::new(server.url("/transcribe"), "base");
        let text = transcriber.transcribe_audio(&audio).await;

        mock.assert_async().await;
        assert_eq!(text.as_deref(), Some("hello world"));
    }

    #[tokio::test]
    async fn test_missing_file_yields_none() {
        let transcriber = HttpTranscriber::new("http://127.0.0.1:9/transcribe", "base");
        assert!(transcriber
            .transcribe_audio(Path::new("/definitely/not/here.mp3"))
            .await
            .is_none());
    }
}
