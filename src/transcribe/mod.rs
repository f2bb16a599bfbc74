pub mod downloader;
pub mod ports;
pub mod saver;
pub mod service;
pub mod transcriber;

pub use downloader::HttpDownloader;
pub use ports::{Downloader, Saver, Transcriber};
pub use saver::TextSaver;
pub use service::{TranscriptionOutcome, TranscriptionService};
pub use transcriber::HttpTranscriber;

use crate::config::toml_config::TranscribeSettings;
use crate::utils::error::Result;

/// Wires the HTTP downloader and transcriber with the text saver.
pub fn service_from_settings(settings: &TranscribeSettings) -> Result<TranscriptionService> {
    Ok(TranscriptionService::new(
        Box::new(HttpDownloader::new(&settings.work_dir)?),
        Box::new(HttpTranscriber::new(
            &settings.transcriber_url,
            &settings.model,
        )),
        Box::new(TextSaver::new(&settings.output_dir)),
    ))
}
