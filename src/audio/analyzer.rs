use std::path::Path;

use chrono::Local;
use tracing::info;

use crate::audio::analytics::Analytics;
use crate::audio::persist::{SavedFiles, save_results};
use crate::audio::prompt;
use crate::error::{AppError, ProviderError, StartupError};
use crate::llm::OpenAiClient;

/// Everything produced for one audio file.
#[derive(Debug, Clone)]
pub struct AudioReport {
    pub transcript: String,
    pub summary: String,
    pub analytics: Analytics,
    pub files: SavedFiles,
}

/// Transcribes, summarizes and analyzes audio files. Any transport failure aborts.
#[derive(Debug, Clone)]
pub struct AudioAnalyzer {
    client: OpenAiClient,
}

impl AudioAnalyzer {
    pub fn new(client: OpenAiClient) -> Self {
        Self { client }
    }

    pub async fn transcribe(&self, audio_path: &Path) -> Result<String, ProviderError> {
        info!("Transcribing audio file: {}", audio_path.display());
        let transcript = self.client.transcribe(audio_path).await?;
        info!("Transcription completed");
        Ok(transcript)
    }

    pub async fn summarize(&self, transcript: &str) -> Result<String, ProviderError> {
        let reply = self
            .client
            .chat(&prompt::summary_messages(transcript), prompt::SUMMARY_OPTIONS)
            .await?;
        info!("Summary generated");
        Ok(reply.content.trim().to_string())
    }

    /// Runs the duration and topic requests concurrently and interprets them.
    ///
    /// Only transport failures are errors. Empty or unusable replies fall
    /// back to the defaults of [`Analytics::from_replies`].
    pub async fn analyze(&self, transcript: &str) -> Result<Analytics, ProviderError> {
        let duration_messages = prompt::duration_messages(transcript);
        let topics_messages = prompt::topics_messages(transcript);
        let (duration, topics) = tokio::try_join!(
            self.client
                .chat_text(&duration_messages, prompt::DURATION_OPTIONS),
            self.client.chat_text(&topics_messages, prompt::TOPICS_OPTIONS),
        )?;
        info!("Analytics calculated");
        Ok(Analytics::from_replies(transcript, &duration, &topics))
    }

    /// Full pipeline for one file; results are saved into `output_dir`.
    pub async fn process(
        &self,
        audio_path: &Path,
        output_dir: &Path,
    ) -> Result<AudioReport, AppError> {
        ensure_audio_exists(audio_path)?;
        info!("Starting audio processing for: {}", audio_path.display());

        let transcript = self.transcribe(audio_path).await?;
        info!("Generating summary and analytics");
        let (summary, analytics) =
            tokio::try_join!(self.summarize(&transcript), self.analyze(&transcript))?;

        let files = save_results(
            output_dir,
            audio_path,
            &transcript,
            &summary,
            &analytics,
            &Local::now(),
        )?;

        Ok(AudioReport {
            transcript,
            summary,
            analytics,
            files,
        })
    }
}

pub fn ensure_audio_exists(audio_path: &Path) -> Result<(), StartupError> {
    if audio_path.is_file() {
        Ok(())
    } else {
        Err(StartupError::AudioNotFound {
            path: audio_path.to_path_buf(),
        })
    }
}
