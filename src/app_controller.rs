use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;

use crate::app_config::Config;
use crate::document::Document;
use crate::file_utils::FileManager;
use crate::providers::{self, CompletionGateway};
use crate::translation::{CancellationFlag, ProgressUpdate, RunOutcome, TranslationService};

// @module: Application controller for document translation

/// Longest preview shown in the progress bar message
const PREVIEW_MAX_CHARS: usize = 60;

/// Main application controller for document translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.target_language.is_empty()
            && self.config.translation.common.worker_count > 0
    }

    /// Translate a document file end to end.
    ///
    /// Reads and segments the input, probes the gateway once before any
    /// worker is spawned (so a bad credential fails at startup), runs the
    /// worker pool with a progress bar, and writes the output file only when
    /// the run completed without cancellation.
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_file: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file not found: {:?}", input_file));
        }

        let output_path = output_file.unwrap_or_else(|| {
            FileManager::generate_output_path(&input_file, &self.config.target_language)
        });
        if FileManager::file_exists(&output_path) && !force_overwrite {
            return Err(anyhow!(
                "Output file already exists: {:?}. Use --force-overwrite to replace it",
                output_path
            ));
        }

        let document = Document::from_file(&input_file)?;
        let total = document.len();
        info!(
            "Segmented {:?} into {} paragraph{}",
            input_file,
            total,
            if total == 1 { "" } else { "s" }
        );

        let gateway = providers::create_gateway(&self.config.translation);
        info!(
            "🚀 dotwai: {} - {}",
            self.config.translation.provider.display_name(),
            self.config.translation.get_model()
        );

        // A gateway that cannot authenticate must surface here, before any
        // worker is spawned, not as an endless retry loop.
        gateway
            .test_connection()
            .await
            .context("Completion gateway is not reachable")?;
        info!("Completion gateway is ready");

        let cancel = CancellationFlag::new();
        Self::install_stop_handler(cancel.clone());

        let outcome = self
            .translate_with_progress(gateway, document.paragraphs, cancel)
            .await?;

        match outcome {
            RunOutcome::Completed(text) => {
                FileManager::write_to_file(&output_path, &text)?;
                info!("Success: {}", output_path.display());
                info!(
                    "Translation finished in {}",
                    Self::format_duration(start_time.elapsed())
                );
                Ok(())
            }
            RunOutcome::Cancelled => {
                // A cancelled run discards partial translations rather than
                // emitting an incomplete document.
                warn!("Translation stopped; no output file was written");
                Ok(())
            }
        }
    }

    /// Run the worker pool with an attached progress bar
    async fn translate_with_progress(
        &self,
        gateway: Arc<dyn CompletionGateway>,
        paragraphs: Vec<String>,
        cancel: CancellationFlag,
    ) -> Result<RunOutcome> {
        let total = paragraphs.len() as u64;

        let progress_bar = ProgressBar::new(total);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} paragraphs ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Translating");

        let service = TranslationService::new(
            gateway,
            self.config.target_language.clone(),
            self.config.translation.common.clone(),
        );

        // Updates arrive from several worker tasks at once; the progress bar
        // serializes internally, so the callback can be called directly.
        let pb = progress_bar.clone();
        let outcome = service
            .run(paragraphs, cancel, move |update: ProgressUpdate| {
                pb.set_position(update.translated as u64);
                if update.stopped {
                    pb.set_message("Stopped");
                } else {
                    pb.set_message(Self::truncate_preview(&update.preview));
                }
            })
            .await?;

        progress_bar.finish_and_clear();
        Ok(outcome)
    }

    /// Raise the cancellation flag on Ctrl-C.
    ///
    /// Workers notice at the top of their next claim loop; paragraphs already
    /// in flight may still complete, which is accepted latency.
    fn install_stop_handler(cancel: CancellationFlag) {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Stop requested; workers finish in-flight paragraphs and exit");
                cancel.raise();
            }
        });
    }

    /// Shorten a translated paragraph to a progress-bar-sized preview
    fn truncate_preview(preview: &str) -> String {
        let flattened = preview.replace('\n', " ");
        if flattened.chars().count() <= PREVIEW_MAX_CHARS {
            return flattened;
        }
        let truncated: String = flattened.chars().take(PREVIEW_MAX_CHARS).collect();
        format!("{}…", truncated)
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

/// Convenience helper used by tests and library consumers: keep the
/// controller constructible without touching the filesystem.
impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        let mut config = Config::default();
        // The default provider requires a credential; tests have none.
        config.translation.provider = crate::app_config::TranslationProvider::Ollama;
        Self::with_config(config)
    }
}
