/*!
 * Core translation pipeline: the worker pool.
 *
 * A run seeds a dispatcher with every paragraph index, spawns a fixed number
 * of worker tasks that claim indices one at a time, translate them through
 * the completion gateway with fixed-delay retries, and write each result into
 * a write-once slot. When every worker has terminated the results are joined
 * in source order, or discarded if the run was cancelled.
 */

use log::{debug, warn};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use crate::app_config::TranslationCommonConfig;
use crate::document::Document;
use crate::errors::TranslationError;
use crate::providers::CompletionGateway;
use crate::translation::cancel::CancellationFlag;
use crate::translation::dispatcher::WorkDispatcher;
use crate::translation::progress::ProgressUpdate;
use crate::translation::prompts::PromptBuilder;

/// Terminal state of a translation run
#[derive(Debug)]
pub enum RunOutcome {
    /// Every paragraph was translated; holds the assembled output document
    Completed(String),
    /// The cancellation flag was raised; partial results are discarded
    Cancelled,
}

impl RunOutcome {
    /// The assembled output, or `None` for a cancelled run
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Completed(text) => Some(text),
            Self::Cancelled => None,
        }
    }
}

/// Shared state of one translation run.
///
/// Slots are partitioned by index: the dispatcher hands each index to exactly
/// one worker, so every slot has a single legitimate writer and no lock is
/// needed around result writes. The counter is bumped immediately after each
/// write, so its value always equals the number of filled slots.
struct RunState {
    /// Source paragraphs, immutable for the whole run
    paragraphs: Vec<String>,
    /// One write-once result slot per paragraph
    slots: Vec<OnceLock<String>>,
    /// Queue of unclaimed paragraph indices
    dispatcher: WorkDispatcher,
    /// Number of filled result slots
    translated: AtomicUsize,
    /// Cooperative stop signal
    cancel: CancellationFlag,
}

/// Translation service that drives the concurrent worker pool
#[derive(Clone)]
pub struct TranslationService {
    /// Gateway every worker calls for completions
    gateway: Arc<dyn CompletionGateway>,
    /// Prompt construction for this run's target language
    prompt_builder: PromptBuilder,
    /// Pool sizing and retry policy
    common: TranslationCommonConfig,
}

impl TranslationService {
    /// Create a new translation service
    pub fn new(
        gateway: Arc<dyn CompletionGateway>,
        target_language: impl Into<String>,
        common: TranslationCommonConfig,
    ) -> Self {
        let prompt_builder = PromptBuilder::new(
            target_language,
            common.context_mode,
            common.context_window_size,
        );
        Self {
            gateway,
            prompt_builder,
            common,
        }
    }

    /// Translate all paragraphs concurrently.
    ///
    /// Spawns `worker_count` workers sharing one dispatcher, one slot array
    /// and one cancellation flag, then waits for every worker to terminate;
    /// there is no partial early return. A raised flag yields
    /// `RunOutcome::Cancelled` and a terminal `stopped` progress update.
    ///
    /// # Arguments
    /// * `paragraphs` - Source paragraphs in document order
    /// * `cancel` - Shared stop signal, observable by external callers
    /// * `progress` - Callback invoked from worker tasks, once per translated paragraph
    pub async fn run<F>(
        &self,
        paragraphs: Vec<String>,
        cancel: CancellationFlag,
        progress: F,
    ) -> Result<RunOutcome, TranslationError>
    where
        F: Fn(ProgressUpdate) + Clone + Send + Sync + 'static,
    {
        let total = paragraphs.len();
        let state = Arc::new(RunState {
            slots: (0..total).map(|_| OnceLock::new()).collect(),
            dispatcher: WorkDispatcher::new(total),
            translated: AtomicUsize::new(0),
            cancel,
            paragraphs,
        });

        let mut handles = Vec::with_capacity(self.common.worker_count);
        for worker_id in 0..self.common.worker_count {
            let gateway = Arc::clone(&self.gateway);
            let prompt_builder = self.prompt_builder.clone();
            let state = Arc::clone(&state);
            let progress = progress.clone();
            let retry_delay = Duration::from_millis(self.common.retry_delay_ms);
            let max_retries = self.common.max_retries;
            let max_output_tokens = self.common.max_output_tokens;

            handles.push(tokio::spawn(async move {
                worker_loop(
                    worker_id,
                    gateway,
                    prompt_builder,
                    state,
                    progress,
                    retry_delay,
                    max_retries,
                    max_output_tokens,
                )
                .await
            }));
        }

        // Join-all semantics: the run ends only when every worker has
        // independently terminated (queue drained, cancellation, or error).
        let mut first_error: Option<TranslationError> = None;
        for handle in handles {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
                Err(e) => {
                    // A panicked worker leaves its claimed slot empty; the
                    // assembly check below turns that into a loud error.
                    warn!("Translation worker aborted: {}", e);
                }
            }
        }

        if let Some(error) = first_error {
            return Err(error);
        }

        if state.cancel.is_raised() {
            let translated = state.translated.load(Ordering::SeqCst);
            progress(ProgressUpdate::stopped(translated, total));
            return Ok(RunOutcome::Cancelled);
        }

        Ok(RunOutcome::Completed(Self::assemble(&state)?))
    }

    /// Join the result slots in index order.
    ///
    /// Reached only after full exhaustion without cancellation, so every slot
    /// must be filled; a gap is a dispatcher or worker bug and fails loudly
    /// instead of joining a placeholder.
    fn assemble(state: &RunState) -> Result<String, TranslationError> {
        let mut translated = Vec::with_capacity(state.slots.len());
        for (index, slot) in state.slots.iter().enumerate() {
            match slot.get() {
                Some(text) => translated.push(text.clone()),
                None => return Err(TranslationError::MissingParagraph { index }),
            }
        }
        Ok(Document::assemble(&translated))
    }
}

/// The claim/translate/report loop run by each worker task.
#[allow(clippy::too_many_arguments)]
async fn worker_loop<F>(
    worker_id: usize,
    gateway: Arc<dyn CompletionGateway>,
    prompt_builder: PromptBuilder,
    state: Arc<RunState>,
    progress: F,
    retry_delay: Duration,
    max_retries: Option<u32>,
    max_output_tokens: u32,
) -> Result<(), TranslationError>
where
    F: Fn(ProgressUpdate) + Clone + Send + Sync + 'static,
{
    let total = state.paragraphs.len();

    loop {
        // The flag is checked only here, at the top of the outer loop; an
        // in-flight retry cycle below is never interrupted.
        if state.cancel.is_raised() {
            debug!("Worker {} stopping: cancellation requested", worker_id);
            return Ok(());
        }

        let Some(index) = state.dispatcher.claim_next() else {
            debug!("Worker {} stopping: work queue exhausted", worker_id);
            return Ok(());
        };

        let prompt = prompt_builder.build(&state.paragraphs, index);

        // Retry the same prompt with a fixed delay until the gateway
        // succeeds. All gateway failures are treated identically and none
        // of them is surfaced to the caller as a failure of the run.
        let mut failed_attempts: u32 = 0;
        let translated_text = loop {
            match gateway.complete(&prompt, max_output_tokens).await {
                Ok(text) => break text,
                Err(e) => {
                    failed_attempts += 1;
                    if let Some(max) = max_retries {
                        if failed_attempts > max {
                            // Let the other workers wind down before the
                            // error is surfaced.
                            state.cancel.raise();
                            return Err(TranslationError::RetriesExhausted {
                                index,
                                attempts: failed_attempts,
                            });
                        }
                    }
                    warn!(
                        "Worker {}: paragraph {} failed ({}), retrying in {:?}",
                        worker_id, index, e, retry_delay
                    );
                    tokio::time::sleep(retry_delay).await;
                }
            }
        };

        // The dispatcher hands out each index exactly once, so the slot must
        // be empty; a filled one means exclusivity was violated.
        if state.slots[index].set(translated_text.clone()).is_err() {
            return Err(TranslationError::SlotAlreadyFilled { index });
        }

        let translated = state.translated.fetch_add(1, Ordering::SeqCst) + 1;
        progress(ProgressUpdate::completed(translated, total, translated_text));
    }
}
