// Concurrent translation pipeline
//
// This module contains the coordination logic of the application:
// - dispatcher: exclusive distribution of paragraph indices to workers
// - cancel: cooperative run cancellation
// - progress: progress reporting contract
// - prompts: prompt template and context windows
// - core: the worker pool itself

pub mod cancel;
pub mod core;
pub mod dispatcher;
pub mod progress;
pub mod prompts;

pub use cancel::CancellationFlag;
pub use core::{RunOutcome, TranslationService};
pub use dispatcher::WorkDispatcher;
pub use progress::ProgressUpdate;
pub use prompts::PromptBuilder;
