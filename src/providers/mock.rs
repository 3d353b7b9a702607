/*!
 * Mock gateway implementation for testing.
 *
 * This module provides a scripted gateway that simulates different behaviors:
 * - `MockGateway::working()` - Always succeeds
 * - `MockGateway::failing()` - Always fails with an error
 * - `MockGateway::fail_times(n)` - Fails the first n attempts per prompt, then succeeds
 * - `MockGateway::slow(ms)` - Succeeds after a delay
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::GatewayError;
use crate::providers::CompletionGateway;

/// Behavior mode for the mock gateway
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a scripted or echoed reply
    Working,
    /// Always fails with an error
    Failing,
    /// Fails the first `failures` attempts for each distinct prompt, then succeeds
    FailTimes {
        /// Number of failures before the first success
        failures: u32,
    },
    /// Succeeds after a fixed delay (for overlap testing)
    Slow {
        /// Delay before responding, in milliseconds
        delay_ms: u64,
    },
}

/// Mock gateway for testing worker behavior without a network
#[derive(Debug)]
pub struct MockGateway {
    /// Behavior mode
    behavior: MockBehavior,
    /// Scripted replies: the first entry whose needle occurs in the prompt wins
    script: Mutex<Vec<(String, String)>>,
    /// Per-prompt attempt counts, used by `FailTimes`
    attempts: Mutex<HashMap<String, u32>>,
    /// Total number of completion calls received
    request_count: AtomicUsize,
}

impl MockGateway {
    /// Create a new mock gateway with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            script: Mutex::new(Vec::new()),
            attempts: Mutex::new(HashMap::new()),
            request_count: AtomicUsize::new(0),
        }
    }

    /// Create a working mock gateway that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock gateway that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock gateway that fails the first `failures` attempts per prompt
    pub fn fail_times(failures: u32) -> Self {
        Self::new(MockBehavior::FailTimes { failures })
    }

    /// Create a mock gateway that responds after a delay
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Script a reply: any prompt containing `needle` gets `reply`
    pub fn with_reply(self, needle: impl Into<String>, reply: impl Into<String>) -> Self {
        self.script.lock().push((needle.into(), reply.into()));
        self
    }

    /// Total number of completion calls received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Resolve the reply for a prompt: scripted entry first, echo otherwise
    fn reply_for(&self, prompt: &str) -> String {
        let script = self.script.lock();
        for (needle, reply) in script.iter() {
            if prompt.contains(needle.as_str()) {
                return reply.clone();
            }
        }
        format!("[TRANSLATED] {}", prompt)
    }
}

#[async_trait]
impl CompletionGateway for MockGateway {
    async fn complete(&self, prompt: &str, _max_output_tokens: u32) -> Result<String, GatewayError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(self.reply_for(prompt)),
            MockBehavior::Failing => Err(GatewayError::RequestFailed(
                "mock gateway configured to fail".to_string(),
            )),
            MockBehavior::FailTimes { failures } => {
                let attempt = {
                    let mut attempts = self.attempts.lock();
                    let counter = attempts.entry(prompt.to_string()).or_insert(0);
                    *counter += 1;
                    *counter
                };

                if attempt <= failures {
                    Err(GatewayError::RequestFailed(format!(
                        "mock gateway failure {} of {}",
                        attempt, failures
                    )))
                } else {
                    Ok(self.reply_for(prompt))
                }
            }
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                Ok(self.reply_for(prompt))
            }
        }
    }

    async fn test_connection(&self) -> Result<(), GatewayError> {
        match self.behavior {
            MockBehavior::Failing => Err(GatewayError::ConnectionError(
                "mock gateway configured to fail".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
