//! Resilient Generator - round-robin API-key failover for generation calls.
//!
//! Wraps a raw single-credential backend and retries a failed call across
//! the whole [`KeyPool`], starting from wherever the cursor was left by the
//! previous invocation. Retries are immediate; there is no backoff between
//! credentials.

use async_trait::async_trait;
use secrecy::ExposeSecret;

use crate::ports::{GenerationError, GenerationRequest, GenerationResponse, Generator};

use super::key_pool::KeyPool;

/// A raw generation call against the provider using one explicit credential.
///
/// This is the seam between the failover logic and the HTTP client, and is
/// what tests substitute to script per-credential outcomes.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Runs one generation attempt with the given API key.
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError>;
}

/// Generator that fails over across a pool of API keys.
///
/// Each invocation tries at most every credential once, in pool order
/// starting from the shared cursor. Any backend error moves on to the next
/// key; only when the whole pool has failed does the invocation give up
/// with [`GenerationError::AllCredentialsExhausted`].
pub struct ResilientGenerator<B: GenerationBackend> {
    backend: B,
    pool: KeyPool,
}

impl<B: GenerationBackend> ResilientGenerator<B> {
    /// Creates a generator over the given backend and credential pool.
    pub fn new(backend: B, pool: KeyPool) -> Self {
        Self { backend, pool }
    }

    /// Returns the credential pool (visible for wiring and tests).
    pub fn pool(&self) -> &KeyPool {
        &self.pool
    }
}

#[async_trait]
impl<B: GenerationBackend> Generator for ResilientGenerator<B> {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let len = self.pool.len();
        if len == 0 {
            tracing::error!("generation requested but no API keys are configured");
            return Err(GenerationError::AllCredentialsExhausted { attempts: 0 });
        }

        // Snapshot the start once; the loop indexes locally so that a
        // concurrent invocation advancing the shared cursor cannot make
        // this one skip or repeat a credential.
        let start = self.pool.cursor();
        let mut last_error: Option<GenerationError> = None;

        for offset in 0..len {
            let index = (start + offset) % len;
            let key = self.pool.key(index);

            match self.backend.generate(key.expose_secret(), &request).await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    tracing::warn!(
                        key_index = index,
                        model = %request.model,
                        error = %err,
                        "generation attempt failed, rotating to next key"
                    );
                    self.pool.advance();
                    last_error = Some(err);
                }
            }
        }

        let last_error = last_error.map(|e| e.to_string()).unwrap_or_default();
        tracing::error!(
            attempts = len,
            last_error = %last_error,
            "every API key failed for this invocation"
        );
        Err(GenerationError::AllCredentialsExhausted { attempts: len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Backend scripting per-call outcomes and recording which key served
    /// each attempt.
    struct ScriptedBackend {
        /// Outcomes consumed in order; `None` means success.
        outcomes: Mutex<Vec<Option<GenerationError>>>,
        /// Keys in attempt order.
        attempts: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new(outcomes: Vec<Option<GenerationError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes),
                attempts: Mutex::new(Vec::new()),
            }
        }

        fn always_failing() -> Self {
            Self {
                outcomes: Mutex::new(Vec::new()),
                attempts: Mutex::new(Vec::new()),
            }
        }

        fn attempts(&self) -> Vec<String> {
            self.attempts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerationBackend for ScriptedBackend {
        async fn generate(
            &self,
            api_key: &str,
            _request: &GenerationRequest,
        ) -> Result<GenerationResponse, GenerationError> {
            self.attempts.lock().unwrap().push(api_key.to_string());

            let mut outcomes = self.outcomes.lock().unwrap();
            if outcomes.is_empty() {
                // Scripted outcomes exhausted: keep failing.
                return Err(GenerationError::rate_limited(30));
            }
            match outcomes.remove(0) {
                None => Ok(GenerationResponse::Text("ok".to_string())),
                Some(err) => Err(err),
            }
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new("gemini-2.5-flash").with_user_text("hello")
    }

    #[tokio::test]
    async fn success_on_first_key_does_not_move_cursor() {
        let backend = ScriptedBackend::new(vec![None]);
        let generator = ResilientGenerator::new(backend, KeyPool::from_plain(["k0", "k1", "k2"]));

        let response = generator.generate(request()).await.unwrap();

        assert_eq!(response.as_text(), Some("ok"));
        assert_eq!(generator.pool().cursor(), 0);
    }

    #[tokio::test]
    async fn failure_rotates_to_next_key() {
        let backend = ScriptedBackend::new(vec![Some(GenerationError::rate_limited(30)), None]);
        let generator = ResilientGenerator::new(backend, KeyPool::from_plain(["k0", "k1", "k2"]));

        let response = generator.generate(request()).await.unwrap();

        assert_eq!(response.as_text(), Some("ok"));
        // Cursor rests on the key that served the request.
        assert_eq!(generator.pool().cursor(), 1);
    }

    #[tokio::test]
    async fn all_failures_try_each_key_exactly_once() {
        for len in 1..=8usize {
            let keys: Vec<String> = (0..len).map(|i| format!("k{i}")).collect();
            let generator =
                ResilientGenerator::new(ScriptedBackend::always_failing(), KeyPool::from_plain(keys));

            let err = generator.generate(request()).await.unwrap_err();

            assert!(
                matches!(err, GenerationError::AllCredentialsExhausted { attempts } if attempts == len)
            );

            let mut attempts = generator.backend.attempts();
            assert_eq!(attempts.len(), len, "each key tried exactly once");
            attempts.sort();
            attempts.dedup();
            assert_eq!(attempts.len(), len, "no key tried twice");
        }
    }

    #[tokio::test]
    async fn attempts_follow_pool_order_from_cursor() {
        let generator = ResilientGenerator::new(
            ScriptedBackend::always_failing(),
            KeyPool::from_plain(["k0", "k1", "k2"]),
        );
        generator.pool().advance(); // cursor at k1

        let _ = generator.generate(request()).await;

        assert_eq!(generator.backend.attempts(), vec!["k1", "k2", "k0"]);
    }

    #[tokio::test]
    async fn cursor_persists_across_invocations() {
        // First invocation: k0 fails, k1 succeeds.
        // Second invocation must start at k1, not reset to k0.
        let backend = ScriptedBackend::new(vec![
            Some(GenerationError::unavailable("overloaded")),
            None,
            None,
        ]);
        let generator = ResilientGenerator::new(backend, KeyPool::from_plain(["k0", "k1", "k2"]));

        generator.generate(request()).await.unwrap();
        generator.generate(request()).await.unwrap();

        assert_eq!(generator.backend.attempts(), vec!["k0", "k1", "k1"]);
    }

    #[tokio::test]
    async fn consecutive_successes_reuse_the_same_key() {
        let backend = ScriptedBackend::new(vec![None, None]);
        let generator = ResilientGenerator::new(backend, KeyPool::from_plain(["k0", "k1"]));

        generator.generate(request()).await.unwrap();
        generator.generate(request()).await.unwrap();

        assert_eq!(generator.backend.attempts(), vec!["k0", "k0"]);
    }

    #[tokio::test]
    async fn empty_pool_fails_without_attempting() {
        let generator = ResilientGenerator::new(
            ScriptedBackend::always_failing(),
            KeyPool::from_plain(Vec::<String>::new()),
        );

        let err = generator.generate(request()).await.unwrap_err();

        assert!(
            matches!(err, GenerationError::AllCredentialsExhausted { attempts: 0 })
        );
        assert!(generator.backend.attempts().is_empty());
    }

    #[tokio::test]
    async fn exhaustion_after_failure_leaves_cursor_where_it_started() {
        // 3 keys, all fail: cursor advanced 3 times lands back on start.
        let generator = ResilientGenerator::new(
            ScriptedBackend::always_failing(),
            KeyPool::from_plain(["k0", "k1", "k2"]),
        );

        let _ = generator.generate(request()).await;

        assert_eq!(generator.pool().cursor(), 0);
    }

    #[tokio::test]
    async fn concurrent_invocations_all_complete() {
        use std::sync::Arc;

        let backend = ScriptedBackend::new(vec![None; 16]);
        let generator = Arc::new(ResilientGenerator::new(
            backend,
            KeyPool::from_plain(["k0", "k1", "k2"]),
        ));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let generator = Arc::clone(&generator);
            handles.push(tokio::spawn(async move {
                generator.generate(request()).await
            }));
        }

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
    }
}
