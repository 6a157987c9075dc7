use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::canonical::{Classification, RedirectRules};
use crate::types::{Definition, ResolutionResult};

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("unexpected upstream payload: {0}")]
    Api(String),
}

/// Upstream word source. Implementations perform single round-trips with no
/// internal retry; retry policy lives in the [`Resolver`].
#[async_trait]
pub trait WordSource: Send + Sync {
    /// Draw one random word that has at least one dictionary definition.
    async fn random_word(&self) -> Result<String, LookupError>;

    /// All definitions for a word. An empty set is a valid outcome, not an
    /// error.
    async fn definitions(&self, word: &str) -> Result<Vec<Definition>, LookupError>;
}

/// Drives a [`WordSource`] to one canonical (word, definitions) pair per run.
///
/// At most one run executes at a time; a trigger arriving while a run is in
/// flight is dropped, not queued.
pub struct Resolver {
    rules: RedirectRules,
    in_flight: AtomicBool,
}

impl Resolver {
    pub fn new(rules: RedirectRules) -> Self {
        Self {
            rules,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Resolve `seed` (or a fresh random word) to a canonical entry.
    ///
    /// Returns `Ok(None)` when another run is already in flight. Empty
    /// definition sets re-roll a new random word and redirect stubs are
    /// followed until a canonical entry is reached; there is no attempt cap.
    /// Transport failures propagate unretried.
    pub async fn resolve(
        &self,
        source: &dyn WordSource,
        seed: Option<&str>,
    ) -> Result<Option<ResolutionResult>, LookupError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("resolution already in flight, dropping trigger");
            return Ok(None);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let mut word: Option<String> = seed.map(str::to_string);
        let mut attempts = 0u32;

        loop {
            let current = match word.take() {
                Some(w) => w,
                None => source.random_word().await?,
            };
            attempts += 1;

            let definitions = source.definitions(&current).await?;
            let classification = self.rules.classify(&current, &definitions);

            if classification == Classification::Empty {
                tracing::debug!(word = %current, "no definitions, re-rolling");
                continue;
            }

            if let Some(target) = classification.redirect_target() {
                // Exact string equality only; a self-redirect collapses to
                // canonical rather than looping.
                if target != current.as_str() {
                    tracing::debug!(from = %current, to = %target, "following redirect");
                    word = Some(target.to_string());
                    continue;
                }
            }

            tracing::debug!(word = %current, attempts, "resolved canonical word");
            return Ok(Some(ResolutionResult {
                word: current,
                definitions,
                attempts,
            }));
        }
    }
}

/// Clears the in-flight flag on every exit path, error included.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, VecDeque};
    use std::sync::atomic::AtomicU32;
    use std::sync::{Arc, Mutex};

    use tokio::sync::Notify;

    use super::*;

    /// Scripted source: hands out queued random words and a fixed definition
    /// table, counting definition fetches.
    #[derive(Default)]
    struct ScriptedSource {
        randoms: Mutex<VecDeque<String>>,
        definitions: HashMap<String, Vec<Definition>>,
        fetches: AtomicU32,
    }

    impl ScriptedSource {
        fn with_randoms(words: &[&str]) -> Self {
            Self {
                randoms: Mutex::new(words.iter().map(|w| w.to_string()).collect()),
                ..Default::default()
            }
        }

        fn define(mut self, word: &str, texts: &[&str]) -> Self {
            self.definitions.insert(
                word.to_string(),
                texts.iter().map(|t| Definition::new(*t, Some("noun"))).collect(),
            );
            self
        }
    }

    #[async_trait]
    impl WordSource for ScriptedSource {
        async fn random_word(&self) -> Result<String, LookupError> {
            self.randoms
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| LookupError::Api("random queue exhausted".to_string()))
        }

        async fn definitions(&self, word: &str) -> Result<Vec<Definition>, LookupError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.definitions.get(word).cloned().unwrap_or_default())
        }
    }

    fn resolver() -> Resolver {
        Resolver::new(RedirectRules::default())
    }

    #[tokio::test]
    async fn canonical_word_resolves_in_one_attempt() {
        let source = ScriptedSource::with_randoms(&["cactus"])
            .define("cactus", &["A succulent plant of arid regions."]);

        let result = resolver().resolve(&source, None).await.unwrap().unwrap();
        assert_eq!(result.word, "cactus");
        assert_eq!(result.attempts, 1);
        assert!(!result.definitions.is_empty());
    }

    #[tokio::test]
    async fn supplied_seed_skips_the_random_draw() {
        let source = ScriptedSource::with_randoms(&[])
            .define("dromedary", &["A one-humped camel."]);

        let result = resolver()
            .resolve(&source, Some("dromedary"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result.word, "dromedary");
        assert_eq!(result.attempts, 1);
    }

    #[tokio::test]
    async fn empty_definitions_reroll_a_fresh_random_word() {
        // "zxqj" has no definitions; the pipeline must discard it entirely
        // and draw again, carrying the attempt count forward.
        let source = ScriptedSource::with_randoms(&["zxqj", "otter"])
            .define("otter", &["A semiaquatic mustelid."]);

        let result = resolver().resolve(&source, None).await.unwrap().unwrap();
        assert_eq!(result.word, "otter");
        assert_eq!(result.attempts, 2);
    }

    #[tokio::test]
    async fn plural_redirect_is_followed_to_the_lemma() {
        let source = ScriptedSource::with_randoms(&["cacti"])
            .define("cacti", &["Plural form of cactus."])
            .define("cactus", &["A succulent plant of arid regions."]);

        let result = resolver().resolve(&source, None).await.unwrap().unwrap();
        assert_eq!(result.word, "cactus");
        assert_eq!(result.attempts, 2);
        assert!(!result.definitions.is_empty());
    }

    #[tokio::test]
    async fn see_also_redirect_is_followed() {
        let source = ScriptedSource::with_randoms(&["bactrian-ref"])
            .define("bactrian-ref", &["See also dromedary."])
            .define("dromedary", &["A one-humped camel."]);

        let result = resolver().resolve(&source, None).await.unwrap().unwrap();
        assert_eq!(result.word, "dromedary");
        assert_eq!(result.attempts, 2);
    }

    #[tokio::test]
    async fn self_redirect_collapses_to_canonical() {
        // Extraction reproduces the queried word; following it would loop
        // forever, so it is accepted as-is.
        let source = ScriptedSource::with_randoms(&["sheep"])
            .define("sheep", &["Plural form of sheep."]);

        let result = resolver().resolve(&source, None).await.unwrap().unwrap();
        assert_eq!(result.word, "sheep");
        assert_eq!(result.attempts, 1);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transport_failure_propagates_unretried() {
        // Empty random queue makes the source fail the first call.
        let source = ScriptedSource::with_randoms(&[]);

        let err = resolver().resolve(&source, None).await.unwrap_err();
        assert!(matches!(err, LookupError::Api(_)));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn flag_clears_after_a_failed_run() {
        let source = ScriptedSource::with_randoms(&["cactus"])
            .define("cactus", &["A succulent plant."]);

        let resolver = resolver();
        // First run fails on the exhausted-random stub.
        let failing = ScriptedSource::with_randoms(&[]);
        assert!(resolver.resolve(&failing, None).await.is_err());
        assert!(!resolver.is_in_flight());

        // A later run proceeds normally.
        let result = resolver.resolve(&source, None).await.unwrap();
        assert!(result.is_some());
    }

    /// Source that parks on a notify before answering, so a run can be held
    /// in flight from the test.
    struct ParkedSource {
        release: Arc<Notify>,
    }

    #[async_trait]
    impl WordSource for ParkedSource {
        async fn random_word(&self) -> Result<String, LookupError> {
            self.release.notified().await;
            Ok("cactus".to_string())
        }

        async fn definitions(&self, _word: &str) -> Result<Vec<Definition>, LookupError> {
            Ok(vec![Definition::new("A succulent plant.", Some("noun"))])
        }
    }

    #[tokio::test]
    async fn concurrent_trigger_is_dropped_not_queued() {
        let release = Arc::new(Notify::new());
        let source = Arc::new(ParkedSource {
            release: release.clone(),
        });
        let resolver = Arc::new(resolver());

        let first = tokio::spawn({
            let resolver = resolver.clone();
            let source = source.clone();
            async move { resolver.resolve(source.as_ref(), None).await }
        });

        // Let the first run reach its suspension point.
        while !resolver.is_in_flight() {
            tokio::task::yield_now().await;
        }

        // Second trigger observes the in-flight run and is a no-op.
        let dropped = resolver.resolve(source.as_ref(), None).await.unwrap();
        assert!(dropped.is_none());

        release.notify_one();
        let result = first.await.unwrap().unwrap().unwrap();
        assert_eq!(result.word, "cactus");
        assert!(!resolver.is_in_flight());
    }
}
