//! Cached, coalesced interpretation requests.
//!
//! Every request goes through the same pipeline:
//!
//! 1. build a deterministic cache key from the inputs;
//! 2. return the cached reply if there is one;
//! 3. return the fallback if no provider is configured;
//! 4. otherwise ask the provider once, cache a well-formed reply, return it;
//! 5. on any failure, log it and return the fallback.
//!
//! Callers asking for the same key while a request is in flight wait for
//! that request instead of starting another one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;
use yj_core::{Casting, Hexagram};

use crate::cache::{CacheStore, FileStore, MemoryStore, divination_key, library_key};
use crate::config::OracleConfig;
use crate::interpretation::{Interpretation, LibraryCommentary, StructuredReply, parse_reply};
use crate::pending::PendingInterpretation;
use crate::prompt::{divination_prompt, library_prompt};
use crate::provider::{GeminiProvider, InterpretationProvider, ProviderRequest};

type InFlight = Arc<OnceCell<Option<String>>>;

/// Front door for AI interpretations.
///
/// Cheap to share behind an [`Arc`]; one instance per process is enough.
pub struct Interpreter {
    store: Arc<dyn CacheStore>,
    provider: Option<Arc<dyn InterpretationProvider>>,
    in_flight: Mutex<HashMap<String, InFlight>>,
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("provider", &self.provider.as_ref().map(|p| p.name().to_string()))
            .finish_non_exhaustive()
    }
}

impl Interpreter {
    /// Create an interpreter over a cache store, with no provider.
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            provider: None,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Attach a provider.
    pub fn with_provider(mut self, provider: Arc<dyn InterpretationProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Build an interpreter from configuration.
    ///
    /// Uses a [`FileStore`] at the configured cache path, falling back to a
    /// [`MemoryStore`] if the file cannot be opened. A Gemini provider is
    /// attached only when a key is configured.
    pub fn from_config(config: &OracleConfig) -> Self {
        let store: Arc<dyn CacheStore> = match config.resolved_cache_path() {
            Some(path) => match FileStore::open(&path) {
                Ok(store) => Arc::new(store),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "cache unavailable, using memory");
                    Arc::new(MemoryStore::new())
                }
            },
            None => Arc::new(MemoryStore::new()),
        };

        let interpreter = Self::new(store);
        match GeminiProvider::from_config(config) {
            Some(provider) => interpreter.with_provider(Arc::new(provider)),
            None => {
                tracing::debug!("no provider key configured, interpretations will use fallback");
                interpreter
            }
        }
    }

    /// Whether a provider is attached.
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Interpret a divination. Never fails: problems yield the fallback.
    pub async fn interpret(
        &self,
        question: &str,
        primary: &Hexagram,
        relating: Option<&Hexagram>,
        casting: &Casting,
    ) -> Interpretation {
        let key = divination_key(question, primary, relating, casting);
        self.fetch(key, || divination_prompt(question, primary, relating, casting))
            .await
    }

    /// Start interpreting a divination in the background.
    ///
    /// The request is spawned on the current tokio runtime right away; the
    /// returned handle can be awaited later. Dropping the handle lets the
    /// request finish (and populate the cache) without anyone waiting.
    pub fn start(
        self: &Arc<Self>,
        question: &str,
        primary: &Hexagram,
        relating: Option<&Hexagram>,
        casting: &Casting,
    ) -> PendingInterpretation {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            let key = divination_key(question, primary, relating, casting);
            if let Some(hit) = self.read_cached::<Interpretation>(&key) {
                return PendingInterpretation::ready(hit);
            }
            tracing::warn!("no async runtime to start interpretation on, using fallback");
            return PendingInterpretation::ready(Interpretation::fallback());
        };

        let this = Arc::clone(self);
        let question = question.to_string();
        let primary = *primary;
        let relating = relating.copied();
        let casting = *casting;
        let handle = runtime.spawn(async move {
            this.interpret(&question, &primary, relating.as_ref(), &casting)
                .await
        });
        PendingInterpretation::spawned(handle)
    }

    /// Study notes for one hexagram, cached per hexagram number.
    pub async fn study(&self, hexagram: &Hexagram) -> LibraryCommentary {
        self.fetch(library_key(hexagram), || library_prompt(hexagram))
            .await
    }

    async fn fetch<T, F>(&self, key: String, prompt: F) -> T
    where
        T: StructuredReply,
        F: FnOnce() -> String,
    {
        if let Some(hit) = self.read_cached::<T>(&key) {
            tracing::debug!(%key, "interpretation cache hit");
            return hit;
        }

        let Some(provider) = self.provider.clone() else {
            return T::fallback();
        };

        let slot = InFlightSlot {
            interpreter: self,
            key: &key,
            cell: self.in_flight_cell(&key),
        };
        let body = slot
            .cell
            .get_or_init(|| async {
                // A request for this key may have completed between the
                // cache check above and joining the in-flight slot.
                if let Some(raw) = self.read_raw(&key) {
                    return Some(raw);
                }
                self.request::<T>(provider.as_ref(), &key, prompt()).await
            })
            .await
            .clone();
        drop(slot);

        body.and_then(|raw| parse_reply::<T>(&raw).ok())
            .unwrap_or_else(T::fallback)
    }

    async fn request<T: StructuredReply>(
        &self,
        provider: &dyn InterpretationProvider,
        key: &str,
        prompt: String,
    ) -> Option<String> {
        let request = ProviderRequest {
            prompt,
            schema: T::schema(),
        };

        let reply = match provider.generate(&request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(provider = provider.name(), error = %e, "interpretation request failed");
                return None;
            }
        };

        let parsed = match parse_reply::<T>(&reply) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(provider = provider.name(), error = %e, "interpretation reply malformed");
                return None;
            }
        };

        let normalized = match serde_json::to_string(&parsed) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize interpretation");
                return None;
            }
        };

        if let Err(e) = self.store.set(key, &normalized) {
            tracing::warn!(%key, error = %e, "cache write failed");
        }
        Some(normalized)
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(%key, error = %e, "cache read failed, treating as miss");
                None
            }
        }
    }

    fn read_cached<T: StructuredReply>(&self, key: &str) -> Option<T> {
        let raw = self.read_raw(key)?;
        match parse_reply(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%key, error = %e, "cached interpretation unreadable, treating as miss");
                None
            }
        }
    }

    fn in_flight_cell(&self, key: &str) -> InFlight {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(in_flight.entry(key.to_string()).or_default())
    }

    /// Give back a handle from [`Self::in_flight_cell`]. The entry is
    /// removed by the last holder, whether it finished or was cancelled.
    fn release(&self, key: &str, cell: InFlight) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        let last = in_flight
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, &cell) && Arc::strong_count(current) == 2);
        if last {
            in_flight.remove(key);
        }
        // Holder counts only change under the lock.
        drop(cell);
        drop(in_flight);
    }
}

/// A caller's share of an in-flight request, released on drop.
struct InFlightSlot<'a> {
    interpreter: &'a Interpreter,
    key: &'a str,
    cell: InFlight,
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        let cell = std::mem::take(&mut self.cell);
        self.interpreter.release(self.key, cell);
    }
}
