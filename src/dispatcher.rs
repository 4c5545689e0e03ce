/*!
 * Active-provider selection and call orchestration.
 *
 * The dispatcher subscribes to the configuration owner's change
 * notifications and funnels every provider outcome into a normalized
 * `TranslationResult`: callers never see provider-specific error shapes, and
 * a user-initiated cancellation never surfaces as a failure.
 */

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, warn};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::app_config::ProviderConfig;
use crate::errors::ProviderError;
use crate::providers::{build_translator, Translator};
use crate::types::{ChunkHandler, TranslationRequest, TranslationResult};

/// Seam for substituting translator construction in tests
pub type TranslatorFactory = Box<dyn Fn(&ProviderConfig) -> Box<dyn Translator> + Send + Sync>;

/// Orchestrates calls against the active provider
///
/// At most one call is in flight per logical surface: starting a new call on
/// a surface cancels the previous one, while unrelated surfaces stay
/// untouched.
pub struct Dispatcher {
    active_rx: watch::Receiver<Option<ProviderConfig>>,
    factory: TranslatorFactory,
    in_flight: Mutex<HashMap<String, (u64, CancellationToken)>>,
    call_seq: AtomicU64,
}

impl Dispatcher {
    /// Create a dispatcher subscribed to the given change notifications
    pub fn new(active_rx: watch::Receiver<Option<ProviderConfig>>) -> Self {
        Self::with_factory(active_rx, Box::new(|config| build_translator(config)))
    }

    /// Create a dispatcher with a custom translator factory
    pub fn with_factory(
        active_rx: watch::Receiver<Option<ProviderConfig>>,
        factory: TranslatorFactory,
    ) -> Self {
        Self {
            active_rx,
            factory,
            in_flight: Mutex::new(HashMap::new()),
            call_seq: AtomicU64::new(0),
        }
    }

    /// A cloned snapshot of the active provider configuration, if any
    pub fn active_provider(&self) -> Option<ProviderConfig> {
        self.active_rx.borrow().clone()
    }

    /// Cancel the in-flight call on a surface, if any
    pub fn cancel_surface(&self, surface: &str) {
        if let Some((_, token)) = self.in_flight.lock().remove(surface) {
            token.cancel();
        }
    }

    /// Register a new call on a surface, cancelling the previous one
    fn begin_call(&self, surface: &str) -> (u64, CancellationToken) {
        let seq = self.call_seq.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();
        if let Some((_, previous)) = self
            .in_flight
            .lock()
            .insert(surface.to_string(), (seq, token.clone()))
        {
            previous.cancel();
        }
        (seq, token)
    }

    /// Forget a finished call unless a newer one took over the surface
    fn finish_call(&self, surface: &str, seq: u64) {
        let mut in_flight = self.in_flight.lock();
        if in_flight.get(surface).map(|(s, _)| *s) == Some(seq) {
            in_flight.remove(surface);
        }
    }

    /// Translate on the given surface, normalizing every outcome
    ///
    /// Streaming providers are drained to completion here; use
    /// `translate_streaming` to observe chunks as they arrive.
    pub async fn translate(
        &self,
        surface: &str,
        request: &TranslationRequest,
    ) -> TranslationResult {
        self.translate_streaming(surface, request, &|_| {}).await
    }

    /// Translate with incremental delivery on the given surface
    ///
    /// Single-shot providers invoke `on_chunk` once with the complete text.
    /// The returned result carries the full concatenated text on success;
    /// a cancelled call yields `Reset`, never `Fail`.
    pub async fn translate_streaming(
        &self,
        surface: &str,
        request: &TranslationRequest,
        on_chunk: ChunkHandler<'_>,
    ) -> TranslationResult {
        let Some(config) = self.active_provider() else {
            return TranslationResult::Fail("No translation service is enabled".to_string());
        };

        let (seq, token) = self.begin_call(surface);
        let translator = (self.factory)(&config);
        let result = self
            .run_call(translator.as_ref(), request, on_chunk, &token)
            .await;
        self.finish_call(surface, seq);

        match result {
            Ok(result) => result,
            Err(ProviderError::Cancelled) => {
                debug!("Call on surface {} cancelled", surface);
                TranslationResult::Reset
            }
            Err(e) => {
                warn!("Provider {} failed: {}", config.name(), e);
                TranslationResult::Fail(format!("[{}] {}", config.name(), e))
            }
        }
    }

    async fn run_call(
        &self,
        translator: &dyn Translator,
        request: &TranslationRequest,
        on_chunk: ChunkHandler<'_>,
        token: &CancellationToken,
    ) -> Result<TranslationResult, ProviderError> {
        if translator.kind().is_streaming() {
            let collected = Mutex::new(String::new());
            let deliver = |chunk: String| {
                collected.lock().push_str(&chunk);
                on_chunk(chunk);
            };
            translator
                .translate_streaming(request, &deliver, token)
                .await?;
            let text = collected.into_inner();
            if text.trim().is_empty() {
                return Err(ProviderError::Parse(
                    "empty response from service".to_string(),
                ));
            }
            Ok(TranslationResult::Success(text))
        } else {
            let result = translator.translate(request, token).await?;
            if let Some(text) = result.text() {
                on_chunk(text.to_string());
            }
            Ok(result)
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("active", &self.active_rx.borrow().as_ref().map(|p| p.id()))
            .finish()
    }
}
