//! # Request Dispatch Layer
//!
//! The core of the client. Every logical request flows through
//! [`RequestDispatcher::request_with`], which decides, in order:
//!
//! 1. an explicitly pinned key must be structurally valid — otherwise the call
//!    fails before any network activity;
//! 2. a live cache entry answers immediately (unless the caller bypasses the
//!    read — a bypass never skips the cache *write*);
//! 3. an identical in-flight request absorbs this caller: it waits for the
//!    single outstanding attempt and shares its outcome, success or failure;
//! 4. otherwise a key is chosen (pinned, none, or next in rotation), the
//!    request is registered in the in-flight table, and the transport attempt
//!    runs on its own task so it settles for every waiter even if the caller
//!    that started it stops listening.
//!
//! Rate-limited attempts sleep for the server-directed delay plus a fixed
//! margin and retry with the same key; the in-flight entry spans the whole
//! retry chain, so callers arriving mid-backoff still join the same outcome.
//! The entry is removed the moment the chain settles, before the result is
//! delivered.

mod cache;
mod classify;
mod key;

use crate::core::config::ClientConfig;
use crate::core::error::{ClientError, ClientResult};
use crate::core::types::ResponseEnvelope;
use crate::credentials::{self, KeyPool};
use crate::transport::{HttpTransport, Transport};
use cache::ResponseCache;
use classify::{classify, Disposition};
use key::request_key;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// How a single request selects its API key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KeySelection {
    /// Use the next key from the rotating pool
    #[default]
    Rotate,

    /// Use exactly this key and skip rotation.
    ///
    /// The key must match the structural format; it still never becomes part
    /// of the request's cache/dedup identity.
    Pinned(String),

    /// Send no API key header at all (public resource endpoints)
    Anonymous,
}

type Settled = ClientResult<ResponseEnvelope>;

struct DispatcherInner {
    config: ClientConfig,
    pool: KeyPool,
    transport: Arc<dyn Transport>,
    cache: ResponseCache,
    in_flight: Mutex<HashMap<String, broadcast::Sender<Settled>>>,
}

/// The dispatch/cache/dedup layer.
///
/// Cheap to clone; all clones share one cache, one in-flight table, and one
/// rotation cursor.
#[derive(Clone)]
pub struct RequestDispatcher {
    inner: Arc<DispatcherInner>,
}

impl RequestDispatcher {
    /// Build a dispatcher with the production HTTP transport.
    pub fn new(keys: Vec<String>, config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let transport = Arc::new(HttpTransport::new(&config)?);
        Self::with_transport(keys, config, transport)
    }

    /// Build a dispatcher over a custom transport (test doubles, middleware).
    pub fn with_transport(
        keys: Vec<String>,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> ClientResult<Self> {
        config.validate()?;
        let pool = KeyPool::new(keys)?;
        let cache = ResponseCache::new(config.cache_ttl);

        Ok(Self {
            inner: Arc::new(DispatcherInner {
                config,
                pool,
                transport,
                cache,
                in_flight: Mutex::new(HashMap::new()),
            }),
        })
    }

    /// The configuration this dispatcher was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Dispatch a request with rotation and the cache enabled.
    pub async fn request(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> ClientResult<ResponseEnvelope> {
        self.request_with(path, params, KeySelection::Rotate, false)
            .await
    }

    /// Dispatch a request that skips the cache read (the response is still
    /// written back on success).
    pub async fn request_uncached(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> ClientResult<ResponseEnvelope> {
        self.request_with(path, params, KeySelection::Rotate, true)
            .await
    }

    /// Dispatch a request with full control over key selection and cache
    /// bypass.
    pub async fn request_with(
        &self,
        path: &str,
        params: &[(&str, &str)],
        key: KeySelection,
        bypass_cache: bool,
    ) -> ClientResult<ResponseEnvelope> {
        let inner = &self.inner;

        if let KeySelection::Pinned(pinned) = &key {
            if !inner.pool.is_valid(pinned) {
                return Err(ClientError::InvalidKeyFormat {
                    key: pinned.clone(),
                });
            }
        }

        let query: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let request_key = request_key(&inner.config.base_url, path, &query);

        if !bypass_cache {
            if let Some(envelope) = inner.cache.get(&request_key) {
                debug!(path, "Cache hit");
                return Ok(envelope);
            }
        }

        let mut receiver = {
            let mut table = inner.in_flight.lock();

            if let Some(sender) = table.get(&request_key) {
                debug!(path, "Joining in-flight request");
                sender.subscribe()
            } else {
                let (sender, receiver) = broadcast::channel(1);
                table.insert(request_key.clone(), sender);

                let api_key = match key {
                    KeySelection::Pinned(pinned) => Some(pinned),
                    KeySelection::Anonymous => None,
                    KeySelection::Rotate => Some(inner.pool.rotate().to_string()),
                };

                debug!(path, anonymous = api_key.is_none(), "Dispatching request");

                let inner = Arc::clone(inner);
                let path = path.to_string();
                tokio::spawn(async move {
                    execute(inner, request_key, path, query, api_key).await;
                });

                receiver
            }
        };

        match receiver.recv().await {
            Ok(settled) => settled,
            Err(_) => Err(ClientError::transport(
                "In-flight request was dropped before settling",
            )),
        }
    }
}

impl std::fmt::Debug for RequestDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestDispatcher")
            .field("base_url", &self.inner.config.base_url)
            .field("pool", &self.inner.pool)
            .finish()
    }
}

/// Run one logical request to completion and fan the outcome out to every
/// waiter. Runs on its own task: the attempt settles even when the caller that
/// spawned it stops awaiting.
async fn execute(
    inner: Arc<DispatcherInner>,
    request_key: String,
    path: String,
    query: Vec<(String, String)>,
    api_key: Option<String>,
) {
    let result = attempt(&inner, &path, &query, api_key.as_deref()).await;

    // The entry leaves the table before anyone sees the outcome; a caller
    // arriving from here on starts a fresh request.
    let sender = inner.in_flight.lock().remove(&request_key);

    if let Ok(envelope) = &result {
        inner
            .cache
            .insert(&request_key, envelope.data.clone(), envelope.status);
    }

    if let Some(sender) = sender {
        // No receivers left is fine: every waiter stopped listening.
        let _ = sender.send(result);
    }
}

/// The transport attempt loop: classify each response, retrying rate limits
/// with the same key after the advertised delay.
async fn attempt(
    inner: &DispatcherInner,
    path: &str,
    query: &[(String, String)],
    api_key: Option<&str>,
) -> Settled {
    loop {
        let response = inner
            .transport
            .fetch(&inner.config.base_url, path, query, api_key)
            .await?;

        match classify(&response) {
            Disposition::Success => {
                return Ok(ResponseEnvelope {
                    data: response.body,
                    status: response.status,
                    cached_at: None,
                });
            }

            Disposition::InvalidKey => return Err(ClientError::InvalidKey),

            Disposition::RateLimited { retry_after } => {
                let delay = retry_after.unwrap_or(inner.config.retry_after_fallback)
                    + inner.config.retry_safety_margin;
                warn!(
                    path,
                    delay_ms = delay.as_millis() as u64,
                    "Rate limited; backing off before retry"
                );
                tokio::time::sleep(delay).await;
                // Retry with the same key: no re-rotation, no cache re-check.
            }

            Disposition::Upstream { cause } => {
                let masked = api_key
                    .map(credentials::mask)
                    .unwrap_or_else(|| "<no key>".to_string());
                return Err(ClientError::Upstream {
                    key: masked,
                    cause: cause.unwrap_or_else(|| "Unknown error".to_string()),
                });
            }
        }
    }
}
