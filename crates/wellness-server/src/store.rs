/// Per-session dashboard persistence.
///
/// Key schema (Redis backend):
/// - `wellness:v1:dashboard:{session_id}` — JSON DashboardState (TTL from config)
///
/// Without a configured Redis client, state lives in an in-process map. Entries
/// older than the TTL read as missing and are pruned on the next write.
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::config::DEFAULT_SESSION_TTL_SECS;
use crate::redis_client::RedisClient;
use wellness_core::DashboardState;

const KEY_PREFIX: &str = "wellness:v1:dashboard:";

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone)]
struct MemoryEntry {
    state: DashboardState,
    stored_at: Instant,
}

#[derive(Clone)]
enum Backend {
    /// Updates are serialized per process; GET and SETEX are separate round trips.
    Redis {
        client: RedisClient,
        update_lock: Arc<Mutex<()>>,
    },
    Memory(Arc<RwLock<HashMap<String, MemoryEntry>>>),
}

#[derive(Clone)]
pub struct DashboardStore {
    backend: Backend,
    ttl: Duration,
}

impl DashboardStore {
    pub fn new(redis: RedisClient, ttl_secs: u64) -> Self {
        let backend = if redis.is_configured() {
            Backend::Redis {
                client: redis,
                update_lock: Arc::default(),
            }
        } else {
            Backend::Memory(Arc::default())
        };
        Self {
            backend,
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(RedisClient::new(None), DEFAULT_SESSION_TTL_SECS)
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Redis { .. } => "redis",
            Backend::Memory(_) => "memory",
        }
    }

    /// Stored state, or `None` for unknown (or expired) sessions.
    pub async fn load(&self, session_id: &str) -> Option<DashboardState> {
        match &self.backend {
            Backend::Redis { client, .. } => {
                let key = dashboard_key(session_id);
                let json = client.get(&key).await?;
                serde_json::from_str(&json)
                    .inspect_err(|e| warn!(error = %e, key, "stored dashboard state is corrupt"))
                    .ok()
            }
            Backend::Memory(map) => map
                .read()
                .await
                .get(session_id)
                .filter(|entry| entry.stored_at.elapsed() < self.ttl)
                .map(|entry| entry.state.clone()),
        }
    }

    pub async fn save(&self, session_id: &str, state: &DashboardState) -> bool {
        match &self.backend {
            Backend::Redis { client, .. } => self.save_redis(client, session_id, state).await,
            Backend::Memory(map) => {
                let mut map = map.write().await;
                self.insert_memory(&mut map, session_id, state.clone());
                true
            }
        }
    }

    /// Load, transform and store a session's state as one step with respect to
    /// other updates through this store. Unknown sessions start from the default
    /// state. Returns the stored state, or `None` if persisting failed.
    pub async fn update<F>(&self, session_id: &str, f: F) -> Option<DashboardState>
    where
        F: FnOnce(DashboardState) -> DashboardState,
    {
        match &self.backend {
            Backend::Redis {
                client,
                update_lock,
            } => {
                let _guard = update_lock.lock().await;
                let state = f(self.load(session_id).await.unwrap_or_default());
                self.save_redis(client, session_id, &state)
                    .await
                    .then_some(state)
            }
            Backend::Memory(map) => {
                let mut map = map.write().await;
                let current = map
                    .get(session_id)
                    .filter(|entry| entry.stored_at.elapsed() < self.ttl)
                    .map(|entry| entry.state.clone())
                    .unwrap_or_default();
                let state = f(current);
                self.insert_memory(&mut map, session_id, state.clone());
                Some(state)
            }
        }
    }

    /// Returns `true` if a live session was removed.
    pub async fn remove(&self, session_id: &str) -> bool {
        match &self.backend {
            Backend::Redis { client, .. } => client.delete(&dashboard_key(session_id)).await,
            Backend::Memory(map) => map
                .write()
                .await
                .remove(session_id)
                .is_some_and(|entry| entry.stored_at.elapsed() < self.ttl),
        }
    }

    /// Registers an empty dashboard under a fresh session id.
    pub async fn start(&self) -> String {
        let id = new_session_id();
        if !self.save(&id, &DashboardState::default()).await {
            warn!(session_id = %id, "failed to persist new session, it will read as empty");
        }
        id
    }

    async fn save_redis(&self, client: &RedisClient, session_id: &str, state: &DashboardState) -> bool {
        let Ok(json) = serde_json::to_string(state)
            .inspect_err(|e| warn!(error = %e, "failed to serialize dashboard state"))
        else {
            return false;
        };
        client
            .set_with_ttl(&dashboard_key(session_id), &json, self.ttl.as_secs())
            .await
    }

    fn insert_memory(
        &self,
        map: &mut HashMap<String, MemoryEntry>,
        session_id: &str,
        state: DashboardState,
    ) {
        let before = map.len();
        map.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        let pruned = before - map.len();
        if pruned > 0 {
            debug!(pruned, "expired sessions pruned");
        }
        map.insert(
            session_id.to_string(),
            MemoryEntry {
                state,
                stored_at: Instant::now(),
            },
        );
    }
}

fn dashboard_key(session_id: &str) -> String {
    format!("{KEY_PREFIX}{session_id}")
}

pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| Duration::from_secs(0))
        .as_millis() as u64
}

fn new_session_id() -> String {
    let counter = SESSION_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut h = Sha256::new();
    h.update(unix_millis().to_le_bytes());
    h.update(std::process::id().to_le_bytes());
    h.update(counter.to_le_bytes());
    let digest = h.finalize();
    format!("{:x}", digest)[..32].to_string()
}
