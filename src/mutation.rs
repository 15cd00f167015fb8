//! Mutation dispatcher: satu request per aksi, invalidasi cache setelah sukses.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Mutex;

use crate::errors::{AppError, AppResult};
use crate::query::QueryCache;
use crate::{log_info, log_warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
    /// PATCH status / stok
    Patch,
}

impl MutationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
            MutationKind::Patch => "patch",
        }
    }
}

/// Aksi yang dikunci selama request berjalan, mis. `vouchers:update:7`.
pub fn action_key(namespace: &str, kind: MutationKind, id: Option<i64>) -> String {
    match id {
        Some(id) => format!("{}:{}:{}", namespace, kind.as_str(), id),
        None => format!("{}:{}", namespace, kind.as_str()),
    }
}

pub struct MutationDispatcher {
    in_flight: Mutex<HashSet<String>>,
}

/// Melepas kunci aksi ketika request selesai (sukses, gagal, atau dibatalkan).
struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<String>>,
    action: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut set) = self.set.lock() {
            set.remove(&self.action);
        }
    }
}

impl Default for MutationDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MutationDispatcher {
    pub fn new() -> Self {
        Self {
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn is_pending(&self, action: &str) -> bool {
        self.in_flight
            .lock()
            .map(|set| set.contains(action))
            .unwrap_or(false)
    }

    fn acquire(&self, action: &str) -> AppResult<InFlightGuard<'_>> {
        let mut set = self
            .in_flight
            .lock()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        if !set.insert(action.to_string()) {
            return Err(AppError::Busy(action.to_string()));
        }
        Ok(InFlightGuard {
            set: &self.in_flight,
            action: action.to_string(),
        })
    }

    /// Jalankan mutasi. Sukses: semua entry cache di `namespaces` dibuang.
    /// Gagal: cache tidak disentuh dan error diteruskan apa adanya.
    pub async fn run<T, F>(
        &self,
        cache: &QueryCache,
        action: &str,
        namespaces: &[&str],
        request: F,
    ) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        let _guard = self.acquire(action)?;

        match request.await {
            Ok(value) => {
                for namespace in namespaces {
                    cache.invalidate_namespace(namespace);
                }
                log_info!("MUTATION", "mutasi berhasil", serde_json::json!({
                    "action": action,
                    "invalidated": namespaces
                }));
                Ok(value)
            }
            Err(err) => {
                let err = err.into_mutation_error();
                log_warn!("MUTATION", "mutasi gagal", serde_json::json!({
                    "action": action,
                    "error": err.to_string()
                }));
                Err(err)
            }
        }
    }
}
