use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::models::FinalReport;

/// Process-lifetime cache of completed reports, keyed by transcript
/// fingerprint.
///
/// Shared across concurrent requests; stores to the same key are
/// last-write-wins. Reports are only stored after the full pipeline
/// succeeds, so an entry is never partial. No expiry and no eviction -
/// callers may `clear` explicitly. A disabled cache always misses and
/// ignores stores.
pub struct ReportCache {
    enabled: bool,
    entries: RwLock<HashMap<String, FinalReport>>,
}

/// Cache statistics snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub enabled: bool,
    pub size: usize,
    pub keys: Vec<String>,
}

impl ReportCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 128-bit hex fingerprint of the normalized transcript text. A cache
    /// key, not a security boundary.
    pub fn fingerprint(text: &str) -> String {
        let digest = Sha256::digest(text.as_bytes());
        digest[..16].iter().map(|b| format!("{b:02x}")).collect()
    }

    pub fn lookup(&self, fingerprint: &str) -> Option<FinalReport> {
        if !self.enabled {
            return None;
        }
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(fingerprint)
            .cloned()
    }

    pub fn store(&self, fingerprint: &str, report: &FinalReport) {
        if !self.enabled {
            return;
        }
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(fingerprint.to_string(), report.clone());
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn stats(&self) -> CacheStats {
        if !self.enabled {
            return CacheStats {
                enabled: false,
                size: 0,
                keys: vec![],
            };
        }
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        CacheStats {
            enabled: true,
            size: entries.len(),
            keys,
        }
    }
}
