//! Thread-safe handle to a single registry

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::registry::SkillRegistry;

/// Cloneable handle sharing one [`SkillRegistry`] between threads.
///
/// A single reader/writer lock covers the whole registry, so compound
/// operations such as `apply_progress` or a cascading `delete` never
/// interleave with each other.
///
/// # Example
///
/// ```
/// use skilltree::{SharedRegistry, SkillDraft};
///
/// let shared = SharedRegistry::new();
/// let id = shared.write(|r| r.create(SkillDraft::new("Go"))).unwrap().id;
///
/// let handle = shared.clone();
/// std::thread::spawn(move || {
///     handle.write(|r| r.delete(id)).unwrap();
/// })
/// .join()
/// .unwrap();
///
/// assert!(shared.read(|r| r.is_empty()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<SkillRegistry>>,
}

impl SharedRegistry {
    /// Wrap a fresh registry with default policies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a fresh registry with the given policies.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self::from_registry(SkillRegistry::with_config(config))
    }

    /// Wrap an existing registry.
    pub fn from_registry(registry: SkillRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Run `f` with shared read access.
    pub fn read<T>(&self, f: impl FnOnce(&SkillRegistry) -> T) -> T {
        // Poisoning is ignored: registry operations validate before mutating
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run `f` with exclusive write access.
    pub fn write<T>(&self, f: impl FnOnce(&mut SkillRegistry) -> T) -> T {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Run `f` with exclusive access, but only if nothing has changed since
    /// the caller observed `expected_revision`.
    ///
    /// # Errors
    ///
    /// `StaleRevision` if the registry has moved on, otherwise whatever `f`
    /// returns.
    pub fn write_at<T>(
        &self,
        expected_revision: u64,
        f: impl FnOnce(&mut SkillRegistry) -> Result<T>,
    ) -> Result<T> {
        self.write(|registry| {
            let actual = registry.revision();
            if actual != expected_revision {
                debug!(expected = expected_revision, actual, "rejected stale write");
                return Err(RegistryError::StaleRevision {
                    expected: expected_revision,
                    actual,
                });
            }
            f(registry)
        })
    }

    /// Current revision of the shared registry.
    pub fn revision(&self) -> u64 {
        self.read(SkillRegistry::revision)
    }
}
