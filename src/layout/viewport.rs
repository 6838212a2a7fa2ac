//! Viewport width and resize listeners.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Listener = Arc<dyn Fn(u32) + Send + Sync>;

#[derive(Default)]
struct Registry {
    width: u32,
    next_id: u64,
    listeners: BTreeMap<u64, Listener>,
}

/// Shared handle to the viewport: its width in logical units and the
/// listeners notified when it changes.
///
/// Clones refer to the same viewport.
#[derive(Clone, Default)]
pub struct Viewport {
    inner: Arc<Mutex<Registry>>,
}

impl Viewport {
    /// Create a viewport with an initial width.
    pub fn new(width: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry {
                width,
                ..Default::default()
            })),
        }
    }

    /// Current width in logical units.
    pub fn width(&self) -> u32 {
        self.registry().width
    }

    /// Record a new width and notify every registered listener.
    pub fn resize(&self, width: u32) {
        // Listeners run outside the lock so they may register or drop guards.
        let listeners: Vec<Listener> = {
            let mut registry = self.registry();
            registry.width = width;
            registry.listeners.values().cloned().collect()
        };
        for listener in listeners {
            listener(width);
        }
    }

    /// Register a resize listener. It stays registered until the returned
    /// guard is dropped.
    pub fn on_resize<F>(&self, listener: F) -> ResizeListener
    where
        F: Fn(u32) + Send + Sync + 'static,
    {
        let mut registry = self.registry();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.insert(id, Arc::new(listener));
        log::debug!("Registered resize listener {}", id);

        ResizeListener {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Number of listeners currently registered.
    pub fn listener_count(&self) -> usize {
        self.registry().listeners.len()
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry();
        f.debug_struct("Viewport")
            .field("width", &registry.width)
            .field("listeners", &registry.listeners.len())
            .finish()
    }
}

/// Registration guard for a resize listener; dropping it deregisters.
#[derive(Debug)]
pub struct ResizeListener {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .listeners
                .remove(&self.id);
            log::debug!("Deregistered resize listener {}", self.id);
        }
    }
}
