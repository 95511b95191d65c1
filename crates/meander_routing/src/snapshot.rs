use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::meander::Meander;

/// The engine currently serving requests.
///
/// Readers clone the inner `Arc` and keep routing against it while a reload
/// swaps in a new engine; the lock is only held for the clone or the swap.
pub struct MeanderSnapshot {
    current: RwLock<Arc<Meander>>,
}

impl MeanderSnapshot {
    pub fn new(meander: Meander) -> Self {
        MeanderSnapshot {
            current: RwLock::new(Arc::new(meander)),
        }
    }

    pub fn load(&self) -> Arc<Meander> {
        Arc::clone(&self.current.read())
    }

    /// Replaces the engine, returning the previous one.
    pub fn swap(&self, meander: Meander) -> Arc<Meander> {
        let next = Arc::new(meander);
        let previous = std::mem::replace(&mut *self.current.write(), next);

        info!(
            "Swapped engine snapshot, {} edges now loaded",
            self.current.read().graph().edges().len()
        );

        previous
    }
}
