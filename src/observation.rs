//! Reporting of property reads and writes.
//!
//! Every generated getter reports an access to the [`registrar`], and every generated setter
//! wraps its write in [`ObservationRegistrar::with_mutation`]. Observers subscribed to the
//! registrar are told about both, and [`track`] can be used to collect the properties a closure
//! reads.

use std::{
    cell::RefCell,
    collections::BTreeSet,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use parking_lot::{RwLock, const_rwlock};

static REGISTRAR: ObservationRegistrar = ObservationRegistrar::new();

/// Registrar which every generated accessor reports to.
pub fn registrar() -> &'static ObservationRegistrar {
    &REGISTRAR
}

/// Receives notifications from an [`ObservationRegistrar`]. Every method defaults to doing
/// nothing.
pub trait Observer: Send + Sync {
    /// `property` was read.
    fn accessed(&self, _property: &'static str) {}

    /// `property` is about to be written.
    fn will_set(&self, _property: &'static str) {}

    /// `property` has been written.
    fn did_set(&self, _property: &'static str) {}
}

/// Handle for a subscribed observer, used to unsubscribe it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

/// Fans property reads and writes out to subscribed observers.
pub struct ObservationRegistrar {
    observers: RwLock<Vec<(ObserverId, Arc<dyn Observer>)>>,
    next_id: AtomicU64,
}

impl ObservationRegistrar {
    pub const fn new() -> Self {
        Self {
            observers: const_rwlock(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self, observer: Arc<dyn Observer>) -> ObserverId {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers.write().push((id, observer));

        tracing::debug!(?id, "observer subscribed");
        id
    }

    /// Remove a previously subscribed observer. Produces `false` if it was not subscribed.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|(observer_id, _)| *observer_id != id);

        let removed = observers.len() != before;
        tracing::debug!(?id, removed, "observer unsubscribed");
        removed
    }

    /// Report a read of `property`.
    pub fn access(&self, property: &'static str) {
        TRACKED.with_borrow_mut(|tracked| {
            if let Some(tracked) = tracked {
                tracked.insert(property);
            }
        });

        tracing::trace!(property, "access");
        for observer in self.snapshot() {
            observer.accessed(property);
        }
    }

    /// Run `mutation` as a write of `property`. Observers are told before and after it runs,
    /// and its result is passed through.
    pub fn with_mutation<R>(&self, property: &'static str, mutation: impl FnOnce() -> R) -> R {
        // Observers subscribed part way through a mutation only see the next one.
        let observers = self.snapshot();

        tracing::trace!(property, "mutation");
        for observer in &observers {
            observer.will_set(property);
        }

        let result = mutation();

        for observer in &observers {
            observer.did_set(property);
        }

        result
    }

    /// Observers are cloned out so none of them run while the lock is held.
    fn snapshot(&self) -> Vec<Arc<dyn Observer>> {
        self.observers
            .read()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect()
    }
}

impl Default for ObservationRegistrar {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static TRACKED: RefCell<Option<BTreeSet<&'static str>>> = const { RefCell::new(None) };
}

/// Run `f`, collecting the name of every property read on this thread while it runs.
///
/// Calls may be nested, in which case the outer call also sees everything the inner one read.
pub fn track<R>(f: impl FnOnce() -> R) -> (R, BTreeSet<&'static str>) {
    struct Restore(Option<Option<BTreeSet<&'static str>>>);

    impl Drop for Restore {
        fn drop(&mut self) {
            if let Some(previous) = self.0.take() {
                TRACKED.set(previous);
            }
        }
    }

    let mut restore = Restore(Some(TRACKED.replace(Some(BTreeSet::new()))));

    let result = f();

    let accessed = TRACKED.take().unwrap_or_default();
    let mut outer = restore.0.take().flatten();
    if let Some(outer) = &mut outer {
        outer.extend(accessed.iter().copied());
    }
    TRACKED.set(outer);

    (result, accessed)
}
