//! Per-contact mutual exclusion

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::model::ContactId;

/// One lock slot per contact id, alive only while someone holds or waits on it.
///
/// The guarded data is `()`, so a poisoned slot carries no broken state and
/// is simply reacquired.
#[derive(Debug, Default)]
pub(crate) struct ContactLocks {
    slots: Mutex<HashMap<ContactId, Arc<Mutex<()>>>>,
}

impl ContactLocks {
    fn slot(&self, id: ContactId) -> Arc<Mutex<()>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(id).or_default())
    }

    /// Run `f` while holding the lock for `id`.
    pub(crate) fn with<R>(&self, id: ContactId, f: impl FnOnce() -> R) -> R {
        let slot = self.slot(id);
        let result = {
            let _guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };
        self.release(id, &slot);
        result
    }

    /// Drop the slot for `id` when the table and `slot` are its only holders.
    fn release(&self, id: ContactId, slot: &Arc<Mutex<()>>) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        // New holders clone from the table under this lock, so the count is stable here
        if Arc::strong_count(slot) == 2 {
            slots.remove(&id);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_same_id_is_serialized() {
        let locks = Arc::new(ContactLocks::default());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let locks = Arc::clone(&locks);
                let inside = Arc::clone(&inside);
                let max_seen = Arc::clone(&max_seen);
                thread::spawn(move || {
                    locks.with(ContactId(1), || {
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_seen.fetch_max(now, Ordering::SeqCst);
                        thread::yield_now();
                        inside.fetch_sub(1, Ordering::SeqCst);
                    });
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_released_slots_are_dropped() {
        let locks = ContactLocks::default();
        for i in 0..100u64 {
            locks.with(ContactId(i), || ());
        }
        assert_eq!(locks.len(), 0);

        // A nested holder keeps the slot until the outer call returns
        locks.with(ContactId(1), || {
            locks.with(ContactId(2), || ());
            assert_eq!(locks.len(), 1);
        });
        assert_eq!(locks.len(), 0);
    }

    #[test]
    fn test_different_ids_do_not_block() {
        let locks = ContactLocks::default();
        let value = locks.with(ContactId(1), || locks.with(ContactId(2), || 7));
        assert_eq!(value, 7);
    }
}
