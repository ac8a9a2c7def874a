//! Hazard-slot reclamation for published cell versions.
//!
//! A reader announces the version it is about to examine in a hazard slot,
//! then re-reads the source pointer; only if the source still points at the
//! announced version is it safe to dereference. Writers hand replaced
//! versions to [`HazardDomain::retire`]; [`HazardDomain::scan`] frees every
//! retired version no slot currently announces and requeues the rest.
//!
//! ```text
//! HazardDomain<T>
//! ├── head → HazardRecord → HazardRecord → …   (append-only, freed on drop)
//! └── retired: crossbeam MPMC queue of *mut T   (freed by scan or on drop)
//! ```

#![allow(unsafe_code)]

use std::marker::PhantomData;
use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicPtr, AtomicUsize, Ordering};

use crossbeam_channel::{unbounded, Receiver, Sender};

/// One hazard slot, padded so neighbouring slots never share a cache line.
#[repr(align(128))]
struct HazardRecord {
    /// Owned by a live guard.
    active: AtomicBool,
    /// Version the owner is examining, or null.
    protected: AtomicPtr<()>,
    /// Set before the record is linked and never changed afterwards.
    next: *mut HazardRecord,
}

/// A replaced version awaiting reclamation.
struct Retired<T>(*mut T);

// SAFETY: a retired pointer is owned by the queue alone; whichever thread
// receives it either frees it or sends it back. `T: Send` makes the final
// drop on another thread sound.
unsafe impl<T: Send> Send for Retired<T> {}

/// Result of one [`HazardDomain::scan`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ScanOutcome {
    pub(crate) reclaimed: usize,
    pub(crate) deferred: usize,
}

/// Hazard slots and retired versions for one cell.
pub(crate) struct HazardDomain<T> {
    head: AtomicPtr<HazardRecord>,
    slots: AtomicUsize,
    pending: AtomicUsize,
    retired_tx: Sender<Retired<T>>,
    retired_rx: Receiver<Retired<T>>,
}

impl<T> HazardDomain<T> {
    /// A domain with `initial_slots` idle slots registered.
    pub(crate) fn new(initial_slots: usize) -> Self {
        let (retired_tx, retired_rx) = unbounded();
        let domain = Self {
            head: AtomicPtr::new(ptr::null_mut()),
            slots: AtomicUsize::new(0),
            pending: AtomicUsize::new(0),
            retired_tx,
            retired_rx,
        };
        for _ in 0..initial_slots {
            domain.register(false);
        }
        domain
    }

    /// Claim an idle slot, registering a new one if all are taken.
    pub(crate) fn acquire(&self) -> HazardGuard<'_, T> {
        let record = self
            .records()
            .find(|r| {
                !r.active.load(Ordering::Relaxed)
                    && r.active
                        .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
                        .is_ok()
            })
            .unwrap_or_else(|| self.register(true));
        HazardGuard {
            record,
            _marker: PhantomData,
        }
    }

    /// Queue `ptr` for reclamation and return the number now pending.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `Box::into_raw`, must no longer be reachable
    /// through the source readers protect from, and must not be retired
    /// twice.
    pub(crate) unsafe fn retire(&self, ptr: *mut T) -> usize {
        // The receiver lives in `self`, so the queue is never disconnected.
        let _ = self.retired_tx.send(Retired(ptr));
        self.pending.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Free every retired version no slot protects.
    pub(crate) fn scan(&self) -> ScanOutcome {
        // Drain before reading the slots: every drained version was already
        // unlinked, so any reader still holding it announced it before now.
        let batch: Vec<Retired<T>> = self.retired_rx.try_iter().collect();
        let protected: Vec<*mut ()> = self
            .records()
            .map(|r| r.protected.load(Ordering::SeqCst))
            .filter(|p| !p.is_null())
            .collect();

        let mut outcome = ScanOutcome::default();
        for retired in batch {
            if protected.contains(&(retired.0 as *mut ())) {
                outcome.deferred += 1;
                let _ = self.retired_tx.send(retired);
            } else {
                // SAFETY: the pointer was unreachable when retired and no
                // slot announced it after that, so no reader holds it.
                drop(unsafe { Box::from_raw(retired.0) });
                outcome.reclaimed += 1;
            }
        }
        self.pending.fetch_sub(outcome.reclaimed, Ordering::Relaxed);
        outcome
    }

    /// Registered slots.
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.load(Ordering::Relaxed)
    }

    /// Retired versions not yet freed.
    pub(crate) fn pending(&self) -> usize {
        self.pending.load(Ordering::Relaxed)
    }

    fn register(&self, active: bool) -> &HazardRecord {
        let record = Box::into_raw(Box::new(HazardRecord {
            active: AtomicBool::new(active),
            protected: AtomicPtr::new(ptr::null_mut()),
            next: ptr::null_mut(),
        }));
        let mut head = self.head.load(Ordering::Acquire);
        loop {
            // SAFETY: `record` is not yet linked, so this thread owns it.
            unsafe { (*record).next = head };
            match self
                .head
                .compare_exchange_weak(head, record, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => break,
                Err(actual) => head = actual,
            }
        }
        self.slots.fetch_add(1, Ordering::Relaxed);
        // SAFETY: records are only freed when the domain drops.
        unsafe { &*record }
    }

    fn records(&self) -> Records<'_> {
        Records {
            next: self.head.load(Ordering::Acquire),
            _domain: PhantomData,
        }
    }
}

impl<T> Drop for HazardDomain<T> {
    fn drop(&mut self) {
        for retired in self.retired_rx.try_iter() {
            // SAFETY: exclusive access; no guard can outlive the domain.
            drop(unsafe { Box::from_raw(retired.0) });
        }
        let mut cur = *self.head.get_mut();
        while !cur.is_null() {
            // SAFETY: every record was leaked from a Box in `register` and
            // is freed exactly once here.
            let record = unsafe { Box::from_raw(cur) };
            cur = record.next;
        }
    }
}

/// Iterator over the slot list.
struct Records<'a> {
    next: *mut HazardRecord,
    _domain: PhantomData<&'a HazardRecord>,
}

impl<'a> Iterator for Records<'a> {
    type Item = &'a HazardRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_null() {
            return None;
        }
        // SAFETY: linked records stay allocated for the domain's lifetime,
        // which `'a` borrows.
        let record = unsafe { &*self.next };
        self.next = record.next;
        Some(record)
    }
}

/// An owned hazard slot. Releases the slot on drop.
pub(crate) struct HazardGuard<'a, T> {
    record: &'a HazardRecord,
    _marker: PhantomData<fn() -> T>,
}

impl<T> HazardGuard<'_, T> {
    /// Announce and validate the version `src` currently points at.
    ///
    /// The returned pointer cannot be reclaimed until the guard protects
    /// something else, is cleared, or drops.
    pub(crate) fn protect(&self, src: &AtomicPtr<T>) -> *mut T {
        let mut ptr = src.load(Ordering::SeqCst);
        loop {
            self.record.protected.store(ptr as *mut (), Ordering::SeqCst);
            let again = src.load(Ordering::SeqCst);
            if again == ptr {
                return ptr;
            }
            ptr = again;
        }
    }

    /// Drop the current announcement.
    pub(crate) fn clear(&self) {
        self.record.protected.store(ptr::null_mut(), Ordering::SeqCst);
    }
}

impl<T> Drop for HazardGuard<'_, T> {
    fn drop(&mut self) {
        self.clear();
        self.record.active.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn boxed(v: u64) -> *mut u64 {
        Box::into_raw(Box::new(v))
    }

    #[test]
    fn slots_are_reused_after_release() {
        let domain: HazardDomain<u64> = HazardDomain::new(1);
        assert_eq!(domain.slot_count(), 1);
        drop(domain.acquire());
        drop(domain.acquire());
        assert_eq!(domain.slot_count(), 1);
    }

    #[test]
    fn slots_grow_when_all_are_held() {
        let domain: HazardDomain<u64> = HazardDomain::new(1);
        let a = domain.acquire();
        let b = domain.acquire();
        assert_eq!(domain.slot_count(), 2);
        drop((a, b));
        let _c = domain.acquire();
        assert_eq!(domain.slot_count(), 2);
    }

    #[test]
    fn protected_versions_survive_scan() {
        let domain: HazardDomain<u64> = HazardDomain::new(2);
        let src = AtomicPtr::new(boxed(1));
        let guard = domain.acquire();
        let seen = guard.protect(&src);

        let old = src.swap(boxed(2), Ordering::SeqCst);
        assert_eq!(old, seen);
        // SAFETY: `old` was just unlinked from `src`.
        assert_eq!(unsafe { domain.retire(old) }, 1);

        let outcome = domain.scan();
        assert_eq!(outcome, ScanOutcome { reclaimed: 0, deferred: 1 });
        // SAFETY: still protected by `guard`.
        assert_eq!(unsafe { *seen }, 1);

        drop(guard);
        let outcome = domain.scan();
        assert_eq!(outcome, ScanOutcome { reclaimed: 1, deferred: 0 });
        assert_eq!(domain.pending(), 0);

        // SAFETY: test owns the final version.
        drop(unsafe { Box::from_raw(src.into_inner()) });
    }

    #[test]
    fn drop_frees_pending_versions() {
        let counter = Arc::new(());
        let domain: HazardDomain<Arc<()>> = HazardDomain::new(1);
        for _ in 0..3 {
            let p = Box::into_raw(Box::new(Arc::clone(&counter)));
            // SAFETY: `p` was never shared.
            unsafe { domain.retire(p) };
        }
        assert_eq!(Arc::strong_count(&counter), 4);
        drop(domain);
        assert_eq!(Arc::strong_count(&counter), 1);
    }
}
