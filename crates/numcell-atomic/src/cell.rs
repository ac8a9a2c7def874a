//! The lock-free big-integer cell.
//!
//! The cell owns one heap-allocated [`BigInt`] per published version and an
//! atomic pointer to the current one. Every write is read → compute → CAS:
//!
//! 1. protect the current version through a hazard slot and borrow it;
//! 2. build a candidate from the snapshot (sharing digit buffers where the
//!    arithmetic allows, copy-on-write otherwise);
//! 3. CAS the pointer from the snapshot to the candidate;
//! 4. on success retire the snapshot, on failure drop the candidate and
//!    go back to 1.
//!
//! Holding the hazard across the CAS keeps the observed version alive, so
//! its address cannot be reused underneath the comparison.

#![allow(unsafe_code)]

use std::fmt;
use std::sync::atomic::{AtomicPtr, Ordering};

use numcell_int::{AsOperand, BigInt, IntError};

use crate::config::CellConfig;
use crate::error::CellError;
use crate::hazard::HazardDomain;
use crate::metrics::{CellCounters, CellStats};

/// A shared, lock-free, mutable [`BigInt`] location.
///
/// Reads never block and return an owned snapshot that shares the stored
/// digits. Updates retry until their compare-and-swap wins.
pub struct AtomicBigInt {
    current: AtomicPtr<BigInt>,
    domain: HazardDomain<BigInt>,
    counters: CellCounters,
    config: CellConfig,
}

// Compile-time assertion: AtomicBigInt must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<AtomicBigInt>();
};

/// How one pass of [`AtomicBigInt::update`] ended.
enum Outcome<E> {
    Installed { previous: BigInt, current: BigInt },
    Declined(BigInt),
    Failed(E),
}

impl AtomicBigInt {
    /// A cell holding `value`, with the default configuration.
    pub fn new(value: BigInt) -> Self {
        Self::build(value, CellConfig::default())
    }

    /// A cell holding `value`, with a validated configuration.
    pub fn with_config(value: BigInt, config: CellConfig) -> Result<Self, CellError> {
        config.validate()?;
        Ok(Self::build(value, config))
    }

    fn build(value: BigInt, config: CellConfig) -> Self {
        Self {
            current: AtomicPtr::new(Box::into_raw(Box::new(value))),
            domain: HazardDomain::new(config.initial_hazard_slots),
            counters: CellCounters::default(),
            config,
        }
    }

    /// The configuration this cell was built with.
    pub fn config(&self) -> &CellConfig {
        &self.config
    }

    /// Snapshot of the current value.
    pub fn load(&self) -> BigInt {
        let guard = self.domain.acquire();
        let ptr = guard.protect(&self.current);
        // SAFETY: `ptr` is announced in `guard` and was validated as current,
        // so it is not reclaimed before the guard drops.
        let value = unsafe { (*ptr).clone() };
        drop(guard);
        CellCounters::bump(&self.counters.loads);
        value
    }

    /// Replace the value.
    pub fn store(&self, value: BigInt) {
        drop(self.swap(value));
    }

    /// Replace the value, returning the previous one.
    pub fn swap(&self, value: BigInt) -> BigInt {
        let new = Box::into_raw(Box::new(value));
        let old = self.current.swap(new, Ordering::SeqCst);
        // SAFETY: `old` is unlinked and only this thread can retire it, so it
        // stays allocated until the `retire` below.
        let previous = unsafe { (*old).clone() };
        self.retire(old);
        previous
    }

    /// Install `new` if the current value numerically equals `expected`.
    ///
    /// Returns `Ok(previous)` on success and `Err(actual)` otherwise. Equal
    /// values backed by different buffers compare equal.
    pub fn compare_exchange(&self, expected: &BigInt, new: BigInt) -> Result<BigInt, BigInt> {
        let outcome = self.update::<std::convert::Infallible, _, _>(
            |current| Ok((current == expected).then(|| new.clone())),
            |_| {},
        );
        match outcome {
            Outcome::Installed { previous, .. } => Ok(previous),
            Outcome::Declined(actual) => Err(actual),
            Outcome::Failed(never) => match never {},
        }
    }

    /// Apply `f` until its result is installed or `f` returns `None`.
    ///
    /// `f` may run more than once. Returns `Ok(previous)` once installed and
    /// `Err(current)` if `f` declined.
    pub fn fetch_update<F>(&self, f: F) -> Result<BigInt, BigInt>
    where
        F: FnMut(&BigInt) -> Option<BigInt>,
    {
        self.fetch_update_with(f, |_| {})
    }

    /// [`fetch_update`](Self::fetch_update) with a callback that sees each
    /// fresh snapshot after a lost race, before `f` runs again.
    ///
    /// The callback lets a caller refresh inputs derived from the old
    /// snapshot without rebuilding everything inside `f`.
    pub fn fetch_update_with<F, R>(&self, mut f: F, on_retry: R) -> Result<BigInt, BigInt>
    where
        F: FnMut(&BigInt) -> Option<BigInt>,
        R: FnMut(&BigInt),
    {
        match self.update::<std::convert::Infallible, _, _>(|v| Ok(f(v)), on_retry) {
            Outcome::Installed { previous, .. } => Ok(previous),
            Outcome::Declined(current) => Err(current),
            Outcome::Failed(never) => match never {},
        }
    }

    /// Apply a fallible `f` until its result is installed, returning the
    /// previous value. An error from `f` leaves the cell unchanged.
    pub fn try_update<F>(&self, mut f: F) -> Result<BigInt, CellError>
    where
        F: FnMut(&BigInt) -> Result<BigInt, IntError>,
    {
        self.install(|v| f(v).map(Some)).map(|(previous, _)| previous)
    }

    /// Add `rhs`, returning the previous value.
    pub fn fetch_add<T: AsOperand + ?Sized>(&self, rhs: &T) -> Result<BigInt, CellError> {
        self.try_update(|v| v.checked_add(rhs))
    }

    /// Subtract `rhs`, returning the previous value.
    pub fn fetch_sub<T: AsOperand + ?Sized>(&self, rhs: &T) -> Result<BigInt, CellError> {
        self.try_update(|v| v.checked_sub(rhs))
    }

    /// Multiply by `rhs`, returning the previous value.
    pub fn fetch_mul<T: AsOperand + ?Sized>(&self, rhs: &T) -> Result<BigInt, CellError> {
        self.try_update(|v| v.checked_mul(rhs))
    }

    /// Raise to at least `rhs`, returning the previous value.
    pub fn fetch_max<T: AsOperand + ?Sized>(&self, rhs: &T) -> BigInt {
        self.fetch_bound(rhs, std::cmp::Ordering::Less)
    }

    /// Lower to at most `rhs`, returning the previous value.
    pub fn fetch_min<T: AsOperand + ?Sized>(&self, rhs: &T) -> BigInt {
        self.fetch_bound(rhs, std::cmp::Ordering::Greater)
    }

    /// Replace the value with `rhs` when `value.cmp(rhs) == replace_when`.
    fn fetch_bound<T: AsOperand + ?Sized>(
        &self,
        rhs: &T,
        replace_when: std::cmp::Ordering,
    ) -> BigInt {
        let outcome = self.update::<std::convert::Infallible, _, _>(
            |v| {
                Ok((v.cmp_operand(rhs) == replace_when).then(|| rhs.as_operand().to_bigint()))
            },
            |_| {},
        );
        match outcome {
            Outcome::Installed { previous, .. } | Outcome::Declined(previous) => previous,
            Outcome::Failed(never) => match never {},
        }
    }

    /// Add one, returning the new value.
    pub fn increment(&self) -> Result<BigInt, CellError> {
        self.install(|v| {
            let mut next = v.clone();
            next.increment()?;
            Ok(Some(next))
        })
        .map(|(_, current)| current)
    }

    /// Subtract one, returning the new value.
    pub fn decrement(&self) -> Result<BigInt, CellError> {
        self.install(|v| {
            let mut next = v.clone();
            next.decrement()?;
            Ok(Some(next))
        })
        .map(|(_, current)| current)
    }

    /// Activity counters since construction.
    pub fn stats(&self) -> CellStats {
        self.counters.snapshot(self.domain.slot_count())
    }

    /// Exclusive access to the stored value.
    pub fn get_mut(&mut self) -> &mut BigInt {
        // SAFETY: `&mut self` rules out concurrent readers and writers, and
        // `current` is non-null for the cell's whole life.
        unsafe { &mut **self.current.get_mut() }
    }

    /// Consume the cell, returning the stored value.
    pub fn into_inner(mut self) -> BigInt {
        let ptr = std::mem::replace(self.current.get_mut(), std::ptr::null_mut());
        // SAFETY: `ptr` came from `Box::into_raw` and the null left behind
        // stops `Drop` from freeing it again.
        *unsafe { Box::from_raw(ptr) }
    }

    /// Run `compute` through [`update`](Self::update), mapping arithmetic
    /// errors into [`CellError`]. Returns `(previous, current)`.
    fn install<F>(&self, compute: F) -> Result<(BigInt, BigInt), CellError>
    where
        F: FnMut(&BigInt) -> Result<Option<BigInt>, IntError>,
    {
        match self.update(compute, |_| {}) {
            Outcome::Installed { previous, current } => Ok((previous, current)),
            Outcome::Declined(current) => Ok((current.clone(), current)),
            Outcome::Failed(err) => Err(CellError::Arithmetic(err)),
        }
    }

    /// The read → compute → CAS → retry loop behind every update.
    ///
    /// `compute` returns `Ok(Some(v))` to attempt installing `v`, `Ok(None)`
    /// to stop without writing, or an error to abort. `on_retry` sees each
    /// fresh snapshot after a lost race.
    fn update<E, F, R>(&self, mut compute: F, mut on_retry: R) -> Outcome<E>
    where
        F: FnMut(&BigInt) -> Result<Option<BigInt>, E>,
        R: FnMut(&BigInt),
    {
        let guard = self.domain.acquire();
        let mut attempt: u32 = 0;
        loop {
            let observed = guard.protect(&self.current);
            // SAFETY: `observed` is announced in `guard` and was validated as
            // current; it stays allocated while the guard protects it.
            let snapshot = unsafe { &*observed };
            if attempt > 0 {
                on_retry(snapshot);
            }
            let candidate = match compute(snapshot) {
                Ok(Some(candidate)) => candidate,
                Ok(None) => return Outcome::Declined(snapshot.clone()),
                Err(err) => return Outcome::Failed(err),
            };

            // Clone before publishing: once linked, another writer may
            // replace and retire the candidate.
            let current = candidate.clone();
            let new = Box::into_raw(Box::new(candidate));
            CellCounters::bump(&self.counters.cas_attempts);
            match self
                .current
                .compare_exchange(observed, new, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => {
                    let previous = snapshot.clone();
                    drop(guard);
                    self.retire(observed);
                    return Outcome::Installed { previous, current };
                }
                Err(_) => {
                    // SAFETY: the CAS failed, so `new` was never published.
                    drop(unsafe { Box::from_raw(new) });
                    CellCounters::bump(&self.counters.cas_failures);
                    attempt = attempt.saturating_add(1);
                    tracing::trace!(attempt, "lost compare-and-swap race, retrying");
                    if attempt == self.config.contention_warn_retries {
                        tracing::warn!(
                            retries = attempt,
                            "big-integer cell update is heavily contended"
                        );
                    }
                }
            }
        }
    }

    /// Hand an unlinked version to the domain and scan once enough pile up.
    fn retire(&self, ptr: *mut BigInt) {
        // SAFETY: callers pass the version they just unlinked with a
        // successful swap or CAS; no other thread can retire it.
        let pending = unsafe { self.domain.retire(ptr) };
        CellCounters::bump(&self.counters.retired);
        if pending >= self.config.reclaim_threshold {
            let outcome = self.domain.scan();
            self.counters
                .reclaimed
                .fetch_add(outcome.reclaimed as u64, Ordering::Relaxed);
            tracing::trace!(
                reclaimed = outcome.reclaimed,
                deferred = outcome.deferred,
                pending = self.domain.pending(),
                "reclamation scan"
            );
        }
    }
}

impl Drop for AtomicBigInt {
    fn drop(&mut self) {
        let ptr = *self.current.get_mut();
        if !ptr.is_null() {
            // SAFETY: exclusive access; the current version is owned by the
            // cell and was never retired.
            drop(unsafe { Box::from_raw(ptr) });
        }
        // Retired versions and hazard slots are freed by the domain's Drop.
    }
}

impl Default for AtomicBigInt {
    fn default() -> Self {
        Self::new(BigInt::zero())
    }
}

impl From<BigInt> for AtomicBigInt {
    fn from(value: BigInt) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for AtomicBigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicBigInt").field(&self.load()).finish()
    }
}
