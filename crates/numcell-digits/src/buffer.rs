//! The copy-on-write digit buffer.
//!
//! [`DigitBuffer`] wraps an `Arc<Vec<Digit>>`. Cloning a buffer shares the
//! digits (reference count increment); dropping releases them (reference
//! count decrement, freed at zero). Every mutator first establishes
//! exclusive ownership, privately cloning the digits if another owner can
//! still see them, so no owner ever observes digits changing underneath it.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::digit::{reserve_exact, significant_len, Digit};
use crate::error::DigitError;

/// A resizable, reference-counted, copy-on-write sequence of digits.
///
/// Digits are stored least-significant first. The buffer itself does not
/// enforce canonical form; callers trim with
/// [`truncate_to_significant`](DigitBuffer::truncate_to_significant).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DigitBuffer {
    digits: Arc<Vec<Digit>>,
}

// Compile-time assertion: DigitBuffer must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<DigitBuffer>();
};

impl DigitBuffer {
    /// Create an empty, exclusively owned buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of an existing digit vector without copying.
    pub fn from_vec(digits: Vec<Digit>) -> Self {
        Self {
            digits: Arc::new(digits),
        }
    }

    /// Copy `digits` into a fresh, exclusively owned buffer.
    pub fn try_from_slice(digits: &[Digit]) -> Result<Self, DigitError> {
        let mut vec = Vec::new();
        reserve_exact(&mut vec, digits.len())?;
        vec.extend_from_slice(digits);
        Ok(Self::from_vec(vec))
    }

    /// A fresh buffer of `len` zero digits.
    pub fn zeroed(len: usize) -> Result<Self, DigitError> {
        crate::digit::try_zeroed(len).map(Self::from_vec)
    }

    /// Number of digits held, significant or not.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Whether the buffer holds no digits.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Read-only view of the digits.
    pub fn as_slice(&self) -> &[Digit] {
        &self.digits
    }

    /// Number of owners currently sharing these digits.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.digits)
    }

    /// Whether another owner can observe these digits.
    pub fn is_shared(&self) -> bool {
        self.ref_count() > 1
    }

    /// Whether two buffers share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.digits, &other.digits)
    }

    /// Writable view of the digits, privately cloning them first if shared.
    pub fn mutate(&mut self) -> Result<&mut [Digit], DigitError> {
        Ok(self.exclusive(0)?.as_mut_slice())
    }

    /// Resize to exactly `len` digits, zero-filling any new high digits.
    pub fn resize(&mut self, len: usize) -> Result<(), DigitError> {
        let current = self.len();
        if len <= current {
            return self.truncate(len);
        }
        self.exclusive(len - current)?.resize(len, 0);
        Ok(())
    }

    /// Append `count` copies of `value` as new high digits.
    pub fn append(&mut self, count: usize, value: Digit) -> Result<(), DigitError> {
        if count == 0 {
            return Ok(());
        }
        self.exclusive(count)?
            .extend(std::iter::repeat(value).take(count));
        Ok(())
    }

    /// Append a single high digit.
    pub fn push(&mut self, digit: Digit) -> Result<(), DigitError> {
        self.append(1, digit)
    }

    /// Drop every digit at index `len` and above.
    ///
    /// A shared buffer is not cloned in full: only the retained prefix is
    /// copied into the new private storage.
    pub fn truncate(&mut self, len: usize) -> Result<(), DigitError> {
        if len >= self.len() {
            return Ok(());
        }
        match Arc::get_mut(&mut self.digits) {
            Some(vec) => vec.truncate(len),
            None => {
                let mut vec = Vec::new();
                reserve_exact(&mut vec, len)?;
                vec.extend_from_slice(&self.digits[..len]);
                self.digits = Arc::new(vec);
            }
        }
        Ok(())
    }

    /// Drop non-significant high zero digits, leaving canonical form.
    pub fn truncate_to_significant(&mut self) -> Result<(), DigitError> {
        self.truncate(significant_len(&self.digits))
    }

    /// Exchange contents with `other`. Neither reference count changes.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.digits, &mut other.digits);
    }

    /// Replace the contents with a copy of `digits`.
    ///
    /// Exclusive storage is reused when it is large enough.
    pub fn assign(&mut self, digits: &[Digit]) -> Result<(), DigitError> {
        match Arc::get_mut(&mut self.digits) {
            Some(vec) => {
                let additional = digits.len().saturating_sub(vec.len());
                reserve_exact(vec, additional)?;
                vec.clear();
                vec.extend_from_slice(digits);
            }
            None => *self = Self::try_from_slice(digits)?,
        }
        Ok(())
    }

    /// Release the buffer, keeping the digits if this was the last owner.
    ///
    /// Shared digits are copied out.
    pub fn into_vec(self) -> Vec<Digit> {
        Arc::try_unwrap(self.digits).unwrap_or_else(|shared| shared.as_ref().clone())
    }

    /// Exclusive access to the backing vector with room for `additional`
    /// more digits. Any allocation happens before the digits are touched.
    fn exclusive(&mut self, additional: usize) -> Result<&mut Vec<Digit>, DigitError> {
        if Arc::get_mut(&mut self.digits).is_none() {
            let mut private = Vec::new();
            reserve_exact(&mut private, self.len().saturating_add(additional))?;
            private.extend_from_slice(&self.digits);
            self.digits = Arc::new(private);
        }
        // Unique at this point, so make_mut never clones.
        let vec = Arc::make_mut(&mut self.digits);
        reserve_exact(vec, additional)?;
        Ok(vec)
    }
}

impl Deref for DigitBuffer {
    type Target = [Digit];

    fn deref(&self) -> &[Digit] {
        &self.digits
    }
}

impl AsRef<[Digit]> for DigitBuffer {
    fn as_ref(&self) -> &[Digit] {
        &self.digits
    }
}

impl From<Vec<Digit>> for DigitBuffer {
    fn from(digits: Vec<Digit>) -> Self {
        Self::from_vec(digits)
    }
}

impl PartialEq<[Digit]> for DigitBuffer {
    fn eq(&self, other: &[Digit]) -> bool {
        self.digits.as_slice() == other
    }
}

impl fmt::Debug for DigitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigitBuffer")
            .field("digits", &self.digits.as_slice())
            .field("ref_count", &self.ref_count())
            .finish()
    }
}
