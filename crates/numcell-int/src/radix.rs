//! Radix text conversion and `fmt` impls.
//!
//! Output divides the magnitude by the largest power of the radix that fits
//! in one digit, then splits each remainder into radix digits, collecting
//! them least significant first and reversing at the end. Digits above 9
//! use `A`-`Z`.

use std::fmt;
use std::str::FromStr;

use numcell_digits::Digit;
use smallvec::SmallVec;

use crate::bigint::BigInt;
use crate::division::div_rem_digit_in_place;
use crate::error::{IntError, ParseBigIntError, ParseErrorKind};
use crate::magnitude::{self, mul_add_digit};
use crate::ops::expect_arith;

const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Largest `radix^k` that fits in a [`Digit`], and `k`.
fn chunk_for(radix: u32) -> (Digit, usize) {
    let radix = Digit::from(radix);
    let mut power = radix;
    let mut count = 1;
    while let Some(next) = power.checked_mul(radix) {
        power = next;
        count += 1;
    }
    (power, count)
}

impl BigInt {
    /// Format in `radix`, left-padded with `0` to at least `min_digits`
    /// digits. Negative values get a leading `-` ahead of the padding.
    ///
    /// A radix below 2, or a zero value, yields only the zero padding
    /// (at least one `0`).
    ///
    /// # Panics
    ///
    /// Panics if `radix > 36`.
    #[track_caller]
    pub fn to_string_radix(&self, radix: u32, min_digits: usize) -> String {
        expect_arith(self.checked_to_string_radix(radix, min_digits))
    }

    /// Fallible form of [`to_string_radix`](Self::to_string_radix).
    pub fn checked_to_string_radix(
        &self,
        radix: u32,
        min_digits: usize,
    ) -> Result<String, IntError> {
        if radix > 36 {
            return Err(IntError::InvalidRadix { radix });
        }
        if radix < 2 || self.is_zero() {
            return Ok("0".repeat(min_digits.max(1)));
        }
        let text = self.magnitude_text(radix)?;
        let padding = min_digits.saturating_sub(text.len());
        let mut out = String::with_capacity(usize::from(self.is_negative()) + padding + text.len());
        if self.is_negative() {
            out.push('-');
        }
        out.extend(std::iter::repeat('0').take(padding));
        out.push_str(&text);
        Ok(out)
    }

    /// Unsigned, unpadded digits of the magnitude; `radix` in `2..=36`.
    fn magnitude_text(&self, radix: u32) -> Result<String, IntError> {
        let (chunk, chunk_len) = chunk_for(radix);
        let mut work = magnitude::to_vec(self.digits())?;
        let mut symbols: SmallVec<[u8; 64]> = SmallVec::new();
        while !work.is_empty() {
            let mut rem = div_rem_digit_in_place(&mut work, chunk);
            work = magnitude::trim(work);
            let last = work.is_empty();
            for _ in 0..chunk_len {
                if last && rem == 0 {
                    break;
                }
                symbols.push(ALPHABET[(rem % Digit::from(radix)) as usize]);
                rem /= Digit::from(radix);
            }
        }
        symbols.reverse();
        Ok(symbols.iter().map(|&b| char::from(b)).collect())
    }

    /// Parse text in `radix` (`2..=36`).
    ///
    /// Accepts an optional leading `+` or `-`, digits in either case, and
    /// `_` separators between digits.
    pub fn from_str_radix(text: &str, radix: u32) -> Result<Self, ParseBigIntError> {
        if !(2..=36).contains(&radix) {
            return Err(ParseBigIntError::new(ParseErrorKind::InvalidRadix { radix }));
        }
        let (negative, body, offset) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..], 1),
            Some(b'+') => (false, &text[1..], 1),
            _ => (false, text, 0),
        };

        let (chunk, chunk_len) = chunk_for(radix);
        let mut digits: Vec<Digit> = Vec::new();
        let mut pending: Digit = 0;
        let mut pending_len = 0;
        let mut seen_digit = false;
        for (index, ch) in body.char_indices() {
            if ch == '_' && seen_digit {
                continue;
            }
            let value = ch.to_digit(radix).ok_or_else(|| {
                ParseBigIntError::new(ParseErrorKind::InvalidDigit {
                    index: index + offset,
                    found: ch,
                })
            })?;
            seen_digit = true;
            pending = pending * Digit::from(radix) + Digit::from(value);
            pending_len += 1;
            if pending_len == chunk_len {
                mul_add_digit(&mut digits, chunk, pending)?;
                pending = 0;
                pending_len = 0;
            }
        }
        if !seen_digit {
            return Err(ParseBigIntError::new(ParseErrorKind::Empty));
        }
        if pending_len > 0 {
            let scale = Digit::from(radix).pow(pending_len as u32);
            mul_add_digit(&mut digits, scale, pending)?;
        }
        Ok(Self::from_magnitude(negative, digits))
    }
}

impl FromStr for BigInt {
    type Err = ParseBigIntError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::from_str_radix(text, 10)
    }
}

/// Pad through the formatter so width, fill, `+` and `#` behave as for
/// the built-in integers.
fn fmt_radix(
    value: &BigInt,
    f: &mut fmt::Formatter<'_>,
    radix: u32,
    prefix: &str,
    lowercase: bool,
) -> fmt::Result {
    let mut text = if value.is_zero() {
        String::from("0")
    } else {
        value.magnitude_text(radix).map_err(|_| fmt::Error)?
    };
    if lowercase {
        text.make_ascii_lowercase();
    }
    f.pad_integral(!value.is_negative(), prefix, &text)
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_radix(self, f, 10, "", false)
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_radix(self, f, 16, "0x", true)
    }
}

impl fmt::UpperHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_radix(self, f, 16, "0x", false)
    }
}

impl fmt::Octal for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_radix(self, f, 8, "0o", false)
    }
}

impl fmt::Binary for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_radix(self, f, 2, "0b", false)
    }
}
