//! Value transformers.
//!
//! Each transformer turns the text of one argument into a typed value or
//! rejects it. They hold no state, so the same input always produces the same
//! outcome.

use nix::unistd::{Gid, Uid};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error("no digits")]
    NoDigits,

    #[error("number out of range")]
    OutOfRange,

    #[error("unknown suffix '{0}'")]
    BadSuffix(char),

    #[error("unexpected trailing text \"{0}\"")]
    Trailing(String),

    #[error("negative value")]
    Negative,
}

/// Signed 64-bit integer with an optional magnitude suffix.
///
/// The base follows the usual C conventions: `0x`/`0X` is hexadecimal, a
/// leading `0` is octal, anything else is decimal. A single trailing `k`,
/// `M`, `G` or `T` (any case) multiplies the value by 2^10, 2^20, 2^30 or
/// 2^40. A product that does not fit in 64 bits is rejected.
pub fn int64(input: &str) -> Result<i64, TransformError> {
    let (value, rest) = leading_integer(input)?;
    let shift = magnitude_shift(rest)?;
    value
        .checked_mul(1i64 << shift)
        .ok_or(TransformError::OutOfRange)
}

/// Unsigned 64-bit integer; same syntax as [`int64`], negatives rejected.
///
/// Values are limited to the non-negative half of the signed range.
pub fn uint64(input: &str) -> Result<u64, TransformError> {
    let value = int64(input)?;
    u64::try_from(value).map_err(|_| TransformError::Negative)
}

/// Plain `int`: decimal only.
pub fn int(input: &str) -> Result<i32, TransformError> {
    let (negative, body) = split_sign(skip_space(input));
    let end = body
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(body.len());
    if end == 0 {
        return Err(TransformError::NoDigits);
    }
    if end < body.len() {
        return Err(TransformError::Trailing(body[end..].to_string()));
    }

    let magnitude = body[..end]
        .parse::<u64>()
        .map_err(|_| TransformError::OutOfRange)?;
    let value = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    i32::try_from(value).map_err(|_| TransformError::OutOfRange)
}

/// User id, parsed like [`uint64`] and narrowed to 32 bits.
pub fn uid(input: &str) -> Result<Uid, TransformError> {
    id32(input).map(Uid::from_raw)
}

/// Group id, parsed like [`uint64`] and narrowed to 32 bits.
pub fn gid(input: &str) -> Result<Gid, TransformError> {
    id32(input).map(Gid::from_raw)
}

fn id32(input: &str) -> Result<u32, TransformError> {
    let value = uint64(input)?;
    u32::try_from(value).map_err(|_| TransformError::OutOfRange)
}

// ============================================================================
// strtoimax-style scanning
// ============================================================================

fn skip_space(input: &str) -> &str {
    input.trim_start_matches(|c: char| c.is_ascii_whitespace())
}

fn split_sign(input: &str) -> (bool, &str) {
    if let Some(rest) = input.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = input.strip_prefix('+') {
        (false, rest)
    } else {
        (false, input)
    }
}

/// Parse the longest integer prefix of `input`, returning it together with
/// the unparsed remainder.
fn leading_integer(input: &str) -> Result<(i64, &str), TransformError> {
    let (negative, body) = split_sign(skip_space(input));

    let hex = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_hexdigit()));
    let (radix, digits) = match hex {
        Some(rest) => (16, rest),
        None if body.starts_with('0') => (8, body),
        None => (10, body),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return Err(TransformError::NoDigits);
    }

    let magnitude =
        u64::from_str_radix(&digits[..end], radix).map_err(|_| TransformError::OutOfRange)?;
    let value = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    let value = i64::try_from(value).map_err(|_| TransformError::OutOfRange)?;

    Ok((value, &digits[end..]))
}

/// Bit shift for a magnitude suffix; zero when there is no suffix.
fn magnitude_shift(rest: &str) -> Result<u32, TransformError> {
    let mut chars = rest.chars();
    let Some(c) = chars.next() else {
        return Ok(0);
    };

    let shift = match c.to_ascii_uppercase() {
        'K' => 10,
        'M' => 20,
        'G' => 30,
        'T' => 40,
        _ => return Err(TransformError::BadSuffix(c)),
    };

    if !chars.as_str().is_empty() {
        return Err(TransformError::Trailing(chars.as_str().to_string()));
    }
    Ok(shift)
}
