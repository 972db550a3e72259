//! Fallible string composition.
//!
//! Every rewritten value is built with exactly one allocation, reserved up
//! front with `try_reserve_exact`, so an allocation failure turns into a
//! per-event error instead of aborting the broker.

use super::DomainError;

/// Joins `parts` with `sep` into a newly allocated string.
///
/// # Errors
///
/// Returns `DomainError::OutOfMemory` tagged with `target` if the buffer
/// cannot be allocated.
pub fn join(parts: &[&str], sep: char, target: &'static str) -> Result<String, DomainError> {
    let mut len = parts.len().saturating_sub(1).saturating_mul(sep.len_utf8());
    for part in parts {
        len = len.saturating_add(part.len());
    }

    let mut out = String::new();
    out.try_reserve_exact(len)
        .map_err(|source| DomainError::OutOfMemory { target, source })?;
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push(sep);
        }
        out.push_str(part);
    }
    Ok(out)
}

/// Copies `value` into a newly allocated string.
///
/// # Errors
///
/// Returns `DomainError::OutOfMemory` tagged with `target` if the buffer
/// cannot be allocated.
pub fn copy(value: &str, target: &'static str) -> Result<String, DomainError> {
    join(&[value], '/', target)
}
