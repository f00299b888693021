//! Small helpers shared by the profile and rendering code.
use crate::error::{AnalysisError, Result};

/// Check that every profile length matches the first one.
///
/// Returns the common length.
pub(crate) fn check_aligned(lengths: &[usize]) -> Result<usize> {
    let expected = *lengths.first().ok_or(AnalysisError::NotEnoughData)?;

    match lengths.iter().find(|&&len| len != expected) {
        Some(&found) => Err(AnalysisError::MismatchedProfiles { expected, found }),
        None => Ok(expected),
    }
}

/// Minimum and maximum of the finite values in an iterator, `None` if there are none.
pub(crate) fn finite_bounds<I: IntoIterator<Item = f64>>(vals: I) -> Option<(f64, f64)> {
    vals.into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Pad a range so a plot does not put data on the frame, and widen degenerate ranges.
pub(crate) fn padded_range((lo, hi): (f64, f64), fraction: f64) -> (f64, f64) {
    let span = hi - lo;
    if span <= ::std::f64::EPSILON * hi.abs().max(1.0) {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.05 };
        (lo - pad, hi + pad)
    } else {
        (lo - span * fraction, hi + span * fraction)
    }
}

#[cfg(test)]
pub mod test_tools {
    pub fn approx_equal(val1: f64, val2: f64, eps: f64) -> bool {
        assert!(eps > 0.0);

        (val1 - val2).abs() < eps
    }
}
