use crate::HxError;

/// Floating point type used throughout the system
pub type Real = f64;

/// Denominators below this are treated as zero by the guarded ratios.
pub const EPSILON_DENOM: Real = 1e-12;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, HxError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HxError::NonFinite { what, value: v })
    }
}

/// Clamp a raw destruction/loss term to zero.
///
/// Negative values are measurement/model noise, not reverse exergy flow.
#[inline]
pub fn clamp_nonneg(v: Real) -> Real {
    v.max(0.0)
}

/// Clamp an efficiency to the physical [0, 1] range.
#[inline]
pub fn clamp_unit(v: Real) -> Real {
    v.clamp(0.0, 1.0)
}

/// Ratio that short-circuits to zero for a zero/near-zero or negative
/// denominator instead of dividing.
#[inline]
pub fn zero_guarded_ratio(num: Real, den: Real) -> Real {
    if den > EPSILON_DENOM {
        num / den
    } else {
        0.0
    }
}

/// Guarded efficiency: ratio with both the zero-denominator guard and the
/// [0, 1] clamp applied.
#[inline]
pub fn guarded_efficiency(useful: Real, input: Real) -> Real {
    clamp_unit(zero_guarded_ratio(useful, input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn clamps() {
        assert_eq!(clamp_nonneg(-3.0), 0.0);
        assert_eq!(clamp_nonneg(3.0), 3.0);
        assert_eq!(clamp_unit(1.2), 1.0);
        assert_eq!(clamp_unit(-0.2), 0.0);
        assert_eq!(clamp_unit(0.5), 0.5);
    }

    #[test]
    fn guarded_ratio_short_circuits() {
        assert_eq!(zero_guarded_ratio(5.0, 0.0), 0.0);
        assert_eq!(zero_guarded_ratio(5.0, -2.0), 0.0);
        assert_eq!(zero_guarded_ratio(5.0, 10.0), 0.5);
    }

    #[test]
    fn guarded_efficiency_clamps() {
        assert_eq!(guarded_efficiency(12.0, 10.0), 1.0);
        assert_eq!(guarded_efficiency(8.0, 10.0), 0.8);
        assert_eq!(guarded_efficiency(8.0, 0.0), 0.0);
    }
}
