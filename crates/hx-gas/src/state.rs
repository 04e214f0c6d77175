//! Stagnation-state and isentropic relations.

use crate::error::{GasError, GasResult};
use hx_core::units::{k, pa, Pressure, Temperature};

/// Stagnation (total) state of a gas stream: temperature and pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasState {
    t: Temperature,
    p: Pressure,
}

impl GasState {
    /// Create a state, validating both quantities are positive and finite.
    pub fn new(t: Temperature, p: Pressure) -> GasResult<Self> {
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        if !p.value.is_finite() || p.value <= 0.0 {
            return Err(GasError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        Ok(Self { t, p })
    }

    /// Stagnation state from static ambient conditions and flight Mach number:
    ///
    /// ```text
    /// T0 = T (1 + (γ-1)/2 M²)
    /// P0 = P (1 + (γ-1)/2 M²)^(γ/(γ-1))
    /// ```
    pub fn stagnation_from_ambient(
        t_ambient: Temperature,
        p_ambient: Pressure,
        mach: f64,
        gamma: f64,
    ) -> GasResult<Self> {
        if !mach.is_finite() || mach < 0.0 {
            return Err(GasError::InvalidArg {
                what: "Mach number must be finite and non-negative",
            });
        }
        if !(gamma > 1.0) {
            return Err(GasError::InvalidArg {
                what: "gamma must be > 1",
            });
        }
        let factor = 1.0 + (gamma - 1.0) / 2.0 * mach * mach;
        let t0 = t_ambient.value * factor;
        let p0 = p_ambient.value * factor.powf(gamma / (gamma - 1.0));
        Self::new(k(t0), pa(p0))
    }

    pub fn temperature(&self) -> Temperature {
        self.t
    }

    pub fn pressure(&self) -> Pressure {
        self.p
    }
}

/// Static temperature after isentropic expansion from a stagnation state to a
/// target pressure:
///
/// ```text
/// T = T0 (P/P0)^((γ-1)/γ)
/// ```
pub fn isentropic_expansion_temperature(
    stagnation: GasState,
    p_target: Pressure,
    gamma: f64,
) -> GasResult<Temperature> {
    if !p_target.value.is_finite() || p_target.value <= 0.0 {
        return Err(GasError::NonPhysical {
            what: "target pressure must be positive and finite",
        });
    }
    let pr = p_target.value / stagnation.pressure().value;
    let exponent = (gamma - 1.0) / gamma;
    Ok(k(stagnation.temperature().value * pr.powf(exponent)))
}
