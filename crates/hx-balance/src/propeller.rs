//! Thermal-path propeller: shaft power to thrust exergy.

use hx_core::numeric::{clamp_nonneg, guarded_efficiency};

#[derive(Debug, Clone, Copy, Default)]
pub struct PropellerBalance {
    pub input_kw: f64,
    pub thrust_exergy_kw: f64,
    pub destruction_kw: f64,
    pub efficiency: f64,
}

/// Converts gearbox output power and measured thrust into thrust exergy
/// (thrust × velocity); the shortfall is destruction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThermalPropeller;

impl ThermalPropeller {
    pub fn evaluate(&self, input_kw: f64, thrust_n: f64, velocity_m_s: f64) -> PropellerBalance {
        let thrust_exergy_kw = thrust_n * velocity_m_s / 1000.0;
        let destruction_kw = clamp_nonneg(input_kw - thrust_exergy_kw);
        let efficiency = guarded_efficiency(thrust_exergy_kw, input_kw);

        PropellerBalance {
            input_kw,
            thrust_exergy_kw,
            destruction_kw,
            efficiency,
        }
    }
}
