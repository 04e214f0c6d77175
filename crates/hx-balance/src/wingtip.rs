//! Wingtip propeller: electric-path shaft power to thrust exergy.

use hx_core::numeric::{clamp_nonneg, guarded_efficiency};

#[derive(Debug, Clone, Copy, Default)]
pub struct WingtipBalance {
    /// Shaft power from the WTP motor [kW]
    pub input_kw: f64,
    pub thrust_exergy_kw: f64,
    /// Aerodynamic loss and destruction, reported as one combined term
    pub destruction_kw: f64,
    pub efficiency: f64,
}

/// Same thrust-exergy formulation as the thermal-path propeller, with the
/// shortfall kept as a single combined loss-plus-destruction term because the
/// telemetry carries no separate wake measurement for the wingtip unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct WingtipPropeller;

impl WingtipPropeller {
    pub fn evaluate(&self, input_kw: f64, thrust_n: f64, velocity_m_s: f64) -> WingtipBalance {
        if input_kw <= 0.0 {
            return WingtipBalance::default();
        }

        let thrust_exergy_kw = thrust_n * velocity_m_s / 1000.0;
        let destruction_kw = clamp_nonneg(input_kw - thrust_exergy_kw);
        let efficiency = guarded_efficiency(thrust_exergy_kw, input_kw);

        WingtipBalance {
            input_kw,
            thrust_exergy_kw,
            destruction_kw,
            efficiency,
        }
    }
}
