//! Gearbox balance and propulsion-mode resolution.

use crate::config::AnalysisConfig;
use hx_core::numeric::{clamp_nonneg, guarded_efficiency};

/// Active propulsion association for the sample, resolved once from the
/// combustion throttle and the MTRB engagement flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropulsionMode {
    /// Combustion engine alone drives the gearbox
    ThermalOnly,
    /// Engine and MTRB together; a generating MTRB subtracts from the
    /// gearbox input (power diverted to the electrical bus)
    Combined,
    /// MTRB alone drives the gearbox
    ElectricOnly,
    /// Neither path active
    Idle,
}

impl PropulsionMode {
    pub fn classify(combustion_throttle: f64, mtrb_engaged: bool) -> Self {
        match (combustion_throttle > 0.0, mtrb_engaged) {
            (true, false) => PropulsionMode::ThermalOnly,
            (true, true) => PropulsionMode::Combined,
            (false, true) => PropulsionMode::ElectricOnly,
            (false, false) => PropulsionMode::Idle,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PropulsionMode::ThermalOnly => "thermal-only",
            PropulsionMode::Combined => "combined",
            PropulsionMode::ElectricOnly => "electric-only",
            PropulsionMode::Idle => "idle",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GearboxBalance {
    pub input_kw: f64,
    pub output_kw: f64,
    pub destruction_kw: f64,
    pub efficiency: f64,
}

/// Fixed-efficiency mechanical transmission.
#[derive(Debug, Clone, Copy)]
pub struct Gearbox {
    efficiency: f64,
}

impl Gearbox {
    pub fn from_config(cfg: &AnalysisConfig) -> Self {
        Self {
            efficiency: cfg.gearbox_efficiency,
        }
    }

    /// Combined mechanical input for the resolved mode; MTRB mechanical power
    /// enters signed (negative while generating).
    pub fn evaluate(
        &self,
        mode: PropulsionMode,
        engine_shaft_kw: f64,
        mtrb_mech_kw: f64,
    ) -> GearboxBalance {
        let input_kw = match mode {
            PropulsionMode::ThermalOnly => engine_shaft_kw,
            PropulsionMode::Combined => engine_shaft_kw + mtrb_mech_kw,
            PropulsionMode::ElectricOnly => mtrb_mech_kw,
            PropulsionMode::Idle => 0.0,
        };

        let output_kw = input_kw * self.efficiency;
        let destruction_kw = clamp_nonneg(input_kw - output_kw);
        let efficiency = guarded_efficiency(output_kw, input_kw);

        GearboxBalance {
            input_kw,
            output_kw,
            destruction_kw,
            efficiency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gearbox() -> Gearbox {
        Gearbox::from_config(&AnalysisConfig::default())
    }

    #[test]
    fn mode_classification() {
        assert_eq!(
            PropulsionMode::classify(0.8, false),
            PropulsionMode::ThermalOnly
        );
        assert_eq!(
            PropulsionMode::classify(0.8, true),
            PropulsionMode::Combined
        );
        assert_eq!(
            PropulsionMode::classify(0.0, true),
            PropulsionMode::ElectricOnly
        );
        assert_eq!(PropulsionMode::classify(0.0, false), PropulsionMode::Idle);
    }

    #[test]
    fn thermal_only_passes_engine_power() {
        let b = gearbox().evaluate(PropulsionMode::ThermalOnly, 1000.0, 250.0);
        assert_eq!(b.input_kw, 1000.0);
        assert!((b.output_kw - 980.0).abs() < 1e-12);
        assert!((b.destruction_kw - 20.0).abs() < 1e-12);
        assert!((b.efficiency - 0.98).abs() < 1e-12);
    }

    #[test]
    fn generating_mtrb_subtracts_from_combined_input() {
        let assisting = gearbox().evaluate(PropulsionMode::Combined, 1000.0, 200.0);
        let generating = gearbox().evaluate(PropulsionMode::Combined, 1000.0, -200.0);
        assert_eq!(assisting.input_kw, 1200.0);
        assert_eq!(generating.input_kw, 800.0);
        assert!(generating.output_kw < assisting.output_kw);
    }

    #[test]
    fn electric_only_uses_mtrb_power() {
        let b = gearbox().evaluate(PropulsionMode::ElectricOnly, 0.0, 300.0);
        assert_eq!(b.input_kw, 300.0);
        assert!((b.output_kw - 294.0).abs() < 1e-12);
    }

    #[test]
    fn idle_is_all_zero() {
        let b = gearbox().evaluate(PropulsionMode::Idle, 0.0, 0.0);
        assert_eq!(b.input_kw, 0.0);
        assert_eq!(b.output_kw, 0.0);
        assert_eq!(b.destruction_kw, 0.0);
        assert_eq!(b.efficiency, 0.0);
    }
}
