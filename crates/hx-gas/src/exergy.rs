//! Flow-exergy evaluation strategies and the heat-exergy helper.

use crate::combustion::combustion_products;
use crate::composition::Composition;
use crate::error::GasResult;
use crate::state::GasState;
use hx_core::units::{k, pa, MassRate, Pressure, Temperature, Velocity};

/// Dead-state reference environment defining zero exergy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeadState {
    pub t0: Temperature,
    pub p0: Pressure,
}

impl Default for DeadState {
    fn default() -> Self {
        Self {
            t0: k(298.15),
            p0: pa(101_325.0),
        }
    }
}

/// Strategy for evaluating the specific flow exergy of a gas stream.
///
/// Implementations must be thread-safe; scenario batches evaluate in
/// parallel over read-only models.
pub trait ExergyModel: Send + Sync {
    /// Strategy name (for logging/reporting).
    fn name(&self) -> &str;

    /// Specific flow exergy [J/kg] of a stream at `state` relative to `dead`:
    /// enthalpy deviation minus dead-state-weighted entropy deviation, plus
    /// kinetic exergy v²/2 when a velocity is supplied.
    fn specific_flow_exergy(
        &self,
        state: GasState,
        dead: &DeadState,
        velocity: Option<Velocity>,
    ) -> GasResult<f64>;

    /// Flow exergy rate [kW]. Zero mass flow short-circuits to zero without
    /// evaluating the strategy.
    fn flow_exergy_kw(
        &self,
        mdot: MassRate,
        state: GasState,
        dead: &DeadState,
        velocity: Option<Velocity>,
    ) -> GasResult<f64> {
        if mdot.value == 0.0 {
            return Ok(0.0);
        }
        let e_specific = self.specific_flow_exergy(state, dead, velocity)?;
        Ok(mdot.value * e_specific / 1000.0)
    }
}

/// Closed-form ideal-gas evaluation with constant cp and R.
///
/// ```text
/// e = cp (T - T0) - T0 (cp ln(T/T0) - R ln(P/P0)) [+ v²/2]
/// ```
///
/// This is the strategy the balance engine uses for air and bleed streams.
#[derive(Debug, Clone, Copy)]
pub struct IdealGasExergy {
    /// Specific heat at constant pressure [J/(kg K)]
    pub cp: f64,
    /// Specific gas constant [J/(kg K)]
    pub r_gas: f64,
}

impl Default for IdealGasExergy {
    fn default() -> Self {
        Self {
            cp: 1005.0,
            r_gas: 287.0,
        }
    }
}

impl ExergyModel for IdealGasExergy {
    fn name(&self) -> &str {
        "ideal-gas"
    }

    fn specific_flow_exergy(
        &self,
        state: GasState,
        dead: &DeadState,
        velocity: Option<Velocity>,
    ) -> GasResult<f64> {
        let t = state.temperature().value;
        let p = state.pressure().value;
        let t0 = dead.t0.value;
        let p0 = dead.p0.value;

        let enthalpy_dev = self.cp * (t - t0);
        let entropy_dev = t0 * (self.cp * (t / t0).ln() - self.r_gas * (p / p0).ln());
        let mut e = enthalpy_dev - entropy_dev;

        if let Some(v) = velocity {
            if v.value > 0.0 {
                e += v.value * v.value / 2.0;
            }
        }
        Ok(e)
    }
}

/// Equilibrium evaluation for combustion products.
///
/// Resolves the complete-combustion product composition at the sample's
/// excess-air fraction and evaluates the deviation integrals with the
/// mixture's composition-derived gas constant and temperature-dependent cp
/// (linear per-species fits):
///
/// ```text
/// Δh       = a (T - T0) + b/2 (T² - T0²)
/// Δs|_T    = a ln(T/T0) + b (T - T0)
/// e        = Δh - T0 (Δs|_T - R ln(P/P0)) [+ v²/2]
/// ```
#[derive(Debug, Clone)]
pub struct EquilibriumExergy {
    products: Composition,
    r_gas: f64,
}

impl EquilibriumExergy {
    /// Build the evaluator for a given excess-air fraction.
    pub fn for_excess_air(excess_air: f64) -> Self {
        let products = combustion_products(excess_air);
        let r_gas = products.gas_constant_j_kg_k();
        Self { products, r_gas }
    }

    pub fn products(&self) -> &Composition {
        &self.products
    }
}

impl ExergyModel for EquilibriumExergy {
    fn name(&self) -> &str {
        "chemical-equilibrium"
    }

    fn specific_flow_exergy(
        &self,
        state: GasState,
        dead: &DeadState,
        velocity: Option<Velocity>,
    ) -> GasResult<f64> {
        let t = state.temperature().value;
        let p = state.pressure().value;
        let t0 = dead.t0.value;
        let p0 = dead.p0.value;

        let (a, b) = self.products.cp_linear_fit_j_kg_k();

        let enthalpy_dev = a * (t - t0) + b / 2.0 * (t * t - t0 * t0);
        let entropy_dev_t = a * (t / t0).ln() + b * (t - t0);
        let mut e = enthalpy_dev - t0 * (entropy_dev_t - self.r_gas * (p / p0).ln());

        if let Some(v) = velocity {
            if v.value > 0.0 {
                e += v.value * v.value / 2.0;
            }
        }
        Ok(e)
    }
}

/// Exergy rate associated with a heat flow at a source temperature, via the
/// Carnot quality factor relative to the dead state.
///
/// Zero when the source is at or below the dead-state temperature (no work
/// potential) or when there is no heat flow.
pub fn heat_exergy_kw(q_heat_kw: f64, t_source: Temperature, dead: &DeadState) -> f64 {
    let t_src = t_source.value;
    let t0 = dead.t0.value;
    if t_src <= t0 || t_src == 0.0 || q_heat_kw == 0.0 {
        return 0.0;
    }
    let carnot = 1.0 - t0 / t_src;
    q_heat_kw * carnot
}

#[cfg(test)]
mod tests {
    use super::*;
    use hx_core::units::kgps;

    fn dead() -> DeadState {
        DeadState::default()
    }

    #[test]
    fn dead_state_has_zero_exergy() {
        let model = IdealGasExergy::default();
        let state = GasState::new(k(298.15), pa(101_325.0)).unwrap();
        let e = model.specific_flow_exergy(state, &dead(), None).unwrap();
        assert!(e.abs() < 1e-9);
    }

    #[test]
    fn hot_pressurized_stream_has_positive_exergy() {
        let model = IdealGasExergy::default();
        let state = GasState::new(k(600.0), pa(400_000.0)).unwrap();
        let e = model.specific_flow_exergy(state, &dead(), None).unwrap();
        assert!(e > 0.0);
    }

    #[test]
    fn kinetic_term_adds_v_squared_over_two() {
        let model = IdealGasExergy::default();
        let state = GasState::new(k(400.0), pa(150_000.0)).unwrap();
        let without = model.specific_flow_exergy(state, &dead(), None).unwrap();
        let with = model
            .specific_flow_exergy(state, &dead(), Some(hx_core::units::mps(50.0)))
            .unwrap();
        assert!((with - without - 1250.0).abs() < 1e-9);
    }

    #[test]
    fn zero_mass_flow_short_circuits() {
        let model = IdealGasExergy::default();
        let state = GasState::new(k(600.0), pa(400_000.0)).unwrap();
        let b = model
            .flow_exergy_kw(kgps(0.0), state, &dead(), None)
            .unwrap();
        assert_eq!(b, 0.0);
    }

    #[test]
    fn flow_exergy_scales_with_mdot() {
        let model = IdealGasExergy::default();
        let state = GasState::new(k(500.0), pa(200_000.0)).unwrap();
        let b1 = model
            .flow_exergy_kw(kgps(1.0), state, &dead(), None)
            .unwrap();
        let b2 = model
            .flow_exergy_kw(kgps(2.0), state, &dead(), None)
            .unwrap();
        assert!((b2 - 2.0 * b1).abs() < 1e-9);
    }

    #[test]
    fn equilibrium_strategy_tracks_ideal_gas_for_lean_mixtures() {
        // Very lean products are mostly air; the two strategies should agree
        // within a few percent at moderate temperatures.
        let ideal = IdealGasExergy::default();
        let equil = EquilibriumExergy::for_excess_air(4.0);
        let state = GasState::new(k(500.0), pa(200_000.0)).unwrap();
        let e_ideal = ideal.specific_flow_exergy(state, &dead(), None).unwrap();
        let e_equil = equil.specific_flow_exergy(state, &dead(), None).unwrap();
        assert!((e_ideal - e_equil).abs() / e_ideal < 0.10);
    }

    #[test]
    fn equilibrium_deviation_integrals_match_the_mixture_cp_fit() {
        let equil = EquilibriumExergy::for_excess_air(2.0);
        let (t0, t) = (298.15, 650.0);
        let state = GasState::new(k(t), pa(101_325.0)).unwrap();
        let e = equil.specific_flow_exergy(state, &dead(), None).unwrap();

        // At p = p0 the pressure term vanishes; the remainder must be the
        // deviation integrals of the mixture fit the composition exposes.
        let (a, b) = equil.products().cp_linear_fit_j_kg_k();
        let dh = a * (t - t0) + b / 2.0 * (t * t - t0 * t0);
        let ds = a * (t / t0).ln() + b * (t - t0);
        assert!((e - (dh - t0 * ds)).abs() < 1e-9);
        // Linear fit: the enthalpy integral equals cp at the midpoint times dT
        let cp_mid = equil.products().cp_j_kg_k((t + t0) / 2.0);
        assert!((dh - cp_mid * (t - t0)).abs() < 1e-9);
    }

    #[test]
    fn heat_exergy_carnot_factor() {
        let d = dead();
        // factor = 1 - 298.15/596.3 = 0.5
        let b = heat_exergy_kw(10.0, k(596.3), &d);
        assert!((b - 5.0).abs() < 1e-3);
    }

    #[test]
    fn heat_exergy_zero_at_or_below_dead_state() {
        let d = dead();
        assert_eq!(heat_exergy_kw(10.0, k(298.15), &d), 0.0);
        assert_eq!(heat_exergy_kw(10.0, k(250.0), &d), 0.0);
        assert_eq!(heat_exergy_kw(0.0, k(400.0), &d), 0.0);
    }
}
