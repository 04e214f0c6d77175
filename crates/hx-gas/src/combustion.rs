//! Combustion stoichiometry: air mass flow, air-fuel ratios, equivalence
//! ratio and excess air from measured fuel flow and fuel-air ratio.

use crate::composition::Composition;
use crate::species::Species;

/// Moles of O2 consumed per mole of Jet-A fuel at stoichiometry (engine-deck
/// value for the POSF 10325 surrogate).
pub const STOICH_O2_MOLES_PER_FUEL_MOLE: f64 = 16.5;

/// Derived air/fuel flow quantities for one sample.
///
/// All outputs are zero when the engine is inactive (fuel flow or FAR zero);
/// that is the expected idle/glide state, not an error. The stoichiometric
/// ratio is composition-derived and reported even then.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirFuelFlow {
    /// Inlet air mass flow [kg/s]
    pub mdot_air_kg_s: f64,
    /// Stoichiometric air-fuel ratio (mass)
    pub afr_stoich: f64,
    /// Real air-fuel ratio adjusted by combustion efficiency
    pub afr_real_adjusted: f64,
    /// Excess-air fraction (adjusted/stoichiometric - 1)
    pub excess_air: f64,
    /// Equivalence ratio φ = stoichiometric/real
    pub phi: f64,
}

/// Stoichiometric air-fuel mass ratio from the fuel molar O2 demand and the
/// O2 mass fraction of dry air.
pub fn stoichiometric_afr() -> f64 {
    let m_fuel_kg_mol = Species::JetA.molar_mass_g_mol() / 1000.0;
    let m_o2_kg_mol = Species::O2.molar_mass_g_mol() / 1000.0;
    let y_o2_air = Composition::dry_air().mass_fraction(Species::O2);
    (STOICH_O2_MOLES_PER_FUEL_MOLE * m_o2_kg_mol) / (m_fuel_kg_mol * y_o2_air)
}

/// Derive air flow and mixture ratios from fuel flow and the engine's
/// measured fuel-air ratio.
///
/// `combustion_efficiency` inflates the real AFR (imperfect combustion needs
/// more air per unit of burned fuel).
pub fn air_fuel_flow(mdot_fuel_kg_s: f64, far: f64, combustion_efficiency: f64) -> AirFuelFlow {
    let afr_stoich = stoichiometric_afr();

    if far == 0.0 || mdot_fuel_kg_s == 0.0 {
        return AirFuelFlow {
            mdot_air_kg_s: 0.0,
            afr_stoich,
            afr_real_adjusted: 0.0,
            excess_air: 0.0,
            phi: 0.0,
        };
    }

    let afr_real = 1.0 / far;
    let phi = afr_stoich / afr_real;
    let afr_real_adjusted = afr_real / combustion_efficiency;
    let excess_air = afr_real_adjusted / afr_stoich - 1.0;
    let mdot_air_kg_s = mdot_fuel_kg_s * afr_real_adjusted;

    AirFuelFlow {
        mdot_air_kg_s,
        afr_stoich,
        afr_real_adjusted,
        excess_air,
        phi,
    }
}

/// Complete-combustion product composition for the C12H23 Jet-A surrogate at
/// the given excess-air fraction.
///
/// Per mole of fuel: 12 CO2 + 11.5 H2O, with the O2 demand 12 + 23/4 = 17.75
/// scaled by (1 + excess air) of supplied air; leftover O2 plus the air's N2,
/// Ar and CO2 pass through.
pub fn combustion_products(excess_air: f64) -> Composition {
    const N_C: f64 = 12.0;
    const N_H: f64 = 23.0;
    let o2_stoich = N_C + N_H / 4.0;

    let air = Composition::dry_air();
    let excess = excess_air.max(0.0);
    // Moles of air carrying the supplied O2, per mole of fuel.
    let air_moles = o2_stoich * (1.0 + excess) / air.mole_fraction(Species::O2);

    let entries = vec![
        (Species::CO2, N_C + air_moles * air.mole_fraction(Species::CO2)),
        (Species::H2O, N_H / 2.0),
        (Species::O2, o2_stoich * excess),
        (Species::N2, air_moles * air.mole_fraction(Species::N2)),
        (Species::Ar, air_moles * air.mole_fraction(Species::Ar)),
    ];

    // Entries are non-negative with a positive sum for any clamped excess.
    Composition::new_mole_fractions(entries)
        .unwrap_or_else(|_| Composition::dry_air())
}
