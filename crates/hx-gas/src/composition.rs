//! Gas composition handling (mole fractions).

use crate::error::{GasError, GasResult};
use crate::species::Species;
use hx_core::units::constants::R_UNIVERSAL_J_MOL_K;

/// Normalized mole-fraction composition of a gas mixture.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    fractions: Vec<(Species, f64)>,
}

impl Composition {
    /// Build a composition from raw mole amounts or fractions.
    ///
    /// Entries are normalized to sum to one; zero entries are dropped.
    pub fn new_mole_fractions(entries: Vec<(Species, f64)>) -> GasResult<Self> {
        let mut sum = 0.0;
        for (_, f) in &entries {
            if !f.is_finite() || *f < 0.0 {
                return Err(GasError::InvalidArg {
                    what: "mole fractions must be finite and non-negative",
                });
            }
            sum += f;
        }
        if sum <= 0.0 {
            return Err(GasError::InvalidArg {
                what: "mole fractions must not sum to zero",
            });
        }

        let fractions = entries
            .into_iter()
            .filter(|(_, f)| *f > 0.0)
            .map(|(sp, f)| (sp, f / sum))
            .collect();

        Ok(Self { fractions })
    }

    /// Dry-air reference composition (mole fractions).
    pub fn dry_air() -> Self {
        // Tabulated fractions sum to 1.0001; normalize directly.
        const SUM: f64 = 0.2095 + 0.7809 + 0.0093 + 0.0004;
        Self {
            fractions: vec![
                (Species::O2, 0.2095 / SUM),
                (Species::N2, 0.7809 / SUM),
                (Species::Ar, 0.0093 / SUM),
                (Species::CO2, 0.0004 / SUM),
            ],
        }
    }

    pub fn mole_fraction(&self, species: Species) -> f64 {
        self.fractions
            .iter()
            .find(|(sp, _)| *sp == species)
            .map(|(_, f)| *f)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Species, f64)> + '_ {
        self.fractions.iter().copied()
    }

    /// Mixture molar mass [g/mol].
    pub fn molar_mass_g_mol(&self) -> f64 {
        self.fractions
            .iter()
            .map(|(sp, f)| f * sp.molar_mass_g_mol())
            .sum()
    }

    /// Mass fraction of one species in the mixture.
    pub fn mass_fraction(&self, species: Species) -> f64 {
        let m_mix = self.molar_mass_g_mol();
        if m_mix <= 0.0 {
            return 0.0;
        }
        self.mole_fraction(species) * species.molar_mass_g_mol() / m_mix
    }

    /// Mixture specific gas constant [J/(kg K)].
    pub fn gas_constant_j_kg_k(&self) -> f64 {
        let m_kg_mol = self.molar_mass_g_mol() / 1000.0;
        if m_kg_mol <= 0.0 {
            return 0.0;
        }
        R_UNIVERSAL_J_MOL_K / m_kg_mol
    }

    /// Mass-weighted `(a, b)` coefficients of the mixture cp linear fit,
    /// cp(T) = a + b T [J/(kg K)].
    pub fn cp_linear_fit_j_kg_k(&self) -> (f64, f64) {
        self.fractions
            .iter()
            .map(|(sp, _)| {
                let (a, b) = sp.cp_linear_fit();
                let y = self.mass_fraction(*sp);
                (y * a, y * b)
            })
            .fold((0.0, 0.0), |(sa, sb), (a, b)| (sa + a, sb + b))
    }

    /// Mixture specific heat at constant pressure [J/(kg K)] at temperature T.
    pub fn cp_j_kg_k(&self, t_k: f64) -> f64 {
        let (a, b) = self.cp_linear_fit_j_kg_k();
        a + b * t_k
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hx_core::numeric::{nearly_equal, Tolerances};

    #[test]
    fn dry_air_molar_mass() {
        let air = Composition::dry_air();
        let m = air.molar_mass_g_mol();
        assert!((m - 28.97).abs() < 0.05, "M_air = {m}");
    }

    #[test]
    fn dry_air_o2_mass_fraction() {
        let air = Composition::dry_air();
        let y = air.mass_fraction(Species::O2);
        assert!((y - 0.2314).abs() < 0.001, "y_O2 = {y}");
    }

    #[test]
    fn air_gas_constant_close_to_287() {
        let air = Composition::dry_air();
        let r = air.gas_constant_j_kg_k();
        assert!((r - 287.0).abs() < 1.0, "R_air = {r}");
    }

    #[test]
    fn normalization() {
        let comp =
            Composition::new_mole_fractions(vec![(Species::O2, 1.0), (Species::N2, 4.0)]).unwrap();
        let tol = Tolerances::default();
        assert!(nearly_equal(comp.mole_fraction(Species::O2), 0.2, tol));
        assert!(nearly_equal(comp.mole_fraction(Species::N2), 0.8, tol));
    }

    #[test]
    fn invalid_negative_fraction() {
        let result = Composition::new_mole_fractions(vec![(Species::O2, -0.5), (Species::N2, 1.5)]);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_zero_sum() {
        let result = Composition::new_mole_fractions(vec![(Species::O2, 0.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn cp_increases_with_temperature() {
        let air = Composition::dry_air();
        assert!(air.cp_j_kg_k(1200.0) > air.cp_j_kg_k(300.0));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use hx_core::numeric::{nearly_equal, Tolerances};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalized_sum_is_one(fracs in prop::collection::vec(0.0_f64..1.0_f64, 1..5)) {
            let species = [Species::O2, Species::N2, Species::Ar, Species::CO2, Species::H2O];
            let entries: Vec<(Species, f64)> = fracs
                .iter()
                .enumerate()
                .map(|(i, &f)| (species[i % species.len()], f))
                .collect();

            if let Ok(comp) = Composition::new_mole_fractions(entries) {
                let sum: f64 = comp.iter().map(|(_, f)| f).sum();
                let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
                prop_assert!(nearly_equal(sum, 1.0, tol));
            }
        }
    }
}
