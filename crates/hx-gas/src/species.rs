//! Chemical species definitions.

/// Species relevant to turboshaft combustion: dry-air constituents,
/// combustion products, and the Jet-A fuel surrogate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Oxygen (O₂)
    O2,
    /// Nitrogen (N₂)
    N2,
    /// Argon (Ar)
    Ar,
    /// Carbon dioxide (CO₂)
    CO2,
    /// Water vapor (H₂O)
    H2O,
    /// Jet-A surrogate (C₁₂H₂₃)
    JetA,
}

impl Species {
    pub const ALL: [Species; 6] = [
        Species::O2,
        Species::N2,
        Species::Ar,
        Species::CO2,
        Species::H2O,
        Species::JetA,
    ];

    /// Molar mass [g/mol].
    pub fn molar_mass_g_mol(self) -> f64 {
        match self {
            Species::O2 => 32.00,
            Species::N2 => 28.0134,
            Species::Ar => 39.948,
            Species::CO2 => 44.01,
            Species::H2O => 18.015,
            Species::JetA => 170.34,
        }
    }

    /// Specific heat at constant pressure [J/(kg K)] as a linear fit
    /// cp(T) = a + b T, valid roughly 300-1500 K.
    ///
    /// Used by the equilibrium exergy strategy; the closed-form strategy
    /// carries its own constant cp for air.
    pub fn cp_linear_fit(self) -> (f64, f64) {
        match self {
            Species::O2 => (862.5, 0.185),
            Species::N2 => (989.0, 0.170),
            Species::Ar => (520.3, 0.0),
            Species::CO2 => (726.0, 0.400),
            Species::H2O => (1680.0, 0.613),
            // Fuel never appears in gas-phase property evaluation
            Species::JetA => (2000.0, 0.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Species::O2 => "O2",
            Species::N2 => "N2",
            Species::Ar => "Ar",
            Species::CO2 => "CO2",
            Species::H2O => "H2O",
            Species::JetA => "Jet-A",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn molar_masses_positive() {
        for sp in Species::ALL {
            assert!(sp.molar_mass_g_mol() > 0.0, "{}", sp.label());
        }
    }

    #[test]
    fn cp_fits_positive_over_range() {
        for sp in Species::ALL {
            let (a, b) = sp.cp_linear_fit();
            assert!(a + b * 300.0 > 0.0);
            assert!(a + b * 1500.0 > 0.0);
        }
    }
}
