//! hx-gas: gas-side models for the exergy balance.
//!
//! Provides:
//! - Chemical species definitions (combustion air and product gases + Jet-A)
//! - Composition handling (dry air, combustion products)
//! - Stagnation/isentropic state relations
//! - Combustion stoichiometry (air flow, AFR, equivalence ratio)
//! - ExergyModel trait with two evaluation strategies
//!
//! # Architecture
//!
//! The `ExergyModel` trait isolates the balance engine from the property
//! evaluation strategy. Two implementations exist:
//! - `IdealGasExergy`: closed-form relation with constant cp and R (used by
//!   the balance engine for air and bleed streams)
//! - `EquilibriumExergy`: combustion-product composition at a given
//!   equivalence ratio with composition-derived R and temperature-dependent cp
//!
//! The two strategies are never mixed silently; the caller picks one.

pub mod combustion;
pub mod composition;
pub mod error;
pub mod exergy;
pub mod species;
pub mod state;

// Re-exports for ergonomics
pub use combustion::{air_fuel_flow, AirFuelFlow};
pub use composition::Composition;
pub use error::{GasError, GasResult};
pub use exergy::{heat_exergy_kw, DeadState, EquilibriumExergy, ExergyModel, IdealGasExergy};
pub use species::Species;
pub use state::GasState;
