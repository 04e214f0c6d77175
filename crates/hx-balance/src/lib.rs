//! hx-balance: per-sample exergy/energy balance engine.
//!
//! The chain of component models (thermal engine, gearbox, thermal
//! propeller, battery, inverter, MTRB and WTP electric machines, wingtip
//! propeller) converts mission telemetry into instantaneous power flows,
//! exergy destruction/loss terms and second-law efficiencies, then
//! aggregates them into whole-system metrics.
//!
//! Invariants enforced throughout:
//! - every destruction/loss term is clamped to >= 0 (negative raw values are
//!   measurement/model noise, not reverse flow)
//! - every efficiency is zero-guarded and clamped to [0, 1]
//! - operating modes (motor/generator, discharge/charge/direct-supply) are
//!   resolved once per sample into explicit enums; downstream formulas are
//!   total functions of the selected mode

pub mod analysis;
pub mod battery;
pub mod config;
pub mod energy;
pub mod engine;
pub mod error;
pub mod gearbox;
pub mod inverter;
pub mod motor;
pub mod propeller;
pub mod result;
pub mod wingtip;

pub use analysis::ExergyAnalysis;
pub use battery::{Battery, BatteryBalance};
pub use config::AnalysisConfig;
pub use energy::{energy_series, EnergyBalanceResult};
pub use engine::{ThermalEngine, EngineBalance};
pub use error::{BalanceError, BalanceResult};
pub use gearbox::{Gearbox, GearboxBalance, PropulsionMode};
pub use inverter::{Inverter, InverterBalance, InverterMode};
pub use motor::{MachineMode, MtrbBalance, MtrbMachine, WtpBalance, WtpMotor};
pub use propeller::{ThermalPropeller, PropellerBalance};
pub use result::ExergyBalanceResult;
pub use wingtip::{WingtipPropeller, WingtipBalance};
