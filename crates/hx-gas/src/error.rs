use thiserror::Error;

pub type GasResult<T> = Result<T, GasError>;

#[derive(Error, Debug, Clone)]
pub enum GasError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
