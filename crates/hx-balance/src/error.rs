use hx_core::HxError;
use hx_gas::GasError;
use thiserror::Error;

pub type BalanceResult<T> = Result<T, BalanceError>;

#[derive(Error, Debug)]
pub enum BalanceError {
    #[error("Gas model error: {0}")]
    Gas(#[from] GasError),

    #[error("Numeric error: {0}")]
    Numeric(#[from] HxError),

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
