use thiserror::Error;

pub type QfResult<T> = Result<T, QfError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}
