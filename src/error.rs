use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RlweError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid modulus: {modulus}")]
    InvalidModulus { modulus: i64 },

    #[error("Degenerate modulus: arithmetic modulo 1 is undefined")]
    DegenerateModulus,

    #[error("Invalid degree: {degree}")]
    InvalidDegree { degree: usize },

    #[error("Modulus polynomial mismatch: {0}")]
    DegreeMismatch(String),

    #[error("Prime search exhausted after {attempts} attempts")]
    SearchExhausted { attempts: usize },
}

pub type Result<T> = std::result::Result<T, RlweError>;
