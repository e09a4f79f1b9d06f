use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProblemError {
    #[error("Operand {value} is outside the two-digit range 0..=99")]
    OperandOutOfRange { value: i32 },

    #[error("Invalid generator config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ProblemResult<T> = Result<T, ProblemError>;
