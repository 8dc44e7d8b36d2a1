use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("option {key} must be {expected}, got {value:?}")]
    InvalidOption {
        key: String,
        expected: &'static str,
        value: String,
    },

    #[error("option {key} holds a non-scalar value")]
    NonScalar { key: String },
}
