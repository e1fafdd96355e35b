use thiserror::Error;

/// Every failure in this crate is a caller-correctable input problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinGenieError {
    #[error("Invalid argument: {field} — {reason}")]
    InvalidArgument { field: String, reason: String },
}

impl FinGenieError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FinGenieError::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending input field.
    pub fn field(&self) -> &str {
        match self {
            FinGenieError::InvalidArgument { field, .. } => field,
        }
    }
}
