#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("route already exists: {signature}")]
    DuplicateRoute { signature: String },

    #[error("capture name can not be empty: pattern = {pattern:?}")]
    EmptyParameterName { pattern: String },

    #[error("parameters must be separated by literal text: pattern = {pattern:?}")]
    AdjacentParameters { pattern: String },

    #[error("invalid constraint {rule:?}: pattern = {pattern:?}")]
    InvalidConstraint {
        pattern: String,
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("route not found")]
    NotFound,
}

impl RouterError {
    /// The colliding signature of a [`RouterError::DuplicateRoute`].
    pub fn signature(&self) -> Option<&str> {
        match self {
            Self::DuplicateRoute { signature } => Some(signature),
            _ => None,
        }
    }
}
