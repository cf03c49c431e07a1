use thiserror::Error;

pub type ProjResult<T> = Result<T, ProjError>;

#[derive(Debug, Error)]
pub enum ProjError {
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("Unknown map projection: {name}")]
    UnknownFamily { name: String },
}

impl ProjError {
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    pub fn unknown_family(name: impl Into<String>) -> Self {
        Self::UnknownFamily { name: name.into() }
    }
}
