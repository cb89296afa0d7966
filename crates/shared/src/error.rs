use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    IncompleteForm,
    MobileTooShort,
    InvalidSelection,
    CatalogUnavailable,
    EmptyCatalog,
    StepMismatch,
    UnknownField,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct RegistrationError {
    pub kind: ErrorKind,
    pub message: String,
}

impl RegistrationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}
