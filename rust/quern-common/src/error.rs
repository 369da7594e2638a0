use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// True for the recoverable "no record for this document" case, as
    /// opposed to corruption or backend failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::DocumentNotFound { .. })
    }

    pub fn document_not_found(doc_id: u64) -> Error {
        Error(ErrorKind::DocumentNotFound { doc_id }.into())
    }

    pub fn corrupt(message: impl Into<String>) -> Error {
        Error(
            ErrorKind::Corrupt {
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::Io {
                context: context.into(),
                source,
            }
            .into(),
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("document {doc_id} not found")]
    DocumentNotFound { doc_id: u64 },

    #[error("database corruption: {message}")]
    Corrupt { message: String },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("IO error for '{context}': {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io("", e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_recoverable() {
        let err = Error::document_not_found(42);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "document 42 not found");
    }

    #[test]
    fn corruption_carries_diagnostic() {
        let err = Error::corrupt("Too little data for doclen in termlist");
        assert!(!err.is_not_found());
        assert_eq!(
            err.to_string(),
            "database corruption: Too little data for doclen in termlist"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err.kind(), ErrorKind::Io { .. }));
    }

    #[test]
    fn invalid_argument_names_the_argument() {
        let err = Error::invalid_arg("doc_id", "document ids are positive");
        assert_eq!(
            err.to_string(),
            "invalid argument doc_id: document ids are positive"
        );
        assert!(matches!(
            err.into_kind(),
            ErrorKind::InvalidArgument { .. }
        ));
    }
}
