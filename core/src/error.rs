use thiserror::Error;

use crate::binding::BindingError;

/// Errors raised while importing a pattern.
///
/// Only [`ImportError::BindingExecution`] aborts [`crate::materialize`]. The
/// others are raised by the individual passes and turned into
/// [`ImportWarning`]s for the object being processed.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Binding execution failed: {0}")]
    BindingExecution(#[from] BindingError),

    #[error("Argument {0} does not exist in import pattern")]
    UnknownArgument(String),

    #[error("Path {path} is deeper than {max_depth} levels")]
    DepthExceeded { path: String, max_depth: usize },

    #[error("Importer call {call} failed for {path}: {source}")]
    Importer {
        call: &'static str,
        path: String,
        source: anyhow::Error,
    },

    #[error("Host error: {0}")]
    Host(#[from] anyhow::Error),
}

impl ImportError {
    pub(crate) fn importer(call: &'static str, path: &str) -> impl FnOnce(anyhow::Error) -> Self {
        let path = path.to_string();
        move |source| Self::Importer { call, path, source }
    }
}

/// Category of a recoverable issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    UnsupportedObjectType,
    UnsupportedGeometry,
    MalformedGeometry,
    DeformingShape,
    PropertyTypeMismatch,
    ArgumentSkipped,
    DepthExceeded,
    ImporterFailure,
    HostFailure,
}

/// A recoverable issue. The affected object was skipped or partially imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportWarning {
    pub kind: WarningKind,
    /// Instance path of the object, or the argument name.
    pub subject: String,
    pub message: String,
}

impl ImportWarning {
    pub fn new(kind: WarningKind, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub(crate) fn from_error(subject: impl Into<String>, error: &ImportError) -> Self {
        let kind = match error {
            ImportError::DepthExceeded { .. } => WarningKind::DepthExceeded,
            ImportError::Host(_) => WarningKind::HostFailure,
            ImportError::UnknownArgument(_) => WarningKind::ArgumentSkipped,
            ImportError::BindingExecution(_) | ImportError::Importer { .. } => {
                WarningKind::ImporterFailure
            }
        };
        Self::new(kind, subject, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_error_display() {
        let error = ImportError::from(BindingError::new("node 'solve' failed"));
        assert_eq!(error.to_string(), "Binding execution failed: node 'solve' failed");
    }

    #[test]
    fn test_unknown_argument_display() {
        let error = ImportError::UnknownArgument("radius".to_string());
        assert_eq!(error.to_string(), "Argument radius does not exist in import pattern");
    }

    #[test]
    fn test_importer_error_keeps_source() {
        let make = ImportError::importer("getGeometry", "/World/Sphere");
        let error = make(anyhow::anyhow!("broken mesh"));

        assert_eq!(
            error.to_string(),
            "Importer call getGeometry failed for /World/Sphere: broken mesh"
        );
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_warning_from_error() {
        let error = ImportError::DepthExceeded {
            path: "a/b/c".to_string(),
            max_depth: 2,
        };
        let warning = ImportWarning::from_error("/a/b/c", &error);

        assert_eq!(warning.kind, WarningKind::DepthExceeded);
        assert_eq!(warning.subject, "/a/b/c");
        assert_eq!(warning.message, "Path a/b/c is deeper than 2 levels");
    }
}
