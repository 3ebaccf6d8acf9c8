//! Merge failure types

/// Errors raised while applying an override document.
///
/// Any failing directive aborts the merge immediately; there is no
/// partial-output guarantee beyond mutations applied before the failing
/// key. Callers needing atomicity should merge into a clone and commit
/// only on success.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// A remove/append/match directive referenced a property the output
    /// does not have
    #[error("{directive} directive target '{name}' does not exist on the output")]
    DirectiveTargetMissing {
        name: String,
        directive: &'static str,
    },

    /// An append/match directive was applied to a value of the wrong shape
    #[error("invalid {directive} directive target '{name}': {reason}")]
    InvalidDirectiveTarget {
        name: String,
        directive: &'static str,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_target_message_names_property() {
        let err = TransformError::DirectiveTargetMissing {
            name: "logging".to_string(),
            directive: "remove",
        };
        let message = err.to_string();
        assert!(message.contains("remove"));
        assert!(message.contains("'logging'"));
    }

    #[test]
    fn test_invalid_target_message_carries_reason() {
        let err = TransformError::InvalidDirectiveTarget {
            name: "items".to_string(),
            directive: "append",
            reason: "output property is not an array".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("append"));
        assert!(message.contains("not an array"));
    }
}
