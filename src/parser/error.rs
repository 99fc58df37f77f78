use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Web domain consistency check failed; the whole request must be rejected.
    #[error("Found multiple web domains: valid={valid}, child={child}")]
    DomainConflict { valid: String, child: String },

    /// Save-flow classification is not implemented.
    #[error("Saving data is currently not implemented")]
    UnsupportedPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_conflict_names_both_domains() {
        let err = ParseError::DomainConflict {
            valid: "example.com".to_string(),
            child: "example.com".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("multiple web domains"));
        assert!(display.contains("valid=example.com"));
        assert!(display.contains("child=example.com"));
    }

    #[test]
    fn unsupported_path_mentions_saving() {
        assert!(ParseError::UnsupportedPath.to_string().contains("Saving"));
    }
}
