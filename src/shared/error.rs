use thiserror::Error;

/// Failures that end the current exploration.
///
/// Uses thiserror to derive Display and Error traits automatically.
/// Every variant except `Cancelled` is reported to the user; a fatal
/// variant leaves any previously displayed results untouched.
#[derive(Debug, Error)]
pub enum ExploreError {
    /// Latest-version resolution came back empty. Nothing to fetch.
    #[error("could not determine a version for {package}\n\n💡 Hint: pass an explicit version, or check the package name and ecosystem")]
    VersionResolution { package: String },

    /// The dependency listing backend answered 404.
    ///
    /// The message is user-facing verbatim; do not reword it.
    #[error("package not found")]
    PackageNotFound,

    /// Non-2xx response with a non-empty body: the body is the message.
    #[error("{body}")]
    Upstream { body: String },

    /// Non-2xx response with an empty body.
    #[error("request failed: {status}")]
    UpstreamStatus { status: u16 },

    /// The operation was aborted by the caller. Silent: callers return to
    /// idle without surfacing anything.
    #[error("operation cancelled")]
    Cancelled,
}

impl ExploreError {
    /// Maps an upstream HTTP status and body to the matching variant.
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 404 {
            return ExploreError::PackageNotFound;
        }
        if body.trim().is_empty() {
            ExploreError::UpstreamStatus { status }
        } else {
            ExploreError::Upstream {
                body: body.to_string(),
            }
        }
    }

    /// True for the cancellation variant, which must never be shown.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ExploreError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_is_verbatim() {
        let err = ExploreError::from_status(404, "ignored body");
        assert_eq!(format!("{}", err), "package not found");
    }

    #[test]
    fn test_upstream_uses_body_text() {
        let err = ExploreError::from_status(502, "upstream registry unreachable");
        assert_eq!(format!("{}", err), "upstream registry unreachable");
    }

    #[test]
    fn test_upstream_empty_body_names_status() {
        let err = ExploreError::from_status(500, "   ");
        assert_eq!(format!("{}", err), "request failed: 500");
    }

    #[test]
    fn test_cancelled_is_silent_marker() {
        assert!(ExploreError::Cancelled.is_cancelled());
        assert!(!ExploreError::PackageNotFound.is_cancelled());
    }
}
