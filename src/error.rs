use thiserror::Error;

/// Failure of a single query against the posts API.
///
/// Cloneable so one result can be handed to every caller that joined the
/// same in-flight request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Post {0} not found")]
    NotFound(u64),
}

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExplorerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_render_human_readable_messages() {
        assert_eq!(
            FetchError::Network("connection refused".into()).to_string(),
            "Network error: connection refused"
        );
        assert_eq!(FetchError::NotFound(999).to_string(), "Post 999 not found");
    }

    #[test]
    fn fetch_error_converts_transparently() {
        let err: ExplorerError = FetchError::NotFound(3).into();
        assert_eq!(err.to_string(), "Post 3 not found");
    }

    #[test]
    fn terminal_io_failure_is_wrapped() {
        fn draw() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed"))?;
            Ok(())
        }

        let err = draw().unwrap_err();
        assert!(matches!(err, ExplorerError::Io(_)));
        assert_eq!(err.to_string(), "IO error: stdout closed");
    }
}
