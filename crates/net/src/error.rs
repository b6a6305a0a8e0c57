use thiserror::Error;

/// Failure taxonomy of a model request. Only the transient variants are
/// retried by the orchestrator; everything else aborts immediately.
#[derive(Debug, Error)]
pub enum NetError {
    #[error("rate limited by the model endpoint")]
    RateLimited,
    #[error("request timed out")]
    Timeout,
    #[error("connection reset")]
    ConnectionReset,
    #[error("dns lookup failed")]
    Dns,
    #[error("authentication rejected by the model endpoint")]
    Auth,
    #[error("invalid request: {0}")]
    BadRequest(String),
    #[error("model endpoint returned http status {0}")]
    Status(u16),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("transport failure: {0}")]
    Transport(String),
}

impl NetError {
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            NetError::RateLimited | NetError::Timeout | NetError::ConnectionReset | NetError::Dns
        )
    }

    pub(crate) fn from_status(status: u16, body: &str) -> NetError {
        match status {
            429 => NetError::RateLimited,
            408 => NetError::Timeout,
            401 | 403 => NetError::Auth,
            400 | 422 => NetError::BadRequest(truncate(body)),
            _ if body.to_ascii_lowercase().contains("too many requests") => NetError::RateLimited,
            _ => NetError::Status(status),
        }
    }

    pub(crate) fn from_io(err: &std::io::Error) -> NetError {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::TimedOut | ErrorKind::WouldBlock => NetError::Timeout,
            ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted | ErrorKind::BrokenPipe => {
                NetError::ConnectionReset
            }
            _ => NetError::Transport(err.to_string()),
        }
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::NetError;

    #[test]
    fn only_listed_failures_are_transient() {
        assert!(NetError::RateLimited.is_transient());
        assert!(NetError::Timeout.is_transient());
        assert!(NetError::ConnectionReset.is_transient());
        assert!(NetError::Dns.is_transient());

        assert!(!NetError::Auth.is_transient());
        assert!(!NetError::BadRequest("x".into()).is_transient());
        assert!(!NetError::Status(500).is_transient());
        assert!(!NetError::Config("missing key".into()).is_transient());
    }

    #[test]
    fn status_classification_matches_taxonomy() {
        assert!(matches!(NetError::from_status(429, ""), NetError::RateLimited));
        assert!(matches!(NetError::from_status(408, ""), NetError::Timeout));
        assert!(matches!(NetError::from_status(401, ""), NetError::Auth));
        assert!(matches!(NetError::from_status(400, "bad"), NetError::BadRequest(_)));
        assert!(matches!(
            NetError::from_status(503, "Too Many Requests queued"),
            NetError::RateLimited
        ));
        assert!(matches!(NetError::from_status(500, ""), NetError::Status(500)));
    }

    #[test]
    fn io_errors_map_to_timeout_and_reset() {
        use std::io::{Error, ErrorKind};
        assert!(matches!(
            NetError::from_io(&Error::new(ErrorKind::TimedOut, "t")),
            NetError::Timeout
        ));
        assert!(matches!(
            NetError::from_io(&Error::new(ErrorKind::ConnectionReset, "r")),
            NetError::ConnectionReset
        ));
        assert!(matches!(
            NetError::from_io(&Error::other("x")),
            NetError::Transport(_)
        ));
    }
}
