use thiserror::Error;

/// Errors produced by claim lookup and detail sessions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortalError {
    /// The submitted claim identifier was blank after trimming
    #[error("Claim ID is required")]
    ClaimIdRequired,

    /// The lookup screen found no claim for the submitted identifier
    #[error("Invalid Claim ID")]
    InvalidClaimId(String),

    /// The detail screen found no claim for the routed identifier
    #[error("Claim not found")]
    ClaimNotFound(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Failed to load claim dataset: {0}")]
    DatasetLoad(String),

    #[error("Session storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            PortalError::ClaimIdRequired.to_string(),
            "Claim ID is required"
        );
        assert_eq!(
            PortalError::InvalidClaimId("ZZZ999".to_string()).to_string(),
            "Invalid Claim ID"
        );
        assert_eq!(
            PortalError::ClaimNotFound("nonexistent".to_string()).to_string(),
            "Claim not found"
        );
    }
}
