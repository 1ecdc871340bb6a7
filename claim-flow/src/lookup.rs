//! Claim id entry: trims the input, matches it case-insensitively against the
//! dataset and decides whether to navigate to the detail screen.

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    dataset::ClaimSource,
    error::{PortalError, Result},
    navigation::Route,
};

/// Resolve a submitted claim id to the route to navigate to.
///
/// The returned route carries the trimmed input with its original casing,
/// not the stored identifier.
pub fn submit(dataset: &dyn ClaimSource, raw_input: &str) -> Result<Route> {
    let routed_id = raw_input.trim();
    if routed_id.is_empty() {
        debug!("Rejected blank claim id");
        return Err(PortalError::ClaimIdRequired);
    }

    match dataset.find_by_id(routed_id) {
        Some(claim) => {
            info!(
                routed_id = %routed_id,
                claim_id = %claim.claim_id,
                "Claim lookup matched"
            );
            Ok(Route::Detail(routed_id.to_string()))
        }
        None => {
            info!(routed_id = %routed_id, "Claim lookup found no match");
            Err(PortalError::InvalidClaimId(routed_id.to_string()))
        }
    }
}

/// State of the lookup form between renders
#[derive(Debug, Clone, Default, Serialize)]
pub struct LookupForm {
    /// Field value exactly as typed
    pub input: String,
    pub error: Option<LookupFailure>,
}

/// Why the last submit did not navigate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupFailure {
    /// Shown inline next to the field
    Required,
    /// Shown as a blocking alert
    InvalidClaimId,
}

impl LookupFailure {
    pub fn message(&self) -> &'static str {
        match self {
            LookupFailure::Required => "Claim ID is required",
            LookupFailure::InvalidClaimId => "Invalid Claim ID",
        }
    }
}

impl LookupForm {
    pub fn with_input(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            error: None,
        }
    }

    /// Submit the current field value. On failure the field keeps its value
    /// and `error` records why.
    pub fn submit(&mut self, dataset: &dyn ClaimSource) -> Result<Route> {
        let outcome = submit(dataset, &self.input);
        self.error = match &outcome {
            Ok(_) => None,
            Err(PortalError::ClaimIdRequired) => Some(LookupFailure::Required),
            Err(_) => Some(LookupFailure::InvalidClaimId),
        };
        outcome
    }
}
