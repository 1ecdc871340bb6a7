use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::{
    claim::Claim,
    error::{PortalError, Result},
};

const BUNDLED_CLAIMS: &str = include_str!("../data/claims.json");

/// Read-only source of claim records
pub trait ClaimSource: Send + Sync {
    /// Case-insensitive lookup; the first matching record in source order wins
    fn find_by_id(&self, id: &str) -> Option<&Claim>;

    /// Number of records available
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Claim dataset held in memory for the lifetime of the process
#[derive(Debug, Clone)]
pub struct StaticClaimDataset {
    claims: Vec<Claim>,
}

impl StaticClaimDataset {
    pub fn new(claims: Vec<Claim>) -> Self {
        warn_on_case_duplicates(&claims);
        Self { claims }
    }

    /// Dataset compiled into the crate
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_CLAIMS)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let claims: Vec<Claim> =
            serde_json::from_str(json).map_err(|e| PortalError::DatasetLoad(e.to_string()))?;
        Ok(Self::new(claims))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| PortalError::DatasetLoad(format!("{}: {}", path.display(), e)))?;
        let dataset = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            claims = dataset.len(),
            "Loaded claim dataset from file"
        );
        Ok(dataset)
    }
}

impl ClaimSource for StaticClaimDataset {
    fn find_by_id(&self, id: &str) -> Option<&Claim> {
        self.claims.iter().find(|claim| claim.matches_id(id))
    }

    fn len(&self) -> usize {
        self.claims.len()
    }
}

/// Identifiers that collide under case folding make lookup order-dependent
fn warn_on_case_duplicates(claims: &[Claim]) {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for claim in claims {
        let folded = claim.claim_id.to_lowercase();
        if let Some(first) = seen.get(&folded) {
            warn!(
                first = %first,
                duplicate = %claim.claim_id,
                "Duplicate claim id under case-insensitive matching; first record wins"
            );
        } else {
            seen.insert(folded, &claim.claim_id);
        }
    }
}
