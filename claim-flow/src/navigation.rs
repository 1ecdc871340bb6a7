use serde::{Deserialize, Serialize};

const DETAIL_PREFIX: &str = "/home/";

/// The two screens of the portal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// Claim id entry screen, served at `/`
    Lookup,
    /// Claim detail screen for the routed identifier, served at `/home/{id}`
    Detail(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Lookup => "/".to_string(),
            Route::Detail(id) => format!("{}{}", DETAIL_PREFIX, urlencoding::encode(id)),
        }
    }

    pub fn routed_id(&self) -> Option<&str> {
        match self {
            Route::Lookup => None,
            Route::Detail(id) => Some(id),
        }
    }
}
