//! Claim detail screen: re-resolves the routed identifier and, on a match,
//! owns the chat and attachment state for as long as the screen is mounted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    attachments::{AttachmentList, FileDescriptor},
    chat::ChatState,
    claim::Claim,
    dataset::ClaimSource,
    navigation::Route,
};

/// Outcome of mounting the detail screen
#[derive(Debug, Clone)]
pub enum DetailView {
    /// Claim resolved; the session holds all interactive state
    Mounted(DetailSession),
    /// Terminal view. No chat, upload or logout is reachable from here.
    NotFound { routed_id: String },
}

impl DetailView {
    pub fn session(&self) -> Option<&DetailSession> {
        match self {
            DetailView::Mounted(session) => Some(session),
            DetailView::NotFound { .. } => None,
        }
    }

    pub fn into_session(self) -> Option<DetailSession> {
        match self {
            DetailView::Mounted(session) => Some(session),
            DetailView::NotFound { .. } => None,
        }
    }
}

/// Mount the detail screen for a routed identifier
pub fn mount(dataset: &dyn ClaimSource, routed_id: &str) -> DetailView {
    match dataset.find_by_id(routed_id) {
        Some(claim) => {
            let session = DetailSession::new(routed_id, claim.clone());
            info!(
                session_id = %session.id,
                routed_id = %routed_id,
                claim_id = %claim.claim_id,
                "Mounted claim detail session"
            );
            DetailView::Mounted(session)
        }
        None => {
            info!(routed_id = %routed_id, "Claim not found for detail view");
            DetailView::NotFound {
                routed_id: routed_id.to_string(),
            }
        }
    }
}

/// State owned by one mounted detail screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailSession {
    pub id: String,
    /// Identifier from the route, casing as the user typed it
    pub routed_id: String,
    /// Matched record; `claim.claim_id` is the canonical identifier
    pub claim: Claim,
    pub chat: ChatState,
    pub attachments: AttachmentList,
    pub mounted_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl DetailSession {
    pub fn new(routed_id: impl Into<String>, claim: Claim) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            routed_id: routed_id.into(),
            claim,
            chat: ChatState::seeded(),
            attachments: AttachmentList::new(),
            mounted_at: now,
            last_active: now,
        }
    }

    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }

    /// Append a chat message typed by the user; blank text is ignored
    pub fn send_message(&mut self, text: &str) -> bool {
        self.touch();
        self.chat.append(text)
    }

    /// Record a batch of selected files
    pub fn attach_files(&mut self, batch: Vec<FileDescriptor>) -> usize {
        self.touch();
        self.attachments.add_files(batch)
    }

    /// Whether this session was mounted for the given routed identifier
    pub fn belongs_to(&self, routed_id: &str) -> bool {
        self.claim.matches_id(routed_id)
    }

    /// Where logout navigates to
    pub fn logout(&self) -> Route {
        info!(session_id = %self.id, "Logging out of claim detail session");
        Route::Lookup
    }

    pub fn route(&self) -> Route {
        Route::Detail(self.routed_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{claim::sample_claim, dataset::StaticClaimDataset};

    fn dataset() -> StaticClaimDataset {
        StaticClaimDataset::new(vec![sample_claim("ABC123")])
    }

    #[test]
    fn test_mount_matches_case_insensitively() {
        let view = mount(&dataset(), "abc123");
        let session = view.session().expect("claim should mount");
        assert_eq!(session.routed_id, "abc123");
        assert_eq!(session.claim.claim_id, "ABC123");
        assert_eq!(session.chat.len(), 3);
        assert!(session.attachments.is_empty());
    }

    #[test]
    fn test_mount_unknown_is_terminal() {
        let view = mount(&dataset(), "nonexistent");
        assert!(view.session().is_none());
        match view {
            DetailView::NotFound { routed_id } => assert_eq!(routed_id, "nonexistent"),
            DetailView::Mounted(_) => panic!("expected not found"),
        }
    }

    #[test]
    fn test_each_mount_starts_fresh() {
        let mut first = mount(&dataset(), "ABC123").into_session().unwrap();
        first.send_message("Hello");
        first.attach_files(vec![FileDescriptor::new("a.pdf", 10)]);

        let second = mount(&dataset(), "ABC123").into_session().unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(second.chat.len(), 3);
        assert!(second.attachments.is_empty());
    }

    #[test]
    fn test_mutations_touch_last_active() {
        let mut session = DetailSession::new("abc123", sample_claim("ABC123"));
        session.last_active = session.mounted_at - chrono::Duration::minutes(5);
        session.send_message("  ");
        assert!(session.last_active > session.mounted_at - chrono::Duration::minutes(5));
        assert_eq!(session.chat.len(), 3);
    }

    #[test]
    fn test_logout_routes_to_lookup() {
        let session = DetailSession::new("abc123", sample_claim("ABC123"));
        assert_eq!(session.logout(), Route::Lookup);
        assert_eq!(session.route(), Route::Detail("abc123".to_string()));
        assert!(session.belongs_to("ABC123"));
        assert!(!session.belongs_to("XYZ789"));
    }
}
