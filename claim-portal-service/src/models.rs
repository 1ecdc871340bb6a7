use claim_flow::{ChatMessage, Claim, DetailSession, FileDescriptor, Route};
use serde::{Deserialize, Serialize};

/// Lookup screen form body
#[derive(Debug, Deserialize)]
pub struct LookupFormData {
    #[serde(default)]
    pub claim_id: String,
}

/// Chat form body
#[derive(Debug, Deserialize)]
pub struct MessageFormData {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LookupRequest {
    #[serde(default)]
    pub claim_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResponse {
    pub route: String,
    pub routed_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AttachFilesRequest {
    #[serde(default)]
    pub files: Vec<FileDescriptor>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FileView {
    pub name: String,
    pub size_bytes: u64,
    pub display_size: String,
}

impl From<&FileDescriptor> for FileView {
    fn from(file: &FileDescriptor) -> Self {
        Self {
            name: file.name.clone(),
            size_bytes: file.size_bytes,
            display_size: file.display_size(),
        }
    }
}

/// Everything a client needs to draw the detail screen
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub routed_id: String,
    pub claim: Claim,
    pub messages: Vec<ChatMessage>,
    pub draft: String,
    pub files: Vec<FileView>,
    /// HTML view of this session
    pub view: String,
}

impl From<&DetailSession> for SessionSnapshot {
    fn from(session: &DetailSession) -> Self {
        Self {
            session_id: session.id.clone(),
            routed_id: session.routed_id.clone(),
            claim: session.claim.clone(),
            messages: session.chat.messages().to_vec(),
            draft: session.chat.draft().to_string(),
            files: session.attachments.files().iter().map(FileView::from).collect(),
            view: session_path(session),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub appended: bool,
    #[serde(flatten)]
    pub session: SessionSnapshot,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AttachFilesResponse {
    pub added: usize,
    #[serde(flatten)]
    pub session: SessionSnapshot,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub route: String,
}

/// Path of the HTML view for a mounted session, keeping the routed casing
pub fn session_path(session: &DetailSession) -> String {
    format!("{}/{}", session.route().path(), session.id)
}

/// Path that remounts the detail screen for a routed id
pub fn detail_path(routed_id: &str) -> String {
    Route::Detail(routed_id.to_string()).path()
}
