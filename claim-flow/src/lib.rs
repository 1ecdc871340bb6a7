pub mod attachments;
pub mod chat;
pub mod claim;
pub mod dataset;
pub mod detail;
pub mod error;
pub mod lookup;
pub mod navigation;
pub mod storage;

// Re-export commonly used types
pub use attachments::{AttachmentList, FileDescriptor};
pub use chat::{ChatMessage, ChatState, Sender};
pub use claim::Claim;
pub use dataset::{ClaimSource, StaticClaimDataset};
pub use detail::{DetailSession, DetailView};
pub use error::{PortalError, Result};
pub use lookup::{LookupFailure, LookupForm};
pub use navigation::Route;
pub use storage::{InMemorySessionStorage, SessionStorage};
