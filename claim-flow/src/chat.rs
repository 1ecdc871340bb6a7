use serde::{Deserialize, Serialize};

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Insurer,
}

impl Sender {
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Insurer => "Insurer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn insurer(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Insurer,
            text: text.into(),
        }
    }
}

/// Scripted conversation every detail session starts with
pub fn seed_transcript() -> Vec<ChatMessage> {
    vec![
        ChatMessage::insurer("Hello, please upload your supporting documents."),
        ChatMessage::user("Okay, I’ll upload them soon."),
        ChatMessage::insurer("Please provide the documents as soon as possible."),
    ]
}

/// Append-only chat transcript plus the pending input field.
///
/// Messages are never edited or removed. There is no automated insurer reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatState {
    messages: Vec<ChatMessage>,
    draft: String,
}

impl ChatState {
    pub fn seeded() -> Self {
        Self {
            messages: seed_transcript(),
            draft: String::new(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Append a user message. Blank text is a no-op and leaves the draft alone;
    /// otherwise the text is stored as typed and the draft is cleared.
    pub fn append(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.messages.push(ChatMessage::user(text));
        self.draft.clear();
        true
    }

    /// Send whatever is in the draft
    pub fn send(&mut self) -> bool {
        let draft = std::mem::take(&mut self.draft);
        let sent = self.append(&draft);
        if !sent {
            self.draft = draft;
        }
        sent
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_with_three_scripted_messages() {
        let chat = ChatState::seeded();
        assert_eq!(chat.len(), 3);
        assert_eq!(chat.messages()[0].sender, Sender::Insurer);
        assert_eq!(chat.messages()[1].sender, Sender::User);
        assert_eq!(chat.messages()[2].sender, Sender::Insurer);
        assert_eq!(chat.draft(), "");
    }

    #[test]
    fn test_append_grows_by_one_user_message() {
        let mut chat = ChatState::seeded();
        assert!(chat.append("Hello"));
        assert_eq!(chat.len(), 4);
        assert_eq!(chat.messages().last(), Some(&ChatMessage::user("Hello")));
    }

    #[test]
    fn test_append_blank_is_noop() {
        let mut chat = ChatState::seeded();
        chat.set_draft("   ");
        assert!(!chat.append(""));
        assert!(!chat.append("   "));
        assert_eq!(chat.messages(), seed_transcript().as_slice());
        assert_eq!(chat.draft(), "   ");
    }

    #[test]
    fn test_append_keeps_text_untrimmed() {
        let mut chat = ChatState::seeded();
        chat.append("  spaced  ");
        assert_eq!(chat.messages().last().unwrap().text, "  spaced  ");
    }

    #[test]
    fn test_send_clears_draft() {
        let mut chat = ChatState::seeded();
        chat.set_draft("Hello");
        assert!(chat.send());
        assert_eq!(chat.draft(), "");
        assert_eq!(chat.messages().last().unwrap().text, "Hello");
    }

    #[test]
    fn test_send_blank_draft_keeps_it() {
        let mut chat = ChatState::seeded();
        chat.set_draft("  ");
        assert!(!chat.send());
        assert_eq!(chat.draft(), "  ");
        assert_eq!(chat.len(), 3);
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let json = serde_json::to_value(ChatMessage::insurer("hi")).unwrap();
        assert_eq!(json["sender"], "insurer");
    }
}
