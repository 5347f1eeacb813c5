use serde::{Deserialize, Serialize};

/// Chat participant, serialized to the lowercase names the wire format uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// An in-memory conversation: one system message followed by alternating
/// user and assistant turns.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub messages: Vec<Message>,
}

impl ChatSession {
    pub fn new(system_prompt: &str) -> Self {
        Self {
            messages: vec![Message::new(Role::System, system_prompt)],
        }
    }

    /// Seed a session with a previously saved transcript.
    pub fn with_history(system_prompt: &str, history: Vec<Message>) -> Self {
        let mut session = Self::new(system_prompt);
        session.messages.extend(history);
        session
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::new(Role::User, content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::new(Role::Assistant, content));
    }

    /// The conversation without the seed system message, for persistence.
    pub fn transcript(&self) -> &[Message] {
        match self.messages.first() {
            Some(first) if first.role == Role::System => &self.messages[1..],
            _ => &self.messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_starts_with_the_system_message() {
        let session = ChatSession::new("You are a helpful assistant.");
        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.messages[0].role, Role::System);
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn turns_accumulate_in_order() {
        let mut session = ChatSession::new("system");
        session.push_user("Hello, how are you?");
        session.push_assistant("Doing well.");
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].role, Role::User);
        assert_eq!(transcript[1].role, Role::Assistant);
    }

    #[test]
    fn saved_history_is_spliced_after_the_system_message() {
        let history = vec![
            Message::new(Role::User, "earlier question"),
            Message::new(Role::Assistant, "earlier answer"),
        ];
        let session = ChatSession::with_history("system", history);
        assert_eq!(session.messages.len(), 3);
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let message = Message::new(Role::Assistant, "hi");
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"assistant\""));
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back.role, Role::Assistant);
    }
}
