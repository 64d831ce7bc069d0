//! Chat transcript (append-only)

/// Chat role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    /// Append a user message and its reply, in that order
    pub fn push_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.turns.push(ChatTurn {
            role: ChatRole::User,
            text: user.into(),
        });
        self.turns.push(ChatTurn {
            role: ChatRole::Assistant,
            text: assistant.into(),
        });
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn count(&self, role: ChatRole) -> usize {
        self.turns.iter().filter(|turn| turn.role == role).count()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.turns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_pairs() {
        let mut transcript = Transcript::default();
        transcript.push_exchange("hi", "hello");
        transcript.push_exchange("and?", "that's all");

        assert_eq!(transcript.len(), 4);
        assert_eq!(transcript.count(ChatRole::User), 2);
        assert_eq!(transcript.count(ChatRole::Assistant), 2);
        let roles: Vec<_> = transcript.turns().iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![ChatRole::User, ChatRole::Assistant, ChatRole::User, ChatRole::Assistant]
        );
    }
}
