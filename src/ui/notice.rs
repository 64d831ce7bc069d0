//! User-facing notices

/// Message raised by an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Blocking alert
    Alert(String),
    /// Inline text next to the affected section
    Inline(String),
}

impl Notice {
    pub fn alert(message: impl Into<String>) -> Self {
        Notice::Alert(message.into())
    }

    pub fn inline(message: impl Into<String>) -> Self {
        Notice::Inline(message.into())
    }

    pub fn text(&self) -> &str {
        match self {
            Notice::Alert(text) | Notice::Inline(text) => text,
        }
    }

    pub fn is_alert(&self) -> bool {
        matches!(self, Notice::Alert(_))
    }
}
