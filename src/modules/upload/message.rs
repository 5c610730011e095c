use serde::{Deserialize, Serialize};

/// Status of the last interaction as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Success,
    /// Server-side failure
    Failure,
    /// Local validation or transport error
    Error,
    /// Nothing to show
    #[default]
    #[serde(rename = "")]
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub status: MessageStatus,
    pub message: String,
}

impl ResponseMessage {
    pub fn new(status: MessageStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(MessageStatus::Error, message)
    }

    pub fn is_idle(&self) -> bool {
        self.status == MessageStatus::Idle
    }
}

/// Dismissible notification fed by the widget's status callback
#[derive(Debug, Default)]
pub struct Notification {
    current: ResponseMessage,
}

impl Notification {
    pub fn show(&mut self, message: ResponseMessage) {
        self.current = message;
    }

    pub fn dismiss(&mut self) {
        self.current = ResponseMessage::default();
    }

    pub fn is_visible(&self) -> bool {
        !self.current.is_idle()
    }

    pub fn current(&self) -> &ResponseMessage {
        &self.current
    }
}
