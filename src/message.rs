//! User-facing status messages. Failures surface here, not as panics.

use std::fmt;

/// A message to the user, displayed in the editor's status area.
pub struct Message {
    /// The message string.
    string: String,
    /// The message type.
    message_type: MessageType,
}

impl Message {
    pub fn new<D: fmt::Display>(s: D, t: MessageType) -> Self {
        Message {
            string: format!("{}", s),
            message_type: t,
        }
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    fn log(&self) {
        match self.message_type {
            MessageType::Info => info!("{}", self),
            MessageType::Hint => {}
            MessageType::Warning => warn!("{}", self),
            MessageType::Error => error!("{}", self),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.string.fmt(f)
    }
}

/// The type of a `Message`.
#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum MessageType {
    /// A hint that can be ignored.
    Hint,
    /// Informational message.
    Info,
    /// Non-critical warning.
    Warning,
    /// An error message.
    Error,
}

/// Accumulates messages over one operation; the editor drains them into its
/// status bar.
#[derive(Default)]
pub struct MessageStack {
    messages: Vec<Message>,
}

impl MessageStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a message and mirror it to the log.
    pub fn flash<D: fmt::Display>(&mut self, t: MessageType, s: D) {
        let message = Message::new(s, t);
        message.log();
        self.messages.push(message);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Message> + '_ {
        self.messages.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
