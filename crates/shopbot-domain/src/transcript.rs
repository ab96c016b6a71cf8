//! Transcript module - the append-only log of chat exchanges

use std::fmt;

/// Who wrote a transcript line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    /// The shopper
    User,

    /// The assistant
    Bot,
}

impl Sender {
    /// Get the sender name as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }

    /// Parse a sender from its stored name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Sender::User),
            "bot" => Some(Sender::Bot),
            _ => None,
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the user/bot exchange
///
/// Entries are never mutated. `id` grows monotonically with every append, so
/// it breaks ties between entries written within the same second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    /// Monotonic sequence number assigned by the log
    pub id: i64,

    /// Author of the line
    pub sender: Sender,

    /// Text as recorded
    pub text: String,

    /// Write time (seconds since Unix epoch)
    pub timestamp: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_round_trip() {
        for sender in [Sender::User, Sender::Bot] {
            assert_eq!(Sender::parse(sender.as_str()), Some(sender));
        }
        assert_eq!(Sender::parse("system"), None);
        assert_eq!(Sender::parse("User"), None);
    }

    #[test]
    fn test_sender_display() {
        assert_eq!(Sender::Bot.to_string(), "bot");
    }
}
