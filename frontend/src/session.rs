//! Chat transcript for one page visit.
//!
//! Entries are only ever appended. At most one turn is in flight: while a reply
//! is outstanding [`ChatSession::begin_turn`] refuses new input.

pub const GREETING: &str = "Hello! I'm the Cincinnati Hotel AI Assistant. How can I help you today?";
pub const CONNECTION_APOLOGY: &str = "I'm sorry, I'm having trouble connecting right now. Please try again.";
const CONTACT_TRIGGER: &str = "don't have that information";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub id: usize,
    pub sender: Sender,
    pub text: String,
    /// Display time, e.g. `"14:05"`.
    pub time: String,
}

impl TranscriptEntry {
    /// Bot answers that admit missing knowledge get a contact-details prompt.
    pub fn offers_contact(&self) -> bool {
        self.sender == Sender::Bot && self.text.to_lowercase().contains(CONTACT_TRIGGER)
    }
}

/// A message accepted for sending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingTurn {
    pub session_id: String,
    pub message: String,
}

#[derive(Clone, Debug)]
pub struct ChatSession {
    session_id: String,
    entries: Vec<TranscriptEntry>,
    pending: bool,
}

/// `user-session-<uuid v4>`, generated once per page load.
pub fn new_session_id() -> String {
    format!("user-session-{}", uuid::Uuid::new_v4())
}

impl ChatSession {
    pub fn new(session_id: String, time: String) -> Self {
        let mut session = Self { session_id, entries: Vec::new(), pending: false };
        session.push(Sender::Bot, GREETING.to_string(), time);
        session
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    fn push(&mut self, sender: Sender, text: String, time: String) {
        let id = self.entries.len() + 1;
        self.entries.push(TranscriptEntry { id, sender, text, time });
    }

    /// Records the user's message and marks a reply as outstanding.
    /// Returns `None` for blank input or while another turn is in flight.
    pub fn begin_turn(&mut self, input: &str, time: String) -> Option<OutgoingTurn> {
        if self.pending || input.trim().is_empty() {
            return None;
        }
        self.push(Sender::User, input.to_string(), time);
        self.pending = true;
        Some(OutgoingTurn { session_id: self.session_id.clone(), message: input.to_string() })
    }

    /// Appends the bot's reply, or an apology when the turn failed.
    pub fn finish_turn(&mut self, reply: Result<String, String>, time: String) {
        let text = match reply {
            Ok(text) => text,
            Err(e) => {
                log::error!("Chat error: {e}");
                CONNECTION_APOLOGY.to_string()
            }
        };
        self.push(Sender::Bot, text, time);
        self.pending = false;
    }
}
