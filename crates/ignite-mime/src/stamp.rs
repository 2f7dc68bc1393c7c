//! Message-ID and Date generation.

/// Source of the per-message values the builder does not take as input.
pub trait Stamp {
    /// Returns a fresh message identifier qualified with `domain`,
    /// including angle brackets.
    fn message_id(&self, domain: &str) -> String;

    /// Returns the value of the `Date` header.
    fn date(&self) -> String;
}

/// Stamps messages with a random identifier and the current local time.
///
/// Identifiers look like `<3f2a...c9@ignite.local>`; dates use the
/// RFC 2822 format, e.g. `Mon, 19 Oct 2026 09:00:00 +0900`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemStamp;

impl Stamp for SystemStamp {
    fn message_id(&self, domain: &str) -> String {
        format!("<{}@{domain}>", uuid::Uuid::new_v4().simple())
    }

    fn date(&self) -> String {
        chrono::Local::now().to_rfc2822()
    }
}

/// Stamps every message with the same values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedStamp {
    message_id: String,
    date: String,
}

impl FixedStamp {
    /// Creates a stamp that always yields the given values.
    ///
    /// The identifier is used as is; the builder's domain is ignored.
    #[must_use]
    pub fn new(message_id: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            date: date.into(),
        }
    }
}

impl Stamp for FixedStamp {
    fn message_id(&self, _domain: &str) -> String {
        self.message_id.clone()
    }

    fn date(&self) -> String {
        self.date.clone()
    }
}
