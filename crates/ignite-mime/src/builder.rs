//! Envelope construction.

use crate::DEFAULT_PRIORITY;
use crate::config::EnvelopeConfig;
use crate::envelope::join_address_list;
use crate::error::{Error, Result};
use crate::header::Headers;
use crate::stamp::{Stamp, SystemStamp};

/// Fields of an envelope to build.
///
/// `from_agent`, `to_agents` and `message_type` are required; everything
/// else is optional. Optional headers are only written when non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeFields {
    /// Sending agent.
    pub from_agent: String,
    /// Receiving agents; must not be empty.
    pub to_agents: Vec<String>,
    /// Message type, written as the prefixed `Type` header.
    pub message_type: String,
    /// Body text, written verbatim.
    pub body: String,
    /// Carbon-copied agents.
    pub cc: Vec<String>,
    /// Priority, `normal` unless set.
    pub priority: String,
    /// Conversation thread.
    pub thread_id: Option<String>,
    /// Message-ID this envelope answers.
    pub in_reply_to: Option<String>,
    /// Repository the message concerns.
    pub repository: Option<String>,
    /// Issue the message concerns.
    pub issue: Option<String>,
    /// Initial delivery status.
    pub status: Option<String>,
}

impl EnvelopeFields {
    /// Creates a field set with the required values and defaults elsewhere.
    #[must_use]
    pub fn new<I, S>(
        from_agent: impl Into<String>,
        to_agents: I,
        message_type: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            from_agent: from_agent.into(),
            to_agents: to_agents.into_iter().map(Into::into).collect(),
            message_type: message_type.into(),
            body: String::new(),
            cc: Vec::new(),
            priority: DEFAULT_PRIORITY.to_string(),
            thread_id: None,
            in_reply_to: None,
            repository: None,
            issue: None,
            status: None,
        }
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds a carbon-copied agent.
    #[must_use]
    pub fn cc(mut self, agent: impl Into<String>) -> Self {
        self.cc.push(agent.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Sets the thread identifier.
    #[must_use]
    pub fn thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    /// Sets the message this one replies to.
    #[must_use]
    pub fn in_reply_to(mut self, message_id: impl Into<String>) -> Self {
        self.in_reply_to = Some(message_id.into());
        self
    }

    /// Sets the repository.
    #[must_use]
    pub fn repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    /// Sets the issue.
    #[must_use]
    pub fn issue(mut self, issue: impl Into<String>) -> Self {
        self.issue = Some(issue.into());
        self
    }

    /// Sets the status.
    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Builds the envelope with the default configuration, a random
    /// Message-ID and the current date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if there are no recipients.
    pub fn build(&self) -> Result<String> {
        build_envelope(self)
    }
}

/// Builds an envelope with the default configuration and system stamp.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if there are no recipients.
pub fn build_envelope(fields: &EnvelopeFields) -> Result<String> {
    build_envelope_with(fields, &EnvelopeConfig::default(), &SystemStamp)
}

/// Builds an envelope.
///
/// Headers are written in a fixed order: `MIME-Version`, `Message-ID`,
/// `From`, `To`, `Cc`, `Date`, `Type`, `Priority`, `Thread-ID`,
/// `In-Reply-To`, `Repository`, `Issue`, `Status`, `Content-Type`,
/// `Content-Transfer-Encoding`, followed by a blank line and the body.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if there are no recipients.
pub fn build_envelope_with(
    fields: &EnvelopeFields,
    config: &EnvelopeConfig,
    stamp: &impl Stamp,
) -> Result<String> {
    if fields.to_agents.is_empty() {
        return Err(Error::InvalidArgument(
            "at least one recipient is required".to_string(),
        ));
    }

    let mut headers = Headers::new();
    headers.add("MIME-Version", config.mime_version());
    headers.add("Message-ID", stamp.message_id(config.domain()));
    headers.add("From", fields.from_agent.as_str());
    headers.add("To", join_address_list(&fields.to_agents));
    if !fields.cc.is_empty() {
        headers.add("Cc", join_address_list(&fields.cc));
    }
    headers.add("Date", stamp.date());
    headers.add(config.prefixed("Type"), fields.message_type.as_str());
    headers.add(config.prefixed("Priority"), fields.priority.as_str());

    let optional = [
        (config.prefixed("Thread-ID"), &fields.thread_id),
        ("In-Reply-To".to_string(), &fields.in_reply_to),
        (config.prefixed("Repository"), &fields.repository),
        (config.prefixed("Issue"), &fields.issue),
        (config.prefixed("Status"), &fields.status),
    ];
    for (name, value) in optional {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            headers.add(name, value);
        }
    }

    headers.add("Content-Type", config.content_type().to_string());
    headers.add(
        "Content-Transfer-Encoding",
        config.transfer_encoding().as_str(),
    );

    tracing::debug!(
        from = %fields.from_agent,
        recipients = fields.to_agents.len(),
        headers = headers.len(),
        "built envelope"
    );

    Ok(format!("{headers}\n{}", fields.body))
}
