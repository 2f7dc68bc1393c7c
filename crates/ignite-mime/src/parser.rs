//! Envelope parsing.

use std::collections::BTreeMap;

use crate::DEFAULT_PRIORITY;
use crate::config::EnvelopeConfig;
use crate::envelope::{Envelope, split_address_list, split_envelope};
use crate::header::Headers;

/// Parses wire text with the default configuration.
///
/// Parsing is total: malformed input yields defaulted fields, never an
/// error.
#[must_use]
pub fn parse_envelope(raw: &str) -> Envelope {
    parse_envelope_with(raw, &EnvelopeConfig::default())
}

/// Parses wire text using the given configuration's reserved prefix.
#[must_use]
pub fn parse_envelope_with(raw: &str, config: &EnvelopeConfig) -> Envelope {
    let (headers, body) = parse_parts(raw);
    let envelope = Envelope::from_headers(&headers, body, config);

    tracing::debug!(
        headers = headers.len(),
        extensions = envelope.extensions.len(),
        body_len = body.len(),
        "parsed envelope"
    );

    envelope
}

/// Splits wire text and parses its header block, leaving the body as is.
///
/// Useful for inspecting headers the [`Envelope`] does not model, such as
/// `MIME-Version`.
#[must_use]
pub fn parse_parts(raw: &str) -> (Headers, &str) {
    let split = split_envelope(raw);
    tracing::trace!(separator = ?split.separator, "split envelope");
    (Headers::parse(split.header_block), split.body)
}

impl Envelope {
    /// Parses wire text with the default configuration.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        parse_envelope(raw)
    }

    /// Flattens a parsed header block into typed fields and extensions.
    #[must_use]
    pub fn from_headers(headers: &Headers, body: &str, config: &EnvelopeConfig) -> Self {
        let text = |name: &str| headers.get(name).unwrap_or_default().to_string();
        let prefixed = |short: &str| text(&config.prefixed(short));

        let mut extensions = BTreeMap::new();
        for (name, value) in headers.effective() {
            if let Some(key) = config.extension_key(name) {
                extensions.insert(key, value.to_string());
            }
        }

        Self {
            message_id: text("Message-ID"),
            from: text("From"),
            to: split_address_list(headers.get("To").unwrap_or_default()),
            cc: split_address_list(headers.get("Cc").unwrap_or_default()),
            date: text("Date"),
            in_reply_to: text("In-Reply-To"),
            message_type: prefixed("Type"),
            priority: headers
                .get(&config.prefixed("Priority"))
                .unwrap_or(DEFAULT_PRIORITY)
                .to_string(),
            thread_id: prefixed("Thread-ID"),
            repository: prefixed("Repository"),
            issue: prefixed("Issue"),
            status: prefixed("Status"),
            content_type: text("Content-Type"),
            content_transfer_encoding: text("Content-Transfer-Encoding"),
            body: body.to_string(),
            extensions,
        }
    }
}
