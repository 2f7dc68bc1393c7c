//! Envelope model and wire-text splitting.

use std::collections::BTreeMap;

use crate::content_type::ContentType;
use crate::encoding::TransferEncoding;

/// Separator between the header block and the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// Two line feeds.
    Lf,
    /// Two CRLF sequences.
    Crlf,
    /// No blank line was found; the whole input is the header block.
    Missing,
}

impl Separator {
    /// Returns the separator text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n\n",
            Self::Crlf => "\r\n\r\n",
            Self::Missing => "",
        }
    }
}

/// Wire text split into its header block and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    /// Text before the blank line.
    pub header_block: &'a str,
    /// Text after the blank line, verbatim.
    pub body: &'a str,
    /// Which separator was found.
    pub separator: Separator,
}

/// Splits wire text at the first blank line.
///
/// `"\n\n"` is looked for first and `"\r\n\r\n"` only if there is no LF
/// pair anywhere in the input. Without either, the entire input is the
/// header block and the body is empty.
#[must_use]
pub fn split_envelope(raw: &str) -> Split<'_> {
    [Separator::Lf, Separator::Crlf]
        .into_iter()
        .find_map(|separator| {
            raw.split_once(separator.as_str())
                .map(|(header_block, body)| Split {
                    header_block,
                    body,
                    separator,
                })
        })
        .unwrap_or(Split {
            header_block: raw,
            body: "",
            separator: Separator::Missing,
        })
}

/// Returns the body of an envelope, verbatim.
#[must_use]
pub fn extract_body(raw: &str) -> &str {
    split_envelope(raw).body
}

/// Parsed envelope.
///
/// Missing headers become empty strings or lists, except `priority`, which
/// defaults to `"normal"`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Envelope {
    /// `Message-ID` header.
    pub message_id: String,
    /// `From` header.
    pub from: String,
    /// Recipients from the `To` header.
    pub to: Vec<String>,
    /// Recipients from the `Cc` header.
    pub cc: Vec<String>,
    /// `Date` header.
    pub date: String,
    /// `In-Reply-To` header.
    pub in_reply_to: String,
    /// Prefixed `Type` header.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub message_type: String,
    /// Prefixed `Priority` header.
    pub priority: String,
    /// Prefixed `Thread-ID` header.
    pub thread_id: String,
    /// Prefixed `Repository` header.
    pub repository: String,
    /// Prefixed `Issue` header.
    pub issue: String,
    /// Prefixed `Status` header.
    pub status: String,
    /// `Content-Type` header, unparsed.
    pub content_type: String,
    /// `Content-Transfer-Encoding` header, unparsed.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub content_transfer_encoding: String,
    /// Body text, verbatim.
    pub body: String,
    /// Prefixed headers without a typed field, keyed by normalized short name.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub extensions: BTreeMap<String, String>,
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            message_id: String::new(),
            from: String::new(),
            to: Vec::new(),
            cc: Vec::new(),
            date: String::new(),
            in_reply_to: String::new(),
            message_type: String::new(),
            priority: crate::DEFAULT_PRIORITY.to_string(),
            thread_id: String::new(),
            repository: String::new(),
            issue: String::new(),
            status: String::new(),
            content_type: String::new(),
            content_transfer_encoding: String::new(),
            body: String::new(),
            extensions: BTreeMap::new(),
        }
    }
}

impl Envelope {
    /// Gets an extension field by normalized key (e.g. `processed_at`).
    #[must_use]
    pub fn extension(&self, key: &str) -> Option<&str> {
        self.extensions.get(key).map(String::as_str)
    }

    /// Parses the `Content-Type` header.
    ///
    /// Falls back to `text/x-yaml; charset=utf-8` when the header is absent
    /// or malformed.
    #[must_use]
    pub fn content_type_parsed(&self) -> ContentType {
        ContentType::parse(&self.content_type).unwrap_or_default()
    }

    /// Parses the `Content-Transfer-Encoding` header.
    ///
    /// A missing header means `7bit` (RFC 2045). Encodings that rewrite the
    /// body, such as base64, and unknown tokens give `None`.
    #[must_use]
    pub fn transfer_encoding(&self) -> Option<TransferEncoding> {
        if self.content_transfer_encoding.trim().is_empty() {
            return Some(TransferEncoding::SevenBit);
        }
        TransferEncoding::parse(&self.content_transfer_encoding)
    }
}

/// Splits a list-valued header on commas, trimming entries and dropping
/// empty ones.
#[must_use]
pub fn split_address_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

/// Joins a recipient list into a single header value.
#[must_use]
pub fn join_address_list<S: AsRef<str>>(entries: &[S]) -> String {
    entries
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lf() {
        let split = split_envelope("From: a\nTo: b\n\nbody: 1\n\nmore");
        assert_eq!(split.header_block, "From: a\nTo: b");
        assert_eq!(split.body, "body: 1\n\nmore");
        assert_eq!(split.separator, Separator::Lf);
    }

    #[test]
    fn test_split_crlf_fallback() {
        let split = split_envelope("From: a\r\nTo: b\r\n\r\nline1\r\nline2");
        assert_eq!(split.header_block, "From: a\r\nTo: b");
        assert_eq!(split.body, "line1\r\nline2");
        assert_eq!(split.separator, Separator::Crlf);
    }

    #[test]
    fn test_split_lf_takes_precedence() {
        // An LF pair later in the text wins over an earlier CRLF pair.
        let split = split_envelope("A: 1\r\n\r\nB: 2\n\nbody");
        assert_eq!(split.header_block, "A: 1\r\n\r\nB: 2");
        assert_eq!(split.body, "body");
    }

    #[test]
    fn test_split_missing_separator() {
        let split = split_envelope("From: a\nTo: b");
        assert_eq!(split.header_block, "From: a\nTo: b");
        assert_eq!(split.body, "");
        assert_eq!(split.separator, Separator::Missing);
    }

    #[test]
    fn test_extract_body() {
        assert_eq!(extract_body("A: 1\n\npayload_here"), "payload_here");
        assert_eq!(extract_body("A: 1\n\n"), "");
        assert_eq!(extract_body(""), "");
    }

    #[test]
    fn test_address_lists() {
        assert_eq!(split_address_list("b, c"), vec!["b", "c"]);
        assert_eq!(split_address_list(" b ,, ,c,"), vec!["b", "c"]);
        assert!(split_address_list("").is_empty());
        assert_eq!(join_address_list(&["b", "c"]), "b, c");
    }

    #[test]
    fn test_default_envelope() {
        let envelope = Envelope::default();
        assert_eq!(envelope.priority, "normal");
        assert!(envelope.from.is_empty() && envelope.to.is_empty());
        assert_eq!(envelope.content_type_parsed(), ContentType::text_yaml());
        assert_eq!(envelope.transfer_encoding(), Some(TransferEncoding::SevenBit));
    }
}
