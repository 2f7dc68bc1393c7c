//! Envelope format configuration.

use crate::content_type::ContentType;
use crate::encoding::TransferEncoding;

/// Default reserved prefix for agent-specific headers.
pub const DEFAULT_HEADER_PREFIX: &str = "X-IGNITE-";

/// Default domain used to qualify generated message identifiers.
pub const DEFAULT_DOMAIN: &str = "ignite.local";

/// Priority of an envelope that does not state one.
pub const DEFAULT_PRIORITY: &str = "normal";

/// Short names of the prefixed headers that map onto typed envelope fields.
///
/// Any other prefixed header is captured as an extension.
pub const KNOWN_PREFIXED: [&str; 6] = [
    "Type",
    "Priority",
    "Thread-ID",
    "Repository",
    "Issue",
    "Status",
];

/// Immutable description of the envelope format.
///
/// Shared by the builder, the parser, and the mutator so that all three
/// agree on the reserved prefix and the fixed content headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeConfig {
    header_prefix: String,
    domain: String,
    mime_version: String,
    content_type: ContentType,
    transfer_encoding: TransferEncoding,
}

impl EnvelopeConfig {
    /// Creates the standard IGNITE configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            header_prefix: DEFAULT_HEADER_PREFIX.to_string(),
            domain: DEFAULT_DOMAIN.to_string(),
            mime_version: "1.0".to_string(),
            content_type: ContentType::text_yaml(),
            transfer_encoding: TransferEncoding::EightBit,
        }
    }

    /// Sets the reserved header prefix.
    #[must_use]
    pub fn with_header_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.header_prefix = prefix.into();
        self
    }

    /// Sets the message identifier domain.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Reserved header prefix, e.g. `X-IGNITE-`.
    #[must_use]
    pub fn header_prefix(&self) -> &str {
        &self.header_prefix
    }

    /// Domain appended to generated message identifiers.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Value of the `MIME-Version` header.
    #[must_use]
    pub fn mime_version(&self) -> &str {
        &self.mime_version
    }

    /// Fixed `Content-Type` of every envelope.
    #[must_use]
    pub const fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    /// Fixed `Content-Transfer-Encoding` of every envelope.
    #[must_use]
    pub const fn transfer_encoding(&self) -> TransferEncoding {
        self.transfer_encoding
    }

    /// Returns the full header name for a prefixed short name.
    ///
    /// `prefixed("Status")` is `X-IGNITE-Status` with the default prefix.
    #[must_use]
    pub fn prefixed(&self, short: &str) -> String {
        format!("{}{short}", self.header_prefix)
    }

    /// Returns the name of the status header.
    #[must_use]
    pub fn status_header(&self) -> String {
        self.prefixed("Status")
    }

    /// Returns the extension key for a header name, or `None` if the header
    /// is not prefixed or maps onto a typed field.
    ///
    /// Keys are lower-cased with hyphens turned into underscores, so
    /// `X-IGNITE-Processed-At` becomes `processed_at`.
    #[must_use]
    pub fn extension_key(&self, name: &str) -> Option<String> {
        let short = name.strip_prefix(self.header_prefix.as_str())?;
        if KNOWN_PREFIXED.contains(&short) {
            return None;
        }
        Some(short.to_lowercase().replace('-', "_"))
    }
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnvelopeConfig::default();
        assert_eq!(config.header_prefix(), "X-IGNITE-");
        assert_eq!(config.domain(), "ignite.local");
        assert_eq!(config.mime_version(), "1.0");
        assert_eq!(config.content_type().to_string(), "text/x-yaml; charset=utf-8");
        assert_eq!(config.transfer_encoding().to_string(), "8bit");
        assert_eq!(config.status_header(), "X-IGNITE-Status");
    }

    #[test]
    fn test_custom_prefix() {
        let config = EnvelopeConfig::new()
            .with_header_prefix("X-Agent-")
            .with_domain("agents.example");
        assert_eq!(config.prefixed("Type"), "X-Agent-Type");
        assert_eq!(config.domain(), "agents.example");
    }

    #[test]
    fn test_extension_key() {
        let config = EnvelopeConfig::default();
        assert_eq!(config.extension_key("X-IGNITE-Custom"), Some("custom".to_string()));
        assert_eq!(
            config.extension_key("X-IGNITE-Processed-At"),
            Some("processed_at".to_string())
        );
        assert_eq!(config.extension_key("X-IGNITE-Status"), None);
        assert_eq!(config.extension_key("X-IGNITE-Thread-ID"), None);
        assert_eq!(config.extension_key("From"), None);
        // Known names are matched case-sensitively.
        assert_eq!(config.extension_key("X-IGNITE-status"), Some("status".to_string()));
    }
}
