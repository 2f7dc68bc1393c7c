//! In-place header mutation on wire text.
//!
//! Every operation splits the envelope the same way the parser does,
//! edits the header lines, and rejoins them with a single LF blank line in
//! front of the untouched body. Header lines are matched by exact name:
//! the text before the first colon must equal the requested name, so
//! removing `X-Foo` never touches `X-Foo-Bar`. A header's continuation
//! lines are replaced or removed together with it.

use crate::config::EnvelopeConfig;
use crate::envelope::split_envelope;
use crate::header::{header_lines, line_name};

/// Header lines of an envelope plus its body, ready to be edited.
#[derive(Debug)]
struct Draft<'a> {
    lines: Vec<String>,
    body: &'a str,
}

impl<'a> Draft<'a> {
    fn new(raw: &'a str) -> Self {
        let split = split_envelope(raw);
        Self {
            lines: header_lines(split.header_block).map(String::from).collect(),
            body: split.body,
        }
    }

    /// Index one past the continuation lines that follow `index`.
    fn logical_end(&self, index: usize) -> usize {
        index
            + 1
            + self.lines[index + 1..]
                .iter()
                .take_while(|line| line.starts_with([' ', '\t']))
                .count()
    }

    /// Replaces the first header named `name`, or appends it.
    ///
    /// Returns true if an existing header was replaced.
    fn set(&mut self, name: &str, value: &str) -> bool {
        let line = format!("{name}: {value}");
        let Some(index) = self.lines.iter().position(|l| line_name(l) == Some(name)) else {
            self.lines.push(line);
            return false;
        };

        let end = self.logical_end(index);
        self.lines.drain(index + 1..end);
        self.lines[index] = line;
        true
    }

    /// Removes every header named `name`; returns how many were removed.
    fn remove(&mut self, name: &str) -> usize {
        let mut removed = 0;
        let mut kept = Vec::with_capacity(self.lines.len());
        let mut skipping = false;

        for line in std::mem::take(&mut self.lines) {
            if skipping && line.starts_with([' ', '\t']) {
                continue;
            }
            skipping = line_name(&line) == Some(name);
            if skipping {
                removed += 1;
            } else {
                kept.push(line);
            }
        }

        self.lines = kept;
        removed
    }

    fn finish(self) -> String {
        format!("{}\n\n{}", self.lines.join("\n"), self.body)
    }
}

/// Sets a header, replacing the first header with that name in place or
/// appending it to the end of the header block.
#[must_use]
pub fn set_header(raw: &str, name: &str, value: &str) -> String {
    let mut draft = Draft::new(raw);
    let replaced = draft.set(name, value);
    tracing::debug!(header = name, replaced, "set header");
    draft.finish()
}

/// Removes every header with this exact name.
#[must_use]
pub fn remove_header(raw: &str, name: &str) -> String {
    let mut draft = Draft::new(raw);
    let removed = draft.remove(name);
    tracing::debug!(header = name, removed, "removed header");
    draft.finish()
}

/// Sets the status header with the default configuration, then sets each
/// extra header in order.
#[must_use]
pub fn update_status<I, N, V>(raw: &str, status: &str, extra_headers: I) -> String
where
    I: IntoIterator<Item = (N, V)>,
    N: AsRef<str>,
    V: AsRef<str>,
{
    update_status_with(raw, status, extra_headers, &EnvelopeConfig::default())
}

/// Sets the configured status header, then sets each extra header in
/// order.
///
/// Extra headers follow the same replace-or-append rule as
/// [`set_header`]; a later pair with the same name overwrites an earlier
/// one.
#[must_use]
pub fn update_status_with<I, N, V>(
    raw: &str,
    status: &str,
    extra_headers: I,
    config: &EnvelopeConfig,
) -> String
where
    I: IntoIterator<Item = (N, V)>,
    N: AsRef<str>,
    V: AsRef<str>,
{
    let mut draft = Draft::new(raw);
    let replaced = draft.set(&config.status_header(), status);
    tracing::debug!(status, replaced, "updated status");

    for (name, value) in extra_headers {
        let (name, value) = (name.as_ref(), value.as_ref());
        let replaced = draft.set(name, value);
        tracing::debug!(header = name, replaced, "set header");
    }

    draft.finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::envelope::extract_body;
    use crate::parser::parse_envelope;

    const RAW: &str = concat!(
        "From: a\n",
        "To: b\n",
        "X-IGNITE-Type: t\n",
        "X-IGNITE-Status: queued\n",
        "Content-Type: text/x-yaml; charset=utf-8\n",
        "\n",
        "data: 1\n\nsecond: 2\n",
    );

    const NO_STATUS: &str = "From: a\nTo: b\nX-IGNITE-Type: t\n\ndata";

    #[test]
    fn test_set_header_replaces_in_place() {
        let updated = set_header(RAW, "To", "c, d");
        assert_eq!(
            updated,
            concat!(
                "From: a\n",
                "To: c, d\n",
                "X-IGNITE-Type: t\n",
                "X-IGNITE-Status: queued\n",
                "Content-Type: text/x-yaml; charset=utf-8\n",
                "\n",
                "data: 1\n\nsecond: 2\n",
            )
        );
        assert_eq!(updated.matches("To:").count(), 1);
    }

    #[test]
    fn test_set_header_appends_when_missing() {
        let updated = set_header(NO_STATUS, "X-IGNITE-Repository", "org/repo");
        assert_eq!(
            updated,
            "From: a\nTo: b\nX-IGNITE-Type: t\nX-IGNITE-Repository: org/repo\n\ndata"
        );
    }

    #[test]
    fn test_set_header_first_match_only() {
        let raw = "X-A: 1\nX-A: 2\n\nbody";
        assert_eq!(set_header(raw, "X-A", "3"), "X-A: 3\nX-A: 2\n\nbody");
    }

    #[test]
    fn test_set_header_exact_name() {
        let raw = "X-IGNITE-Status-Detail: slow\n\nbody";
        let updated = set_header(raw, "X-IGNITE-Status", "done");
        assert_eq!(
            updated,
            "X-IGNITE-Status-Detail: slow\nX-IGNITE-Status: done\n\nbody"
        );
    }

    #[test]
    fn test_set_header_drops_old_continuation() {
        let raw = "Subject-Line: first\n  folded\nTo: b\n\nbody";
        let updated = set_header(raw, "Subject-Line", "new");
        assert_eq!(updated, "Subject-Line: new\nTo: b\n\nbody");
    }

    #[test]
    fn test_remove_header() {
        let updated = remove_header(RAW, "X-IGNITE-Status");
        assert!(!updated.contains("X-IGNITE-Status"));
        assert_eq!(extract_body(&updated), extract_body(RAW));
        assert_eq!(parse_envelope(&updated).message_type, "t");
    }

    #[test]
    fn test_remove_header_all_occurrences_and_continuations() {
        let raw = "X-A: 1\n more\nX-B: keep\nX-A: 2\nX-AB: keep\n\nbody";
        assert_eq!(remove_header(raw, "X-A"), "X-B: keep\nX-AB: keep\n\nbody");
    }

    #[test]
    fn test_remove_header_idempotent() {
        let once = remove_header(RAW, "To");
        let twice = remove_header(&once, "To");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_remove_missing_header_is_noop() {
        assert_eq!(remove_header(RAW, "Cc"), RAW);
    }

    #[test]
    fn test_update_status_appends() {
        let updated = update_status(NO_STATUS, "delivered", Vec::<(&str, &str)>::new());
        assert_eq!(
            updated,
            "From: a\nTo: b\nX-IGNITE-Type: t\nX-IGNITE-Status: delivered\n\ndata"
        );
    }

    #[test]
    fn test_update_status_replaces_and_keeps_body() {
        let updated = update_status(
            RAW,
            "delivered",
            [("X-IGNITE-Processed-At", "2026-02-10T12:00:00+09:00")],
        );
        let envelope = parse_envelope(&updated);
        assert_eq!(envelope.status, "delivered");
        assert_eq!(
            envelope.extension("processed_at"),
            Some("2026-02-10T12:00:00+09:00")
        );
        assert_eq!(updated.matches("X-IGNITE-Status:").count(), 1);
        assert_eq!(extract_body(&updated), extract_body(RAW));

        // Status stays on its original line.
        let status_line = updated.lines().position(|l| l.starts_with("X-IGNITE-Status:"));
        assert_eq!(status_line, Some(3));
    }

    #[test]
    fn test_update_status_extra_headers_in_order() {
        let updated = update_status(
            NO_STATUS,
            "processing",
            [("X-One", "1"), ("X-Two", "2"), ("X-One", "3")],
        );
        assert_eq!(
            updated,
            concat!(
                "From: a\nTo: b\nX-IGNITE-Type: t\n",
                "X-IGNITE-Status: processing\nX-One: 3\nX-Two: 2\n",
                "\ndata",
            )
        );
    }

    #[test]
    fn test_mutation_normalizes_crlf_header_block() {
        let raw = "From: a\r\nTo: b\r\n\r\nline1\r\nline2";
        let updated = set_header(raw, "To", "c");
        assert_eq!(updated, "From: a\nTo: c\n\nline1\r\nline2");
    }

    #[test]
    fn test_mutation_without_separator() {
        let updated = update_status("From: a\nTo: b", "queued", Vec::<(String, String)>::new());
        assert_eq!(updated, "From: a\nTo: b\nX-IGNITE-Status: queued\n\n");
        assert_eq!(parse_envelope(&updated).body, "");
    }

    #[test]
    fn test_update_status_custom_prefix() {
        let config = EnvelopeConfig::new().with_header_prefix("X-Agent-");
        let no_extra = Vec::<(&str, &str)>::new();
        let updated = update_status_with("From: a\n\nbody", "done", no_extra, &config);
        assert_eq!(updated, "From: a\nX-Agent-Status: done\n\nbody");
    }
}
