//! Header block handling.

use std::fmt;

/// Ordered collection of envelope headers.
///
/// Names keep the case they were written with and are matched
/// case-sensitively. Repeated names are stored as separate entries, but
/// [`Headers::get`] follows last-write-wins semantics: the final occurrence
/// of a name is the one the envelope sees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    fields: Vec<(String, String)>,
}

impl Headers {
    /// Creates a new empty header collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Gets the value of the last header with this exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the number of header entries, including repeats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns an iterator over all headers in block order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Returns each distinct name once, paired with its effective
    /// (last-written) value, ordered by the name's first occurrence.
    pub fn effective(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().enumerate().filter_map(|(i, (name, _))| {
            let seen = self.fields[..i].iter().any(|(n, _)| n == name);
            (!seen).then(|| (name.as_str(), self.get(name).unwrap_or_default()))
        })
    }

    /// Parses a header block.
    ///
    /// Lines are handled top to bottom:
    /// - a line starting with a space or tab, seen after a header, is a
    ///   continuation: it is trimmed and appended to that header's value
    ///   after a single space;
    /// - a line containing `:` starts a new header, split on the first
    ///   colon with both sides trimmed;
    /// - any other line is ignored.
    ///
    /// Parsing never fails; a block with no recognisable lines yields an
    /// empty collection.
    #[must_use]
    pub fn parse(block: &str) -> Self {
        let mut headers = Self::new();
        let mut in_header = false;

        for line in header_lines(block) {
            if in_header && line.starts_with([' ', '\t']) {
                if let Some((_, value)) = headers.fields.last_mut() {
                    value.push(' ');
                    value.push_str(line.trim());
                }
            } else if let Some((name, value)) = line.split_once(':') {
                headers.add(name.trim(), value.trim());
                in_header = true;
            }
        }

        headers
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}

/// Splits a header block into physical lines.
///
/// Accepts both LF and CRLF line endings; the line terminator is never part
/// of the yielded line.
pub(crate) fn header_lines(block: &str) -> impl Iterator<Item = &str> {
    block.lines().map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Returns the header name of a physical line: the text before its first
/// colon. Continuation lines and lines without a colon have no name.
pub(crate) fn line_name(line: &str) -> Option<&str> {
    if line.starts_with([' ', '\t']) {
        return None;
    }
    line.split_once(':').map(|(name, _)| name)
}
