//! # ignite-mime
//!
//! Codec for the IGNITE envelope: a MIME-derived text format that agents use
//! to pass task and status messages to each other.
//!
//! An envelope is a block of `Name: value` header lines, one blank line, and
//! a body that is passed through untouched:
//!
//! ```text
//! MIME-Version: 1.0
//! Message-ID: <3f2a9c...@ignite.local>
//! From: strategist
//! To: coordinator, architect
//! Date: Mon, 19 Oct 2026 09:00:00 +0900
//! X-IGNITE-Type: task_list
//! X-IGNITE-Priority: normal
//! Content-Type: text/x-yaml; charset=utf-8
//! Content-Transfer-Encoding: 8bit
//!
//! tasks: []
//! ```
//!
//! ## Features
//!
//! - **Building**: fixed header order, generated Message-ID and Date
//! - **Parsing**: continuation folding, list-valued `To`/`Cc`, capture of
//!   unknown `X-IGNITE-*` headers as extensions; never fails
//! - **Mutation**: set, replace or remove single headers and update the
//!   status without touching the body
//!
//! Multipart bodies, base64/quoted-printable and RFC 2047 encoded words are
//! not supported.
//!
//! ## Quick Start
//!
//! ```
//! use ignite_mime::{EnvelopeFields, extract_body, parse_envelope, update_status};
//!
//! let raw = EnvelopeFields::new("strategist", ["coordinator"], "task_list")
//!     .body("tasks: []")
//!     .build()?;
//!
//! let envelope = parse_envelope(&raw);
//! assert_eq!(envelope.from, "strategist");
//! assert_eq!(envelope.to, vec!["coordinator"]);
//!
//! let processed = [("X-IGNITE-Processed-At", "2026-10-19T09:00:00+09:00")];
//! let raw = update_status(&raw, "delivered", processed);
//! assert_eq!(parse_envelope(&raw).status, "delivered");
//! assert_eq!(extract_body(&raw), "tasks: []");
//! # Ok::<(), ignite_mime::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod builder;
mod config;
mod content_type;
mod encoding;
mod envelope;
mod error;
mod header;
mod mutate;
mod parser;
mod stamp;

pub use builder::{EnvelopeFields, build_envelope, build_envelope_with};
pub use config::{
    DEFAULT_DOMAIN, DEFAULT_HEADER_PREFIX, DEFAULT_PRIORITY, EnvelopeConfig, KNOWN_PREFIXED,
};
pub use content_type::ContentType;
pub use encoding::TransferEncoding;
pub use envelope::{
    Envelope, Separator, Split, extract_body, join_address_list, split_address_list,
    split_envelope,
};
pub use error::{Error, Result};
pub use header::Headers;
pub use mutate::{remove_header, set_header, update_status, update_status_with};
pub use parser::{parse_envelope, parse_envelope_with, parse_parts};
pub use stamp::{FixedStamp, Stamp, SystemStamp};
