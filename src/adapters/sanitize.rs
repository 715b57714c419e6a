//! Log redaction for patient identifiers.
//!
//! Risk factors themselves are coded categories and safe to log, but request
//! bodies and error messages can carry identifiers that must never reach a
//! log sink in an Australian primary-care deployment:
//! - Individual Healthcare Identifiers (IHI)
//! - Medicare card numbers
//! - Dates of birth
//! - Email addresses and phone numbers
//! - UUIDs (practice-system patient keys)
//!
//! Redaction is applied line by line by [`SanitizingMakeWriter`], installed
//! by [`crate::logging::init`]. Input is capped at a configurable number of
//! bytes per call (`PRM_SANITIZE_MAX_BYTES`).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use regex::{Regex, RegexSet};
use tracing_subscriber::fmt::MakeWriter;

/// Default per-call input cap.
pub const DEFAULT_MAX_BYTES: usize = 16 * 1024;

static MAX_BYTES: AtomicUsize = AtomicUsize::new(DEFAULT_MAX_BYTES);

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

struct Rule {
    regex: Regex,
    replacement: &'static str,
}

struct Patterns {
    any: RegexSet,
    rules: Vec<Rule>,
}

/// Applied in order; IHI must run before the Medicare rule since both are
/// digit runs. Digit-run rules capture their left context as `$1` so the
/// fractional digits of a logged decimal never start a match.
const RULES: &[(&str, &str)] = &[
    (
        r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
        "[REDACTED-UUID]",
    ),
    (
        r"(^|[^\d.])8003[\s-]?60\d{2}[\s-]?\d{4}[\s-]?\d{4}\b",
        "${1}[REDACTED-IHI]",
    ),
    (
        r"(?i)\b(?:dob|date[\s_]of[\s_]birth|birth[\s_]?date)\b[\s:=]*\d{1,4}[/.-]\d{1,2}[/.-]\d{1,4}\b",
        "[REDACTED-DOB]",
    ),
    (r"\b\d{1,2}/\d{1,2}/\d{4}\b", "[REDACTED-DOB]"),
    (
        r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
        "[REDACTED-EMAIL]",
    ),
    (
        r"(^|[^\d.])[2-6]\d{3}[\s-]?\d{5}[\s-]?\d(?:[\s-]?[1-9])?\b",
        "${1}[REDACTED-MEDICARE]",
    ),
    (
        r"(^|[^\d.])(?:\+61[\s-]?|0)[2-478](?:[\s-]?\d){8}\b",
        "${1}[REDACTED-PHONE]",
    ),
];

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        any: RegexSet::new(RULES.iter().map(|(p, _)| *p)).expect("Valid regex set"),
        rules: RULES
            .iter()
            .map(|(pattern, replacement)| Rule {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect(),
    })
}

/// Set the per-call input cap. Zero is ignored.
pub fn set_max_bytes(max_bytes: usize) {
    if max_bytes > 0 {
        MAX_BYTES.store(max_bytes, Ordering::Relaxed);
    }
}

fn max_bytes() -> usize {
    MAX_BYTES.load(Ordering::Relaxed)
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Replace every identifier in `input` with a redaction marker.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let patterns = patterns();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    if patterns.any.is_match(prefix) {
        for idx in patterns.any.matches(prefix).into_iter() {
            let rule = &patterns.rules[idx];
            result = rule.regex.replace_all(&result, rule.replacement).into_owned();
        }
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// A `tracing_subscriber` writer factory that redacts each formatted line
/// before it reaches the inner sink.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

/// Line-buffering writer produced by [`SanitizingMakeWriter`].
pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }

    fn write_sanitized(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(sanitize(&text).as_bytes())
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_sanitized(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A single line longer than twice the cap is emitted truncated.
        if self.buffer.len() > max_bytes().saturating_mul(2) {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn test_redacts_ihi() {
        let sanitized = sanitize("patient IHI 8003 6012 3456 7890 scored");
        assert_eq!(sanitized, "patient IHI [REDACTED-IHI] scored");

        let sanitized = sanitize("ihi=8003601234567890");
        assert_eq!(sanitized, "ihi=[REDACTED-IHI]");
    }

    #[test]
    fn test_redacts_medicare_number() {
        assert_eq!(
            sanitize("Medicare 2123 45670 1 on file"),
            "Medicare [REDACTED-MEDICARE] on file"
        );
        assert_eq!(sanitize("card=2123456701-2"), "card=[REDACTED-MEDICARE]");
    }

    #[test]
    fn test_redacts_dates_of_birth() {
        assert_eq!(sanitize("born 03/07/1951"), "born [REDACTED-DOB]");
        assert_eq!(sanitize("DOB: 1951-07-03"), "[REDACTED-DOB]");
        assert_eq!(sanitize("date_of_birth=1951-07-03 ok"), "[REDACTED-DOB] ok");
    }

    #[test]
    fn test_log_timestamps_are_kept() {
        let line = "2026-10-19T04:11:52.123456Z  INFO hch_prm: Assessment complete";
        assert_eq!(sanitize(line), line);
    }

    #[test]
    fn test_redacts_contact_details() {
        assert_eq!(sanitize("mail j.citizen@example.com.au"), "mail [REDACTED-EMAIL]");
        assert_eq!(sanitize("mobile 0412 345 678"), "mobile [REDACTED-PHONE]");
        assert_eq!(sanitize("call +61 3 9123 4567"), "call [REDACTED-PHONE]");
    }

    #[test]
    fn test_redacts_uuid() {
        let sanitized = sanitize("key 550e8400-e29b-41d4-a716-446655440000 processed");
        assert!(sanitized.contains("[REDACTED-UUID]"));
        assert!(!sanitized.contains("550e8400"));
    }

    #[test]
    fn test_scores_are_not_identifiers() {
        let line = "Assessment complete: probability=0.07246763, diseases=5, medications=2";
        assert_eq!(sanitize(line), line);
        assert_eq!(sanitize("linear_predictor=-2.54938769"), "linear_predictor=-2.54938769");
        assert_eq!(sanitize("ihi 8003608166690503"), "ihi [REDACTED-IHI]");
    }

    #[test]
    fn test_long_decimal_fractions_are_kept() {
        for line in [
            "linear_predictor=-0.5123456789",
            "linear_predictor=0.0412345678",
            "linear_predictor=-0.51234567891",
            "linear_predictor=0.04123456789",
            "linear_predictor=36.2123456701",
            "linear_predictor=0.8003601234567891",
        ] {
            assert_eq!(sanitize(line), line);
        }
    }

    #[test]
    fn test_identifiers_at_line_start_are_redacted() {
        assert_eq!(sanitize("2123456701 seen"), "[REDACTED-MEDICARE] seen");
        assert_eq!(sanitize("0412345678 rang"), "[REDACTED-PHONE] rang");
        assert_eq!(sanitize("8003608166690503"), "[REDACTED-IHI]");
    }

    #[test]
    fn test_truncates_large_inputs() {
        let sanitized = sanitize_with_limit("héllo world", 2);
        assert_eq!(sanitized, "h [TRUNCATED]");
    }

    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("sink lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_redacts_split_lines() {
        let sink = Sink::default();
        {
            let mut writer = SanitizingWriter::new(sink.clone());
            writer.write_all(b"ihi 8003 6012 ").expect("write");
            writer.write_all(b"3456 7890\nnext").expect("write");
        }
        let written = String::from_utf8(sink.0.lock().expect("sink lock").clone()).expect("utf8");
        assert_eq!(written, "ihi [REDACTED-IHI]\nnext");
    }
}
