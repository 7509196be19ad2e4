//! Outer key/value codec for the persisted CV file.
//!
//! Layout: UTF-8 byte-order mark, a `Field,Value` header, then one
//! `FieldName,EscapedValue` record per field in [`FIELD_ORDER`].
//! Values are opaque text here; JSON sub-fields are handled by
//! [`crate::store::entries`].
//!
//! [`FIELD_ORDER`]: crate::models::cv::FIELD_ORDER

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::models::cv::CvRecord;

pub const HEADER: &str = "Field,Value";
pub const BOM: char = '\u{feff}';

const SEPARATOR: char = ',';
const QUOTE: char = '"';

/// Quotes `value` when it contains the separator, a line break or a quote,
/// doubling embedded quotes. Anything else is returned unchanged.
pub fn escape_field(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    if value.contains([SEPARATOR, QUOTE, '\n', '\r']) {
        let doubled = value.replace(QUOTE, "\"\"");
        format!("\"{doubled}\"")
    } else {
        value.to_string()
    }
}

/// Serializes the record into the on-disk byte layout.
pub fn encode_record(cv: &CvRecord) -> Vec<u8> {
    let mut out = String::new();
    out.push(BOM);
    out.push_str(HEADER);
    out.push('\n');

    for (key, value) in cv.fields() {
        out.push_str(key);
        out.push(SEPARATOR);
        out.push_str(&escape_field(value));
        out.push('\n');
    }

    out.into_bytes()
}

/// Rebuilds a record from file bytes.
///
/// The first record is the header and is skipped. Records with fewer than two
/// fields are ignored and a repeated key keeps its last value. This never
/// fails: unreadable input degrades to default fields.
pub fn decode_record(bytes: &[u8]) -> CvRecord {
    let decoded = String::from_utf8_lossy(bytes);
    let text = decoded.strip_prefix(BOM).unwrap_or(&decoded);

    let mut data: HashMap<String, String> = HashMap::new();
    for record in parse_records(text).into_iter().skip(1) {
        let mut fields = record.into_iter();
        match (fields.next(), fields.next()) {
            (Some(key), Some(value)) => {
                data.insert(key, value);
            }
            (key, _) => debug!("Skipping CV record without a value: {:?}", key),
        }
    }

    CvRecord::from_fields(&data)
}

/// Splits a single line into fields. Line breaks are treated as data.
pub fn parse_line(line: &str) -> Vec<String> {
    let (mut records, _) = scan(line, LineBreak::Literal);
    records.pop().unwrap_or_else(|| vec![String::new()])
}

/// Splits a whole file into records of fields. An unquoted `\n` or `\r\n`
/// ends a record; a quoted one belongs to the value.
///
/// If the file ends inside an open quote, every physical line is parsed on
/// its own instead, so one unbalanced quote only damages its own line.
pub fn parse_records(text: &str) -> Vec<Vec<String>> {
    match scan(text, LineBreak::EndsRecord) {
        (records, QuoteState::Unquoted) => records,
        (_, QuoteState::Quoted) => {
            warn!("Unbalanced quote in CV file, parsing line by line");
            text.lines().map(parse_line).collect()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    Unquoted,
    Quoted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineBreak {
    EndsRecord,
    Literal,
}

/// Returns the records and the quote state at end of input.
fn scan(text: &str, line_break: LineBreak) -> (Vec<Vec<String>>, QuoteState) {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut state = QuoteState::Unquoted;
    let mut chars = text.chars().peekable();
    let splits_records = line_break == LineBreak::EndsRecord;

    while let Some(c) = chars.next() {
        match (state, c) {
            (QuoteState::Quoted, QUOTE) if chars.peek() == Some(&QUOTE) => {
                current.push(QUOTE);
                chars.next();
            }
            (QuoteState::Quoted, QUOTE) => state = QuoteState::Unquoted,
            (QuoteState::Unquoted, QUOTE) => state = QuoteState::Quoted,
            (QuoteState::Unquoted, SEPARATOR) => fields.push(std::mem::take(&mut current)),
            (QuoteState::Unquoted, '\r') if splits_records && chars.peek() == Some(&'\n') => {}
            (QuoteState::Unquoted, '\n') if splits_records => {
                fields.push(std::mem::take(&mut current));
                records.push(std::mem::take(&mut fields));
            }
            (_, other) => current.push(other),
        }
    }

    // Trailing record without a final line break.
    if !current.is_empty() || !fields.is_empty() || (!splits_records && records.is_empty()) {
        fields.push(current);
        records.push(fields);
    }

    (records, state)
}
