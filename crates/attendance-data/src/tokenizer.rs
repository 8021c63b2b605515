//! Quote-aware splitting of delimited sheet exports into rows of fields.
//!
//! The tokenizer never fails. Malformed quoting is kept literally, blank
//! rows are dropped and the last row is flushed without a trailing newline.

use tracing::warn;

/// One tokenized source row, fields in column order and untrimmed.
pub type RawRow = Vec<String>;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Split `text` into rows of fields.
///
/// * A quote at the start of a field opens quoted mode; inside it, `""` is a
///   literal quote and a lone `"` closes the quoted section.
/// * A quote anywhere else outside quoted mode is an ordinary character.
/// * Unquoted `,` ends a field; unquoted CR, LF or CRLF ends a row.
/// * Rows may differ in length.
/// * Rows whose fields are all blank after trimming are dropped.
pub fn tokenize(text: &str) -> Vec<RawRow> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);

    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes())
        .into_records()
        .filter_map(|record| match record {
            Ok(record) => Some(record.iter().map(str::to_string).collect::<RawRow>()),
            Err(e) => {
                warn!(error = %e, "skipping unreadable row");
                None
            }
        })
        .filter(|row| !is_blank_row(row))
        .collect()
}

/// `true` when every field is empty after trimming.
pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|field| field.trim().is_empty())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
