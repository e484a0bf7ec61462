// Clipboard text: tab-separated fields, one line per row

use std::io::Read;
use std::path::Path;

use gridclip_core::PasteBlock;

/// Split clipboard text into a block of raw tokens.
///
/// A single trailing line break is dropped (spreadsheets end every copied
/// row with one). Blank lines inside the text are rows with one empty token.
/// Fields may be double-quoted to carry tabs, quotes or line breaks.
pub fn parse(text: &str) -> Result<PasteBlock, String> {
    let body = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text);
    if body.is_empty() {
        return Ok(PasteBlock::default());
    }

    let mut rows = Vec::new();
    for line in split_records(body) {
        let line = line.strip_suffix('\r').unwrap_or(line);
        rows.push(parse_line(line)?);
    }
    Ok(PasteBlock::new(rows))
}

/// Split on line breaks that are not inside a quoted field, following the
/// csv quoting rule: a quote opens a field only at its start, `""` inside a
/// quoted field is a literal quote.
fn split_records(body: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut field_start = true;

    let mut chars = body.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek().map(|&(_, next)| next) == Some('"') {
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field_start => {
                in_quotes = true;
                field_start = false;
            }
            '\t' if !in_quotes => field_start = true,
            '\n' if !in_quotes => {
                records.push(&body[start..i]);
                start = i + 1;
                field_start = true;
            }
            _ => field_start = false,
        }
    }
    records.push(&body[start..]);
    records
}

fn parse_line(line: &str) -> Result<Vec<String>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(record) => {
            let record = record.map_err(|e| e.to_string())?;
            Ok(record.iter().map(str::to_string).collect())
        }
        // csv skips empty lines; on the clipboard they are one empty cell
        None => Ok(vec![String::new()]),
    }
}

/// Render a block as clipboard text, every row terminated by a newline.
pub fn format(block: &PasteBlock) -> Result<String, String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in block.rows() {
        writer.write_record(row).map_err(|e| e.to_string())?;
    }

    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

/// Read clipboard text from a file and parse it.
pub fn import(path: &Path) -> Result<PasteBlock, String> {
    parse(&read_file_as_utf8(path)?)
}

/// Read clipboard text from any reader (stdin for the CLI).
pub fn import_from_reader<R: Read>(mut reader: R) -> Result<PasteBlock, String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|e| e.to_string())?;
    parse(&decode(bytes))
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let bytes = std::fs::read(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(decode(bytes))
}

fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            log::debug!("clipboard text is not UTF-8, decoding as Windows-1252");
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}
