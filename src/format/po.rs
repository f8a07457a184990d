//! PO catalog reading and writing on top of `polib`.
//!
//! `polib` expects a complete gettext header and slices quoted strings
//! without checking them. Lokalise exports and hand-written source files often
//! carry only `Content-Type` and `Plural-Forms`, so the header is completed
//! with neutral values and every quoted line is checked before parsing.

use polib::catalog::Catalog;
use polib::po_file;

use super::FormatError;

/// Header fields `polib` requires, with the value used when one is missing.
const REQUIRED_HEADER_FIELDS: [(&str, &str); 9] = [
    ("Project-Id-Version", ""),
    ("POT-Creation-Date", ""),
    ("PO-Revision-Date", ""),
    ("Language-Team", ""),
    ("MIME-Version", "1.0"),
    ("Content-Type", "text/plain; charset=UTF-8"),
    ("Content-Transfer-Encoding", "8bit"),
    ("Language", ""),
    ("Plural-Forms", "nplurals=2; plural=(n != 1);"),
];

const KEYWORDS: [&str; 5] = ["msgctxt ", "msgid ", "msgid_plural ", "msgstr ", "msgstr["];

const COMMENT_FIELDS: [&str; 3] = ["#. ", "#: ", "#, "];

/// Parse PO text into a catalog.
pub(super) fn read_catalog(raw: &str) -> Result<Catalog, FormatError> {
    check_lines(raw)?;
    let text = complete_header(raw);

    // polib reads catalogs through the filesystem
    let scratch = tempfile::TempDir::new()?;
    let path = scratch.path().join("catalog.po");
    std::fs::write(&path, text)?;

    po_file::parse(&path).map_err(|e| FormatError::Po {
        message: e.to_string(),
    })
}

/// Serialize a catalog to PO text.
pub(super) fn write_catalog(catalog: &Catalog) -> Result<String, FormatError> {
    let scratch = tempfile::TempDir::new()?;
    let path = scratch.path().join("catalog.po");

    po_file::write(catalog, &path).map_err(|e| FormatError::Po {
        message: e.to_string(),
    })?;

    Ok(std::fs::read_to_string(&path)?)
}

fn check_lines(raw: &str) -> Result<(), FormatError> {
    let mut field_open = false;

    for (index, line) in raw.lines().enumerate() {
        let number = index + 1;

        if COMMENT_FIELDS.iter().any(|prefix| line.starts_with(*prefix)) {
            field_open = true;
        } else if line.starts_with('"') {
            if !field_open {
                return Err(malformed(number, "string without a keyword"));
            }
            if !is_quoted(line) {
                return Err(malformed(number, "unterminated string"));
            }
        } else if let Some(value) = keyword_value(line) {
            if !is_quoted(value) {
                return Err(malformed(number, "value is not a quoted string"));
            }
            field_open = true;
        }
    }

    Ok(())
}

/// Value after a `msgid`, `msgstr[N]` or similar keyword.
fn keyword_value(line: &str) -> Option<&str> {
    let keyword = KEYWORDS.iter().find(|k| line.starts_with(**k))?;
    let rest = &line[keyword.len()..];

    if *keyword == "msgstr[" {
        let (index, value) = rest.split_once("] ")?;
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        return Some(value);
    }

    Some(rest)
}

fn is_quoted(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('"') && value.ends_with('"')
}

fn malformed(line: usize, reason: &str) -> FormatError {
    FormatError::Po {
        message: format!("line {}: {}", line, reason),
    }
}

/// Add missing required fields to the header, or a whole header if the file
/// has none.
fn complete_header(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().collect();

    let Some((insert_at, present, ends_with_newline)) = find_header(&lines) else {
        let mut text = String::from("msgid \"\"\nmsgstr \"\"\n");
        for (key, value) in REQUIRED_HEADER_FIELDS {
            text.push_str(&header_line(key, value));
        }
        text.push('\n');
        text.push_str(raw);
        return text;
    };

    let missing: Vec<String> = REQUIRED_HEADER_FIELDS
        .iter()
        .filter(|(key, _)| !present.iter().any(|p| p.as_str() == *key))
        .map(|(key, value)| header_line(key, value))
        .collect();
    if missing.is_empty() {
        return raw.to_string();
    }

    let mut text = String::new();
    for line in &lines[..insert_at] {
        text.push_str(line);
        text.push('\n');
    }
    if !ends_with_newline {
        text.push_str("\"\\n\"\n");
    }
    for line in missing {
        text.push_str(&line);
    }
    for line in &lines[insert_at..] {
        text.push_str(line);
        text.push('\n');
    }
    text
}

fn header_line(key: &str, value: &str) -> String {
    format!("\"{}: {}\\n\"\n", key, value)
}

/// Locate the header entry: `msgid ""` as the first message id, directly
/// followed by its `msgstr`.
///
/// Returns the line index just past the header's last string, the field
/// names it already carries, and whether its text ends with a newline escape.
fn find_header(lines: &[&str]) -> Option<(usize, Vec<String>, bool)> {
    let msgid_at = lines.iter().position(|line| line.starts_with("msgid "))?;
    if lines[msgid_at] != "msgid \"\"" {
        return None;
    }
    let msgstr = lines.get(msgid_at + 1)?.strip_prefix("msgstr ")?;

    let mut content = unquote(msgstr).to_string();
    let mut end = msgid_at + 2;
    while let Some(line) = lines.get(end).filter(|line| line.starts_with('"')) {
        content.push_str(unquote(line));
        end += 1;
    }

    let present = content
        .split("\\n")
        .filter_map(|entry| entry.split_once(':'))
        .map(|(key, _)| key.trim().to_string())
        .collect();
    let ends_with_newline = content.is_empty() || content.ends_with("\\n");

    Some((end, present, ends_with_newline))
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
