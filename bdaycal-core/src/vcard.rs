//! Minimal vCard reader.
//!
//! Only what a birthday calendar needs is extracted from each record: the
//! formatted name (`FN`) and the raw birthday (`BDAY`). Line folding and
//! property groups (`item1.BDAY`) follow RFC 6350 §3.2 / §3.3.

use crate::error::{BdayCalError, BdayCalResult};

/// One `BEGIN:VCARD` .. `END:VCARD` record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawContact {
    pub name: Option<String>,
    pub birthday: Option<String>,
    /// 1-based line of the record's `BEGIN:VCARD`.
    pub line: usize,
}

/// Read every contact record from a vCard document, in file order.
///
/// Records without `FN` or `BDAY` are returned as-is; deciding what to do
/// with them is up to the caller.
pub fn read_contacts(input: &str) -> BdayCalResult<Vec<RawContact>> {
    // Windows exporters often prepend a byte-order mark
    let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);

    let mut contacts = Vec::new();
    let mut current: Option<RawContact> = None;

    for (line_num, line) in unfold(input) {
        if line.trim().is_empty() {
            continue;
        }

        let Some(content) = parse_content_line(&line) else {
            if current.is_some() {
                return Err(parse_error(line_num, "missing colon separator"));
            }
            continue;
        };

        match content.name.as_str() {
            "BEGIN" if content.value.trim().eq_ignore_ascii_case("VCARD") => {
                if let Some(open) = &current {
                    return Err(parse_error(
                        line_num,
                        format!("BEGIN:VCARD inside the record started on line {}", open.line),
                    ));
                }
                current = Some(RawContact {
                    line: line_num,
                    ..RawContact::default()
                });
            }
            "END" if content.value.trim().eq_ignore_ascii_case("VCARD") => {
                let contact = current
                    .take()
                    .ok_or_else(|| parse_error(line_num, "END:VCARD without BEGIN:VCARD"))?;
                contacts.push(contact);
            }
            "FN" => {
                if let Some(contact) = current.as_mut() {
                    if contact.name.is_none() {
                        contact.name = non_empty(unescape_text(content.value.trim()));
                    }
                }
            }
            "BDAY" => {
                if let Some(contact) = current.as_mut() {
                    if contact.birthday.is_none() {
                        contact.birthday = non_empty(content.value.trim().to_string());
                    }
                }
            }
            _ => {}
        }
    }

    if let Some(open) = current {
        return Err(parse_error(open.line, "BEGIN:VCARD is never closed"));
    }

    Ok(contacts)
}

fn parse_error(line: usize, message: impl Into<String>) -> BdayCalError {
    BdayCalError::VcardParse {
        line,
        message: message.into(),
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// Join folded lines, keeping the line number each logical line started on.
///
/// A line starting with a space or tab continues the previous one; the
/// single leading whitespace character is removed.
fn unfold(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        if let Some(continuation) = line.strip_prefix([' ', '\t']) {
            if let Some((_, prev)) = lines.last_mut() {
                prev.push_str(continuation);
                continue;
            }
        }
        lines.push((idx + 1, line.to_string()));
    }

    lines
}

/// A content line with the parameters dropped.
struct ContentLine<'a> {
    /// Property name, uppercased, without its group.
    name: String,
    value: &'a str,
}

/// Split `[group.]name[;param=value]*:value`. Returns `None` without a colon.
fn parse_content_line(line: &str) -> Option<ContentLine<'_>> {
    let colon = find_value_separator(line)?;
    let (name_params, value) = line.split_at(colon);

    let name = name_params.split(';').next().unwrap_or_default();
    let name = name.rsplit_once('.').map_or(name, |(_group, name)| name);

    Some(ContentLine {
        name: name.trim().to_ascii_uppercase(),
        value: &value[1..],
    })
}

/// Finds the colon that separates name/params from value.
///
/// Quoted parameter values may contain colons.
fn find_value_separator(line: &str) -> Option<usize> {
    let mut in_quotes = false;

    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => return Some(i),
            _ => {}
        }
    }

    None
}

/// Decode TEXT escapes (`\\`, `\,`, `\;`, `\n`).
fn unescape_text(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => result.push('\n'),
            Some(escaped) => result.push(escaped),
            None => result.push('\\'),
        }
    }

    result
}
