//! Comma-separated record codec.
//!
//! # Invariants
//! - A field containing `,`, `"`, `\n` or `\r` is wrapped in double quotes
//!   and its quotes are doubled; every other field is written verbatim.
//! - `split_line` reverses `escape_field` exactly for every field value.
//! - `split_records` only ends a record at a `\n` outside quotes, so quoted
//!   line breaks stay inside their field.

/// Escapes one field for output.
pub fn escape_field(value: &str) -> String {
    if !value.contains([',', '"', '\n', '\r']) {
        return value.to_string();
    }

    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('"');
    for ch in value.chars() {
        if ch == '"' {
            escaped.push_str("\"\"");
        } else {
            escaped.push(ch);
        }
    }
    escaped.push('"');
    escaped
}

/// One undecoded record and the 1-based line it starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub line_number: usize,
    /// Record bytes without the terminating `\n` or `\r\n`.
    pub bytes: &'a [u8],
}

/// Splits file content into records at line breaks outside quoted fields.
///
/// Works on bytes so one undecodable record does not affect its neighbours.
/// A trailing newline does not produce an extra empty record.
pub fn split_records(input: &[u8]) -> Vec<RawRecord<'_>> {
    let mut records = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    let mut start_line = 1;
    let mut line = 1;

    for (index, &byte) in input.iter().enumerate() {
        match byte {
            b'"' => in_quotes = !in_quotes,
            b'\n' => {
                line += 1;
                if !in_quotes {
                    records.push(RawRecord {
                        line_number: start_line,
                        bytes: trim_carriage_return(&input[start..index]),
                    });
                    start = index + 1;
                    start_line = line;
                }
            }
            _ => {}
        }
    }

    if start < input.len() {
        records.push(RawRecord {
            line_number: start_line,
            bytes: trim_carriage_return(&input[start..]),
        });
    }
    records
}

fn trim_carriage_return(bytes: &[u8]) -> &[u8] {
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}

/// Joins fields into one output line without the trailing newline.
pub fn join_fields<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|field| escape_field(field.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Splits one input line into unescaped fields.
///
/// Commas inside a quoted section do not separate fields, and `""` inside
/// a quoted section yields one `"`.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
            continue;
        }

        match ch {
            ',' => fields.push(std::mem::take(&mut current)),
            '"' => in_quotes = true,
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::{escape_field, join_fields, split_line, split_records, RawRecord};

    #[test]
    fn plain_fields_are_written_verbatim() {
        assert_eq!(escape_field("Tolkien"), "Tolkien");
        assert_eq!(escape_field(""), "");
    }

    #[test]
    fn comma_and_quote_fields_are_quoted() {
        assert_eq!(escape_field("Smith, John"), "\"Smith, John\"");
        assert_eq!(escape_field("The \"One\""), "\"The \"\"One\"\"\"");
    }

    #[test]
    fn line_break_fields_are_quoted() {
        assert_eq!(escape_field("one\ntwo"), "\"one\ntwo\"");
        assert_eq!(escape_field("cr\r"), "\"cr\r\"");
    }

    #[test]
    fn split_records_keeps_quoted_line_breaks_together() {
        let input = b"id,name\r\n1,\"multi\nline\"\n\n2,plain\n";
        let records = split_records(input);
        assert_eq!(
            records,
            vec![
                RawRecord {
                    line_number: 1,
                    bytes: b"id,name",
                },
                RawRecord {
                    line_number: 2,
                    bytes: b"1,\"multi\nline\"",
                },
                RawRecord {
                    line_number: 4,
                    bytes: b"",
                },
                RawRecord {
                    line_number: 5,
                    bytes: b"2,plain",
                },
            ]
        );
    }

    #[test]
    fn split_records_keeps_unterminated_last_record() {
        let records = split_records(b"h\nlast");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].bytes, b"last");
        assert!(split_records(b"").is_empty());
    }

    #[test]
    fn split_line_handles_quoted_commas_and_doubled_quotes() {
        let fields = split_line("1,\"Smith, John\",\"say \"\"hi\"\"\",");
        assert_eq!(fields, vec!["1", "Smith, John", "say \"hi\"", ""]);
    }

    #[test]
    fn split_line_reverses_join_fields() {
        let values = ["7", "a,b", "\"", "", "x\"y,z", "two\r\nlines"];
        let line = join_fields(values);
        assert_eq!(split_line(&line), values);
    }

    #[test]
    fn empty_line_is_single_empty_field() {
        assert_eq!(split_line(""), vec![String::new()]);
    }
}
