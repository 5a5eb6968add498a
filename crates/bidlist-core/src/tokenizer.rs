//! Field tokenizer
//!
//! Splits one line of delimited text into field strings under RFC-4180
//! style quoting: a field that opens with a quote may contain the
//! delimiter, a doubled quote inside a quoted region is one literal
//! quote, and characters after a closing quote are kept literally up to
//! the next delimiter.

use crate::error::ParseError;

/// Split a single line into fields.
///
/// `line_number` is 1-based and only used for error reporting. A line
/// with n delimiters always produces n + 1 fields, so the empty line
/// tokenizes to one empty field and a trailing delimiter produces a
/// trailing empty field.
///
/// Fails when the line ends while a quoted field is still open. The
/// caller's state is never touched; all work happens on owned buffers.
pub fn tokenize(line: &str, line_number: usize, delimiter: char) -> Result<Vec<String>, ParseError> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut at_field_start = true;

    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    // Doubled quote: one literal quote, field stays open
                    chars.next();
                    field.push('"');
                } else {
                    // Closing quote; anything before the next delimiter
                    // is appended literally
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
        } else if ch == delimiter {
            fields.push(std::mem::take(&mut field));
            at_field_start = true;
            continue;
        } else if ch == '"' && at_field_start {
            in_quotes = true;
        } else {
            field.push(ch);
        }
        at_field_start = false;
    }

    if in_quotes {
        return Err(ParseError {
            line: line_number,
            text: line.to_string(),
        });
    }

    fields.push(field);
    Ok(fields)
}
