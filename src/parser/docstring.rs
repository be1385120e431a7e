// String literal decoding and docstring cleanup

const TAB_SIZE: usize = 8;

/// A decoded Python string literal
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    /// Literal content with quotes removed and escapes decoded
    pub value: String,
    pub is_bytes: bool,
    pub is_formatted: bool,
}

impl StringLiteral {
    /// Plain `str` literals are the only ones that can act as docstrings
    pub fn is_plain(&self) -> bool {
        !self.is_bytes && !self.is_formatted
    }
}

/// Decode the source text of a single string literal, prefix and quotes included.
///
/// Returns `None` when the text is not shaped like a literal.
pub fn parse_string_literal(text: &str) -> Option<StringLiteral> {
    let quote_at = text.find(|c: char| c == '"' || c == '\'')?;
    let (prefix, quoted) = text.split_at(quote_at);

    if !prefix.chars().all(|c| "rRbBuUfF".contains(c)) {
        return None;
    }

    let quote_len = if quoted.starts_with("\"\"\"") || quoted.starts_with("'''") {
        3
    } else {
        1
    };
    if quoted.len() < quote_len * 2 {
        return None;
    }
    let body = &quoted[quote_len..quoted.len() - quote_len];

    let lower = prefix.to_ascii_lowercase();
    let value = if lower.contains('r') {
        body.to_string()
    } else {
        unescape(body)
    };

    Some(StringLiteral {
        value,
        is_bytes: lower.contains('b'),
        is_formatted: lower.contains('f'),
    })
}

/// Decode backslash escapes of a non-raw literal body
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };

        match next {
            // Line continuation
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0b'),
            '0'..='7' => {
                let mut digits = next.to_string();
                while digits.len() < 3 {
                    match chars.peek() {
                        Some(d @ '0'..='7') => {
                            digits.push(*d);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                match u32::from_str_radix(&digits, 8).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('\\');
                        out.push_str(&digits);
                    }
                }
            }
            'x' | 'u' | 'U' => {
                let width = match next {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = chars.by_ref().take(width).collect();
                let decoded = if digits.len() == width {
                    u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32)
                } else {
                    None
                };
                match decoded {
                    Some(ch) => out.push(ch),
                    None => {
                        out.push('\\');
                        out.push(next);
                        out.push_str(&digits);
                    }
                }
            }
            'N' if chars.peek() == Some(&'{') => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for ch in chars.by_ref() {
                    if ch == '}' {
                        closed = true;
                        break;
                    }
                    name.push(ch);
                }
                match named_char(&name).filter(|_| closed) {
                    Some(ch) => out.push(ch),
                    None => {
                        out.push_str("\\N{");
                        out.push_str(&name);
                        if closed {
                            out.push('}');
                        }
                    }
                }
            }
            // Unknown escapes are kept verbatim
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    out
}

/// Character for a `\N{...}` escape. Only a set of names common in
/// docstrings is known; other names stay undecoded.
fn named_char(name: &str) -> Option<char> {
    let ch = match name.trim().to_ascii_uppercase().as_str() {
        "EM DASH" => '\u{2014}',
        "EN DASH" => '\u{2013}',
        "HYPHEN" => '\u{2010}',
        "BULLET" => '\u{2022}',
        "HORIZONTAL ELLIPSIS" => '\u{2026}',
        "NO-BREAK SPACE" => '\u{a0}',
        "LEFT SINGLE QUOTATION MARK" => '\u{2018}',
        "RIGHT SINGLE QUOTATION MARK" => '\u{2019}',
        "LEFT DOUBLE QUOTATION MARK" => '\u{201c}',
        "RIGHT DOUBLE QUOTATION MARK" => '\u{201d}',
        "DEGREE SIGN" => '\u{b0}',
        "MICRO SIGN" => '\u{b5}',
        "PLUS-MINUS SIGN" => '\u{b1}',
        "MULTIPLICATION SIGN" => '\u{d7}',
        "DIVISION SIGN" => '\u{f7}',
        "COPYRIGHT SIGN" => '\u{a9}',
        "REGISTERED SIGN" => '\u{ae}',
        "TRADE MARK SIGN" => '\u{2122}',
        "SECTION SIGN" => '\u{a7}',
        "PILCROW SIGN" => '\u{b6}',
        "EURO SIGN" => '\u{20ac}',
        "POUND SIGN" => '\u{a3}',
        "RIGHTWARDS ARROW" => '\u{2192}',
        "LEFTWARDS ARROW" => '\u{2190}',
        "INFINITY" => '\u{221e}',
        "NOT EQUAL TO" => '\u{2260}',
        "LESS-THAN OR EQUAL TO" => '\u{2264}',
        "GREATER-THAN OR EQUAL TO" => '\u{2265}',
        "GREEK SMALL LETTER ALPHA" => '\u{3b1}',
        "GREEK SMALL LETTER BETA" => '\u{3b2}',
        "GREEK SMALL LETTER LAMDA" => '\u{3bb}',
        "GREEK SMALL LETTER MU" => '\u{3bc}',
        "GREEK SMALL LETTER PI" => '\u{3c0}',
        "GREEK SMALL LETTER SIGMA" => '\u{3c3}',
        "GREEK CAPITAL LETTER DELTA" => '\u{394}',
        "GREEK CAPITAL LETTER SIGMA" => '\u{3a3}',
        "CHECK MARK" => '\u{2713}',
        "SNOWMAN" => '\u{2603}',
        _ => return None,
    };
    Some(ch)
}

/// Normalize docstring indentation.
///
/// Tabs are expanded, the first line loses its leading whitespace, the
/// smallest indentation of the remaining non-blank lines is removed from each
/// of them, and leading and trailing empty lines are dropped.
pub fn clean_docstring(doc: &str) -> String {
    let lines: Vec<String> = doc.split('\n').map(expand_tabs).collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let content = line.trim_start();
            if content.is_empty() {
                None
            } else {
                Some(line.chars().count() - content.chars().count())
            }
        })
        .min();

    let mut cleaned: Vec<String> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.trim_start().to_string()
            } else if let Some(margin) = margin {
                line.chars().skip(margin).collect()
            } else {
                line.clone()
            }
        })
        .collect();

    while cleaned.last().is_some_and(|line| line.is_empty()) {
        cleaned.pop();
    }
    let start = cleaned
        .iter()
        .position(|line| !line.is_empty())
        .unwrap_or(cleaned.len());

    cleaned[start..].join("\n")
}

fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;

    for c in line.chars() {
        if c == '\t' {
            let pad = TAB_SIZE - column % TAB_SIZE;
            out.extend(std::iter::repeat(' ').take(pad));
            column += pad;
        } else {
            out.push(c);
            column += 1;
        }
    }

    out
}
