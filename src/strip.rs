//! Comment removal for JSON configuration text.
//!
//! This module implements the lexical pre-pass that turns commented JSON
//! into text the strict decoder accepts:
//!
//! - `// ...` comments are removed up to (but not including) the newline
//! - `/* ... */` comments are removed entirely, across lines
//! - a comma left dangling before `]` or `}` — whether written in the
//!   source or exposed by removing a comment — is removed as well
//!
//! The scan is a single left-to-right pass driven by an explicit state
//! machine, so string literals are tracked exactly: comment markers inside
//! a quoted string are literal text, and escaped quotes never end a string
//! early.
//!
//! ## Examples
//!
//! ```rust
//! use jsonc_include::strip_comments;
//!
//! let text = r#"{
//!     "name": "demo", // inline note
//!     "tags": ["a", "b", /* soon */ ],
//! }"#;
//!
//! let clean = strip_comments(text);
//! let value: serde_json::Value = serde_json::from_str(&clean).unwrap();
//! assert_eq!(value["tags"].as_array().unwrap().len(), 2);
//! ```
//!
//! There are no error conditions. Malformed comment syntax is treated
//! permissively: an unterminated `//` or `/*` comment at end of input is
//! stripped, and a lone `/` that opens no comment is kept as-is (the
//! grammar has no division operator, so nothing else can claim it).

/// Lexical mode of the scanner. One tag per mode keeps the state space
/// exhaustively matchable; invalid flag combinations cannot exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Outside strings and comments.
    Normal,
    /// A `\` was seen in `Normal`; the next character is inert.
    NormalEscape,
    /// Inside a quoted string literal.
    InString,
    /// A `\` was seen in a string; the next character is inert.
    StringEscape,
    /// A `/` was seen in `Normal`; deciding between `//`, `/*`, and
    /// a lone slash.
    MaybeComment,
    /// Inside `// ...`, scanning for the newline.
    LineComment,
    /// Inside `/* ... */`, scanning for the closing `*`.
    BlockComment,
    /// A `*` was seen inside a block comment; `/` would close it.
    MaybeBlockEnd,
}

/// Removes `//` and `/* */` comments and dangling trailing commas.
///
/// The output is syntactically equivalent JSON: decoding the result is the
/// intended next step. Newlines that terminate `//` comments are kept so
/// decoder error positions still line up with the source.
///
/// Idempotent: stripping already-stripped text returns it unchanged.
///
/// # Examples
///
/// ```rust
/// use jsonc_include::strip_comments;
///
/// assert_eq!(strip_comments("[1, 2] // done"), "[1, 2] ");
/// assert_eq!(strip_comments("[1, 2, ]"), "[1, 2 ]");
/// assert_eq!(
///     strip_comments(r#"{"a": "// not a comment"}"#),
///     r#"{"a": "// not a comment"}"#,
/// );
/// ```
#[must_use]
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = State::Normal;

    for ch in text.chars() {
        state = match state {
            State::Normal => scan_normal(ch, &mut out),
            State::NormalEscape => {
                out.push(ch);
                State::Normal
            }
            State::InString => match ch {
                '"' => {
                    out.push(ch);
                    State::Normal
                }
                '\\' => {
                    out.push(ch);
                    State::StringEscape
                }
                _ => {
                    out.push(ch);
                    State::InString
                }
            },
            State::StringEscape => {
                out.push(ch);
                State::InString
            }
            State::MaybeComment => match ch {
                '/' => State::LineComment,
                '*' => State::BlockComment,
                _ => {
                    // Not a comment after all: release the withheld slash
                    // and process this character as ordinary input.
                    out.push('/');
                    scan_normal(ch, &mut out)
                }
            },
            State::LineComment => {
                if ch == '\n' {
                    out.push('\n');
                    State::Normal
                } else {
                    State::LineComment
                }
            }
            State::BlockComment => {
                if ch == '*' {
                    State::MaybeBlockEnd
                } else {
                    State::BlockComment
                }
            }
            State::MaybeBlockEnd => match ch {
                '/' => State::Normal,
                '*' => State::MaybeBlockEnd,
                _ => State::BlockComment,
            },
        };
    }

    // A slash with nothing after it was not a comment opener. Open
    // comments at end of input are dropped whole.
    if state == State::MaybeComment {
        out.push('/');
    }

    out
}

fn scan_normal(ch: char, out: &mut String) -> State {
    match ch {
        '"' => {
            out.push(ch);
            State::InString
        }
        '\\' => {
            out.push(ch);
            State::NormalEscape
        }
        '/' => State::MaybeComment,
        ']' | '}' => {
            trim_dangling_comma(out);
            out.push(ch);
            State::Normal
        }
        _ => {
            out.push(ch);
            State::Normal
        }
    }
}

/// Deletes the comma preceding a closing bracket, if the only characters
/// between them are whitespace. Worst case walks the whole trailing
/// whitespace run, so inputs with huge whitespace runs before closers pay
/// for it; correctness is unaffected.
fn trim_dangling_comma(out: &mut String) {
    for (idx, ch) in out.char_indices().rev() {
        if ch.is_whitespace() {
            continue;
        }
        if ch == ',' {
            out.remove(idx);
        }
        break;
    }
}
