//! Comment removal for JSON-with-comments documents.
//!
//! Supports `// line` and `/* block */` comments. Comment-like sequences
//! inside string literals are kept as-is.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InString,
    InLineComment,
    InBlockComment,
}

/// Strips comments from `src`, returning strict JSON bytes.
///
/// This never fails: an unterminated block comment swallows the rest of the
/// input and the JSON decoder reports the resulting document as malformed.
///
/// Escaped quotes are not tracked, so a string containing `\"` followed by
/// `//` is cut at the `//`.
pub fn strip_comments(src: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(src.len());
    let mut state = State::Normal;
    let mut prev = 0u8;

    for &b in src {
        match (state, b) {
            (State::Normal, b'"') => state = State::InString,
            (State::InString, b'"') => state = State::Normal,
            (State::Normal, b'/') if prev == b'/' => {
                output.pop();
                state = State::InLineComment;
            }
            (State::Normal, b'*') if prev == b'/' => {
                output.pop();
                state = State::InBlockComment;
            }
            (State::InBlockComment, b'/') if prev == b'*' => {
                state = State::Normal;
                prev = 0;
                continue;
            }
            (State::InLineComment, b'\n') => state = State::Normal,
            _ => {}
        }

        prev = b;

        if matches!(state, State::Normal | State::InString) {
            output.push(b);
        }
    }

    output
}
