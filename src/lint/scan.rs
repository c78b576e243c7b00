//! A lenient tokenizer over raw catalog text
//!
//! The lint passes have to look at the document before (or instead of)
//! parsing it: a parser collapses duplicate keys and stops at the first
//! syntax error. The scanner only splits the input into structural tokens and
//! string literals with their byte ranges, and never fails. Braces inside
//! strings, escaped quotes included, are not structural.

/// The kind of a scanned token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Colon,
    Comma,
    /// A string literal; `terminated` is false if the input ended inside it.
    String { terminated: bool },
    /// A run of anything else that is not whitespace (numbers, `true`, junk).
    Other,
}

/// A token and its byte range in the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    /// The token's source text.
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start..self.end]
    }
}

/// Iterator over the tokens of a document.
pub struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn scan_string(&mut self, start: usize) -> Token {
        let mut escaped = false;
        let mut pos = start + 1;
        while pos < self.bytes.len() {
            let byte = self.bytes[pos];
            pos += 1;
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                self.pos = pos;
                return Token {
                    kind: TokenKind::String { terminated: true },
                    start,
                    end: pos,
                };
            }
        }
        self.pos = self.bytes.len();
        Token {
            kind: TokenKind::String { terminated: false },
            start,
            end: self.bytes.len(),
        }
    }

    fn scan_other(&mut self, start: usize) -> Token {
        let mut pos = start;
        while pos < self.bytes.len() && !is_delimiter(self.bytes[pos]) {
            pos += 1;
        }
        self.pos = pos;
        Token {
            kind: TokenKind::Other,
            start,
            end: pos,
        }
    }
}

fn is_delimiter(byte: u8) -> bool {
    byte.is_ascii_whitespace() || matches!(byte, b'{' | b'}' | b'[' | b']' | b':' | b',' | b'"')
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        let start = self.pos;
        let byte = *self.bytes.get(start)?;

        let single = |kind| Token {
            kind,
            start,
            end: start + 1,
        };
        let token = match byte {
            b'{' => single(TokenKind::OpenBrace),
            b'}' => single(TokenKind::CloseBrace),
            b'[' => single(TokenKind::OpenBracket),
            b']' => single(TokenKind::CloseBracket),
            b':' => single(TokenKind::Colon),
            b',' => single(TokenKind::Comma),
            b'"' => return Some(self.scan_string(start)),
            _ => return Some(self.scan_other(start)),
        };
        self.pos = token.end;
        Some(token)
    }
}

/// Decode a string token's content, falling back to the raw text between the
/// quotes when the escapes are invalid.
pub fn decode_string(raw: &str) -> String {
    serde_json::from_str::<String>(raw).unwrap_or_else(|_| {
        let inner = raw.strip_prefix('"').unwrap_or(raw);
        inner.strip_suffix('"').unwrap_or(inner).to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Scanner::new(input).map(|t| t.kind).collect()
    }

    #[test]
    fn test_structural_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds(r#"{"a": ["b", 1]}"#),
            vec![
                OpenBrace,
                String { terminated: true },
                Colon,
                OpenBracket,
                String { terminated: true },
                Comma,
                Other,
                CloseBracket,
                CloseBrace
            ]
        );
    }

    #[test]
    fn test_braces_inside_strings_are_not_structural() {
        let tokens: Vec<Token> = Scanner::new(r#"{"a": "{{count}} \"}\""}"#).collect();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[3].text(r#"{"a": "{{count}} \"}\""}"#), r#""{{count}} \"}\"""#);
    }

    #[test]
    fn test_unterminated_string() {
        let tokens: Vec<Token> = Scanner::new(r#"{"a": "oops"#).collect();
        assert_eq!(
            tokens.last().unwrap().kind,
            TokenKind::String { terminated: false }
        );
    }

    #[test]
    fn test_multibyte_text_offsets() {
        let input = r#"{"标题": "值"}"#;
        let tokens: Vec<Token> = Scanner::new(input).collect();
        assert_eq!(tokens[1].text(input), r#""标题""#);
        assert_eq!(tokens[3].text(input), r#""值""#);
    }

    #[test]
    fn test_decode_string() {
        assert_eq!(decode_string(r#""a\"b""#), "a\"b");
        assert_eq!(decode_string(r#""中""#), "中");
        assert_eq!(decode_string(r#""bad \q""#), r"bad \q");
    }
}
