//! BQS lexer — tokenizes a boolean query string.

use crate::{Error, Result};

/// A token from the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: String,
}

/// Source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Token kinds. Keywords are case-insensitive; DMS coordinates such as
/// `81:45:33.2N` arrive as number/colon/identifier runs and are reassembled
/// by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords
    And, Or, Not, Like,
    Intersect, Within, Beyond, Of,

    // Shape literal heads
    Point, Rectangle, Polygon, Line, Circle, Ellipse,

    // Literals
    Number, StringLiteral,

    // Identifiers (field names, hemisphere letters, unit words)
    Identifier,

    // Punctuation and operators
    LParen, RParen, Comma, Dot, Colon,
    Eq, Neq, Lt, Lte, Gt, Gte,

    Eof,
}

/// Tokenize a BQS query string.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }

            // Quoted literals. BQS has no escape syntax; a quote always
            // terminates the literal.
            '\'' => {
                chars.next(); // consume opening quote
                let start = pos;
                let mut s = String::new();
                loop {
                    match chars.next() {
                        Some((end, '\'')) => {
                            tokens.push(Token {
                                kind: TokenKind::StringLiteral,
                                span: Span { start, end: end + 1 },
                                text: s,
                            });
                            break;
                        }
                        Some((_, c)) => s.push(c),
                        None => {
                            return Err(Error::SyntaxError {
                                position: start,
                                message: "Unterminated string literal".into(),
                            });
                        }
                    }
                }
            }

            // Numbers, optionally signed.
            c if c.is_ascii_digit() || c == '-' || c == '+' => {
                let start = pos;
                let mut num = String::new();
                if c == '-' || c == '+' {
                    num.push(c);
                    chars.next();
                }
                let mut is_float = false;
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_digit() {
                        num.push(c);
                        chars.next();
                    } else if c == '.' && !is_float {
                        is_float = true;
                        num.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if num == "-" || num == "+" {
                    return Err(Error::SyntaxError {
                        position: start,
                        message: "Expected digits after sign".into(),
                    });
                }
                tokens.push(Token {
                    kind: TokenKind::Number,
                    span: Span { start, end: start + num.len() },
                    text: num,
                });
            }

            // Identifiers and keywords
            c if c.is_alphabetic() || c == '_' => {
                let start = pos;
                let mut ident = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let kind = keyword_or_ident(&ident);
                tokens.push(Token {
                    kind,
                    span: Span { start, end: start + ident.len() },
                    text: ident,
                });
            }

            '(' => { chars.next(); tokens.push(punct(TokenKind::LParen, pos, "(")); }
            ')' => { chars.next(); tokens.push(punct(TokenKind::RParen, pos, ")")); }
            ',' => { chars.next(); tokens.push(punct(TokenKind::Comma, pos, ",")); }
            '.' => { chars.next(); tokens.push(punct(TokenKind::Dot, pos, ".")); }
            ':' => { chars.next(); tokens.push(punct(TokenKind::Colon, pos, ":")); }
            '=' => { chars.next(); tokens.push(punct(TokenKind::Eq, pos, "=")); }
            '<' => {
                chars.next();
                if matches!(chars.peek(), Some(&(_, '='))) {
                    chars.next();
                    tokens.push(punct(TokenKind::Lte, pos, "<="));
                } else if matches!(chars.peek(), Some(&(_, '>'))) {
                    chars.next();
                    tokens.push(punct(TokenKind::Neq, pos, "<>"));
                } else {
                    tokens.push(punct(TokenKind::Lt, pos, "<"));
                }
            }
            '>' => {
                chars.next();
                if matches!(chars.peek(), Some(&(_, '='))) {
                    chars.next();
                    tokens.push(punct(TokenKind::Gte, pos, ">="));
                } else {
                    tokens.push(punct(TokenKind::Gt, pos, ">"));
                }
            }

            other => {
                return Err(Error::SyntaxError {
                    position: pos,
                    message: format!("Unexpected character: '{other}'"),
                });
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span { start: input.len(), end: input.len() },
        text: String::new(),
    });

    Ok(tokens)
}

fn punct(kind: TokenKind, pos: usize, text: &str) -> Token {
    Token {
        kind,
        span: Span { start: pos, end: pos + text.len() },
        text: text.to_string(),
    }
}

fn keyword_or_ident(s: &str) -> TokenKind {
    match s.to_uppercase().as_str() {
        "AND" => TokenKind::And,
        "OR" => TokenKind::Or,
        "NOT" => TokenKind::Not,
        "LIKE" => TokenKind::Like,
        "INTERSECT" => TokenKind::Intersect,
        "WITHIN" => TokenKind::Within,
        "BEYOND" => TokenKind::Beyond,
        "OF" => TokenKind::Of,
        "POINT" => TokenKind::Point,
        "RECTANGLE" => TokenKind::Rectangle,
        "POLYGON" => TokenKind::Polygon,
        "LINE" => TokenKind::Line,
        "CIRCLE" => TokenKind::Circle,
        "ELLIPSE" => TokenKind::Ellipse,
        _ => TokenKind::Identifier,
    }
}
