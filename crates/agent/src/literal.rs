//! Literal evaluator for tool arguments.
//!
//! The model writes tool calls as `name(<argument>)`. The argument must be a
//! single literal value: a quoted string (adjacent strings concatenate), an
//! integer or float with an optional leading `-` or `+`, `True`, `False` or
//! `None`. Names, operators, calls and collections are rejected; nothing is
//! ever evaluated.
//!
//! Strings decode the usual backslash escapes including `\xNN`, `\uNNNN`
//! and `\UNNNNNNNN`. Named escapes (`\N{...}`) and triple-quoted, raw,
//! bytes or f-strings are not supported; `\N{...}` is kept as written.

use std::fmt;

/// A parsed literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    None,
}

/// Renders the value as the string handed to a tool: strings verbatim,
/// everything else in source form.
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => f.write_str(s),
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Float(x) => write!(f, "{x:?}"),
            Literal::Bool(true) => f.write_str("True"),
            Literal::Bool(false) => f.write_str("False"),
            Literal::None => f.write_str("None"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LiteralError {
    #[error("empty argument")]
    Empty,

    #[error("unexpected end of argument")]
    UnexpectedEnd,

    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unexpected character '{ch}' at offset {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("name '{0}' is not a literal")]
    Name(String),

    #[error("call to '{0}' is not allowed")]
    Call(String),

    #[error("operator '{0}' is not allowed in a literal")]
    Operator(char),

    #[error("invalid escape sequence '{0}'")]
    InvalidEscape(String),

    #[error("expected exactly one argument")]
    MultipleArguments,
}

/// Parse `input` as a single literal.
pub fn parse_literal(input: &str) -> Result<Literal, LiteralError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(LiteralError::Empty);
    }

    let mut parser = Parser::new(&tokens);
    let value = parser.parse_value()?;

    match parser.peek() {
        None => Ok(value),
        Some(Token::Comma) => Err(LiteralError::MultipleArguments),
        Some(Token::Punct(c)) => Err(LiteralError::Operator(*c)),
        Some(Token::Name(name)) => Err(LiteralError::Name(name.clone())),
        Some(Token::Str(_) | Token::Int(_) | Token::Float(_)) => Err(LiteralError::MultipleArguments),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Str(String),
    Int(i64),
    Float(f64),
    Name(String),
    Comma,
    /// Any other punctuation: operators, brackets, parentheses.
    Punct(char),
}

fn tokenize(input: &str) -> Result<Vec<Token>, LiteralError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            c if c.is_whitespace() => i += 1,
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            quote @ ('"' | '\'') => {
                let (s, next) = read_string(&chars, i, quote)?;
                tokens.push(Token::Str(s));
                i = next;
            }
            c if c.is_ascii_digit()
                || (c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit())) =>
            {
                let (token, next) = read_number(&chars, i)?;
                tokens.push(token);
                i = next;
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                tokens.push(Token::Name(chars[start..i].iter().collect()));
            }
            c if c.is_ascii_punctuation() => {
                tokens.push(Token::Punct(c));
                i += 1;
            }
            c => return Err(LiteralError::UnexpectedChar { ch: c, pos: i }),
        }
    }

    Ok(tokens)
}

/// Read a quoted string starting at `start` (the opening quote). Returns
/// the unescaped contents and the index after the closing quote.
fn read_string(chars: &[char], start: usize, quote: char) -> Result<(String, usize), LiteralError> {
    let mut out = String::new();
    let mut i = start + 1;

    while i < chars.len() {
        match chars[i] {
            c if c == quote => return Ok((out, i + 1)),
            '\n' => break,
            '\\' => {
                let Some(&escaped) = chars.get(i + 1) else {
                    break;
                };
                i += 2;
                match escaped {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    '0' => out.push('\0'),
                    'a' => out.push('\u{07}'),
                    'b' => out.push('\u{08}'),
                    'f' => out.push('\u{0c}'),
                    'v' => out.push('\u{0b}'),
                    '\\' | '\'' | '"' => out.push(escaped),
                    'x' | 'u' | 'U' => {
                        let len = match escaped {
                            'x' => 2,
                            'u' => 4,
                            _ => 8,
                        };
                        let decoded = read_hex(chars, i, len).ok_or_else(|| {
                            let end = (i + len).min(chars.len());
                            LiteralError::InvalidEscape(chars[i - 2..end].iter().collect())
                        })?;
                        out.push(decoded);
                        i += len;
                    }
                    // Unknown escapes, and `\N{...}`, keep their backslash.
                    other => {
                        out.push('\\');
                        out.push(other);
                    }
                }
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    Err(LiteralError::UnterminatedString(start))
}

/// Decode exactly `len` hex digits at `at` into a char.
fn read_hex(chars: &[char], at: usize, len: usize) -> Option<char> {
    let digits = chars.get(at..at + len)?;
    if !digits.iter().all(char::is_ascii_hexdigit) {
        return None;
    }
    let digits: String = digits.iter().collect();
    u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32)
}

fn read_number(chars: &[char], start: usize) -> Result<(Token, usize), LiteralError> {
    let mut i = start;
    let mut is_float = false;

    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '_') {
        i += 1;
    }
    if i < chars.len() && chars[i] == '.' {
        is_float = true;
        i += 1;
        while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '_') {
            i += 1;
        }
    }
    if i < chars.len() && matches!(chars[i], 'e' | 'E') {
        is_float = true;
        i += 1;
        if i < chars.len() && matches!(chars[i], '+' | '-') {
            i += 1;
        }
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
    }
    // Trailing letters glue onto the number, e.g. `12abc`.
    while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
        i += 1;
    }

    let text: String = chars[start..i].iter().collect();
    let digits = text.replace('_', "");
    let token = if is_float {
        digits
            .parse()
            .map(Token::Float)
            .map_err(|_| LiteralError::InvalidNumber(text.clone()))?
    } else {
        digits
            .parse()
            .map(Token::Int)
            .map_err(|_| LiteralError::InvalidNumber(text.clone()))?
    };

    Ok((token, i))
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    // value = STRING+ | ('-' | '+')? NUMBER | KEYWORD
    fn parse_value(&mut self) -> Result<Literal, LiteralError> {
        match self.consume() {
            Some(Token::Str(first)) => {
                let mut s = first.clone();
                while let Some(Token::Str(next)) = self.peek() {
                    s.push_str(next);
                    self.pos += 1;
                }
                Ok(Literal::Str(s))
            }
            Some(Token::Int(n)) => Ok(Literal::Int(*n)),
            Some(Token::Float(x)) => Ok(Literal::Float(*x)),
            Some(Token::Punct('-')) => match self.consume() {
                Some(Token::Int(n)) => n
                    .checked_neg()
                    .map(Literal::Int)
                    .ok_or_else(|| LiteralError::InvalidNumber(format!("-{n}"))),
                Some(Token::Float(x)) => Ok(Literal::Float(-x)),
                Some(_) => Err(LiteralError::Operator('-')),
                None => Err(LiteralError::UnexpectedEnd),
            },
            Some(Token::Punct('+')) => match self.consume() {
                Some(Token::Int(n)) => Ok(Literal::Int(*n)),
                Some(Token::Float(x)) => Ok(Literal::Float(*x)),
                Some(_) => Err(LiteralError::Operator('+')),
                None => Err(LiteralError::UnexpectedEnd),
            },
            Some(Token::Name(name)) => {
                let name = name.clone();
                match name.as_str() {
                    "True" => Ok(Literal::Bool(true)),
                    "False" => Ok(Literal::Bool(false)),
                    "None" => Ok(Literal::None),
                    _ if matches!(self.peek(), Some(Token::Punct('('))) => {
                        Err(LiteralError::Call(name))
                    }
                    _ => Err(LiteralError::Name(name)),
                }
            }
            Some(Token::Comma) => Err(LiteralError::UnexpectedChar {
                ch: ',',
                pos: self.pos - 1,
            }),
            Some(Token::Punct(c)) => Err(LiteralError::Operator(*c)),
            None => Err(LiteralError::UnexpectedEnd),
        }
    }
}
