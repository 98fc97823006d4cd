//! Lexical analysis module for the Mira language.
//!
//! This module is responsible for tokenizing Mira source code into a stream of
//! tokens. Whitespace and newlines are skipped here, so the parser receives a
//! pre-filtered sequence. Each token carries its kind, matched text, and a
//! half-open byte span into the source.

use crate::ast::Span;
use logos::Logos;
use std::fmt;

/// Token types for the Mira language
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")] // Skip all whitespace including newlines
pub enum TokenKind {
    // Keywords
    #[token("if")]
    If,
    #[token("elif")]
    Elif,
    #[token("else")]
    Else,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("def")]
    Def,
    #[token("null")]
    Null,
    #[token("while")]
    While,
    #[token("skip")]
    Skip,
    #[token("break")]
    Break,
    #[token("fun")]
    Fun,
    #[token("pre")]
    Pre,
    #[token("return")]
    Return,

    // Built-in type names (`unit` is a keyword but not a parseable type)
    #[token("number")]
    NumberType,
    #[token("string")]
    StringType,
    #[token("bool")]
    BoolType,
    #[token("unit")]
    UnitType,

    // Identifiers (must come after keywords to avoid conflicts)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_owned(), priority = 1)]
    Identifier(String),

    // Generic type parameter, e.g. `#T`
    #[regex(r"#[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice()[1..].to_owned())]
    TypeParam(String),

    // Numeric literals (sign is handled as a unary operator)
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    // String literals
    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        unescape_string(&s[1..s.len()-1])
    })]
    Str(String),

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEq,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEq,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Bang,
    #[token("=")]
    Assign,
    #[token("??")]
    QuestionQuestion,
    #[token("?.")]
    QuestionDot,
    #[token("?")]
    Question,
    #[token("..")]
    DotDot,
    #[token(".")]
    Dot,
    #[token("=>")]
    FatArrow,

    // Delimiters
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[<")]
    AttributeStart,
    #[token(">]")]
    AttributeEnd,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,

    // Error token for unrecognized input
    Error,
}

impl TokenKind {
    /// A token that can begin an operand: a literal, identifier, `null`,
    /// `(`, or `[`.
    pub fn is_simple_operand(&self) -> bool {
        self.is_literal()
            || matches!(
                self,
                TokenKind::Identifier(_)
                    | TokenKind::Null
                    | TokenKind::LeftParen
                    | TokenKind::LeftBracket
            )
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Number(_) | TokenKind::Str(_) | TokenKind::True | TokenKind::False
        )
    }

    pub fn is_unary_operator(&self) -> bool {
        matches!(self, TokenKind::Minus | TokenKind::Bang)
    }

    pub fn is_binary_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Percent
                | TokenKind::Greater
                | TokenKind::GreaterEq
                | TokenKind::Less
                | TokenKind::LessEq
                | TokenKind::EqEq
                | TokenKind::NotEq
                | TokenKind::AndAnd
                | TokenKind::OrOr
                | TokenKind::QuestionQuestion
        )
    }

    /// `.` or `?.`
    pub fn is_accessor(&self) -> bool {
        matches!(self, TokenKind::Dot | TokenKind::QuestionDot)
    }

    pub fn is_builtin_type(&self) -> bool {
        matches!(
            self,
            TokenKind::NumberType | TokenKind::StringType | TokenKind::BoolType
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier(s) => write!(f, "{}", s),
            TokenKind::TypeParam(s) => write!(f, "#{}", s),
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::Str(s) => write!(f, "\"{}\"", s),
            _ => write!(f, "{:?}", self),
        }
    }
}

/// Unescape a string literal
fn unescape_string(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some('0') => result.push('\0'),
                Some(c) => {
                    result.push('\\');
                    result.push(c);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// A token with its matched text and source span
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

/// Lexer for the Mira language
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(input),
        }
    }

    /// Collect all tokens, turning unrecognized input into `Error` tokens
    pub fn collect_tokens(self) -> Vec<Token> {
        self.collect()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let span = Span::from(self.inner.span());
        let text = self.inner.slice().to_owned();

        match result {
            Ok(kind) => Some(Token { kind, text, span }),
            Err(_) => Some(Token {
                kind: TokenKind::Error,
                text,
                span,
            }),
        }
    }
}
