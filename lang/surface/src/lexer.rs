use crate::err::*;
use logos::Logos;
use penman_utils::prelude::*;
use std::{fmt, iter::Peekable, path::PathBuf, sync::Arc};

/* ---------------------------------- Tokens --------------------------------- */

#[derive(Logos, Clone, Copy, Debug, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum PenmanTok {
    #[regex(r"#[^\n]*")]
    Comment,
    #[regex(r#""[^"\\]*(?:\\.[^"\\]*)*""#)]
    String,
    #[regex(r"~(?:[a-z]\.?)?[0-9]+(?:,[0-9]+)*")]
    Alignment,
    #[regex(r":[^\s()/:~]*")]
    Role,
    #[regex(r##"[^\s()/:~"#][^\s()/:~]*"##)]
    Symbol,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("/")]
    Slash,
}

/// The conjunction notation `role(a, b) ^ ...`; symbols may hold commas.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum TripleTok {
    #[regex(r"#[^\n]*")]
    Comment,
    #[regex(r#""[^"\\]*(?:\\.[^"\\]*)*""#)]
    String,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[regex(r##"[^\s()"#][^\s()]*"##)]
    Symbol,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Comment,
    String,
    Alignment,
    Role,
    Symbol,
    LParen,
    RParen,
    Slash,
    Unexpected,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            | TokenKind::Comment => "COMMENT",
            | TokenKind::String => "STRING",
            | TokenKind::Alignment => "ALIGNMENT",
            | TokenKind::Role => "ROLE",
            | TokenKind::Symbol => "SYMBOL",
            | TokenKind::LParen => "LPAREN",
            | TokenKind::RParen => "RPAREN",
            | TokenKind::Slash => "SLASH",
            | TokenKind::Unexpected => "UNEXPECTED",
        };
        write!(f, "{name}")
    }
}

impl From<PenmanTok> for TokenKind {
    fn from(tok: PenmanTok) -> Self {
        match tok {
            | PenmanTok::Comment => TokenKind::Comment,
            | PenmanTok::String => TokenKind::String,
            | PenmanTok::Alignment => TokenKind::Alignment,
            | PenmanTok::Role => TokenKind::Role,
            | PenmanTok::Symbol => TokenKind::Symbol,
            | PenmanTok::LParen => TokenKind::LParen,
            | PenmanTok::RParen => TokenKind::RParen,
            | PenmanTok::Slash => TokenKind::Slash,
        }
    }
}

impl From<TripleTok> for TokenKind {
    fn from(tok: TripleTok) -> Self {
        match tok {
            | TripleTok::Comment => TokenKind::Comment,
            | TripleTok::String => TokenKind::String,
            | TripleTok::LParen => TokenKind::LParen,
            | TripleTok::RParen => TokenKind::RParen,
            | TripleTok::Symbol => TokenKind::Symbol,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token<'input> {
    pub kind: TokenKind,
    pub text: &'input str,
    pub span: Span,
}

/* --------------------------------- Iterator -------------------------------- */

type Tokens<'input> = Box<dyn Iterator<Item = Token<'input>> + 'input>;

/// A token stream with one token of lookahead.
pub struct TokenIterator<'input> {
    tokens: Peekable<Tokens<'input>>,
    info: FileInfo,
    end: Cursor1,
}

fn spanned<'input, T>(lexer: logos::Lexer<'input, T>, text: &'input str) -> Tokens<'input>
where
    T: Logos<'input, Source = str> + Into<TokenKind> + 'input,
    T::Extras: 'input,
{
    Box::new(lexer.spanned().map(move |(tok, range)| Token {
        kind: tok.map(Into::into).unwrap_or(TokenKind::Unexpected),
        text: &text[range.clone()],
        span: Span::new(range.start, range.end),
    }))
}

impl<'input> TokenIterator<'input> {
    /// Tokens of the bracketed notation.
    pub fn penman(text: &'input str, path: Option<Arc<PathBuf>>) -> Self {
        Self::new(spanned(PenmanTok::lexer(text), text), text, path)
    }
    /// Tokens of the triple conjunction notation.
    pub fn triples(text: &'input str, path: Option<Arc<PathBuf>>) -> Self {
        Self::new(spanned(TripleTok::lexer(text), text), text, path)
    }
    fn new(tokens: Tokens<'input>, text: &'input str, path: Option<Arc<PathBuf>>) -> Self {
        TokenIterator { tokens: tokens.peekable(), info: FileInfo::new(text, path), end: text.len() }
    }

    pub fn has_next(&mut self) -> bool {
        self.tokens.peek().is_some()
    }
    /// The next token, left in place.
    pub fn peek(&mut self) -> Result<Token<'input>> {
        match self.tokens.peek() {
            | Some(tok) => Ok(*tok),
            | None => Err(self.error("Unexpected end of input", None)),
        }
    }
    pub fn peek_kind(&mut self) -> Option<TokenKind> {
        self.tokens.peek().map(|tok| tok.kind)
    }
    pub fn peek_is(&mut self, kinds: &[TokenKind]) -> bool {
        self.peek_kind().is_some_and(|kind| kinds.contains(&kind))
    }
    pub fn next(&mut self) -> Result<Token<'input>> {
        match self.tokens.next() {
            | Some(tok) => Ok(tok),
            | None => Err(self.error("Unexpected end of input", None)),
        }
    }
    /// Consumes the next token, which must be one of `kinds`.
    pub fn expect(&mut self, kinds: &[TokenKind]) -> Result<Token<'input>> {
        let tok = self.peek()?;
        if !kinds.contains(&tok.kind) {
            let expected: Vec<String> = kinds.iter().map(ToString::to_string).collect();
            return Err(self.error(format!("Expected: {}", expected.join(", ")), Some(&tok)));
        }
        self.next()
    }
    /// Consumes the next token only if it is one of `kinds`.
    pub fn accept(&mut self, kinds: &[TokenKind]) -> Option<Token<'input>> {
        if self.peek_is(kinds) { self.tokens.next() } else { None }
    }

    /// An error at `tok`, or at the end of input.
    pub fn error(&self, message: impl Into<String>, tok: Option<&Token>) -> DecodeError {
        let offset = tok.map(|tok| tok.span.start()).unwrap_or(self.end);
        let Cursor2 { line, column } = self.info.trans_span2(offset);
        DecodeError {
            message: message.into(),
            path: self.info.path().cloned(),
            line,
            column,
            text: self.info.line_text(line).to_string(),
        }
    }
    /// The text of the line where `tok` starts.
    pub fn line_of(&self, tok: &Token) -> &str {
        let Cursor2 { line, .. } = self.info.trans_span2(tok.span.start());
        self.info.line_text(line)
    }
}
