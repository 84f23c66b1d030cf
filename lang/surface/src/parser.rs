//! Recursive-descent parsing without recursion: nested nodes live on an
//! explicit stack, so nesting depth is bounded by memory only.

use crate::{err::*, lexer::*};
use log::warn;
use penman_syntax::*;
use std::{path::PathBuf, sync::Arc};

use TokenKind as K;

/// Parses PENMAN trees, or triple conjunctions, from one source text.
pub struct Parser<'input> {
    tokens: TokenIterator<'input>,
}

impl<'input> Parser<'input> {
    pub fn new(text: &'input str, path: Option<Arc<PathBuf>>) -> Self {
        Parser { tokens: TokenIterator::penman(text, path) }
    }
    pub fn triples(text: &'input str, path: Option<Arc<PathBuf>>) -> Self {
        Parser { tokens: TokenIterator::triples(text, path) }
    }

    /* ---------------------------------- Trees --------------------------------- */

    /// One tree with its leading metadata comments.
    pub fn parse_tree(&mut self) -> Result<Tree> {
        let metadata = self.parse_comments()?;
        let node = self.parse_node()?;
        Ok(Tree { node, metadata })
    }

    /// Collects `::key value` pairs from leading comments. Pairs are read
    /// from the end of each comment, so a repeated key keeps its first value.
    fn parse_comments(&mut self) -> Result<Metadata> {
        let mut metadata = Metadata::new();
        while let Some(comment) = self.tokens.accept(&[K::Comment]) {
            let mut rest = comment.text;
            while let Some((head, pair)) = rest.rsplit_once("::") {
                let (key, value) = pair.split_once(' ').unwrap_or((pair, ""));
                if !key.is_empty() {
                    metadata.insert(key.to_string(), value.trim().to_string());
                }
                rest = head;
            }
        }
        Ok(metadata)
    }

    fn parse_node(&mut self) -> Result<Node> {
        // enclosing nodes, with the role of the branch being opened in each
        let mut stack: Vec<(Node, Role)> = Vec::new();
        'open: loop {
            self.tokens.expect(&[K::LParen])?;
            let mut node = self.parse_node_head()?;
            loop {
                if self.tokens.accept(&[K::RParen]).is_some() {
                    let Some((mut parent, role)) = stack.pop() else { return Ok(node) };
                    parent.branches.push(Branch { role, target: Target::Node(node) });
                    node = parent;
                    continue;
                }
                let role_tok = self.tokens.expect(&[K::Role])?;
                let role = self.with_alignment(role_tok.text);
                let next = self.tokens.peek()?;
                let target = match next.kind {
                    | K::Symbol | K::String => {
                        self.tokens.next()?;
                        Some(self.with_alignment(next.text))
                    }
                    | K::LParen => {
                        stack.push((node, role));
                        continue 'open;
                    }
                    | K::Role | K::RParen => {
                        warn!("Missing target: {}", self.tokens.line_of(&role_tok));
                        None
                    }
                    | _ => {
                        let message = "Expected: SYMBOL, STRING, LPAREN";
                        return Err(self.tokens.error(message, Some(&next)));
                    }
                };
                node.branches.push(Branch { role, target: Target::Atom(target) });
            }
        }
    }

    /// The variable and concept following `(`.
    fn parse_node_head(&mut self) -> Result<Node> {
        let mut node = Node::default();
        let next = self.tokens.peek()?;
        if next.kind == K::RParen {
            return Ok(node);
        }
        if next.kind == K::Slash || next.kind == K::Role {
            warn!("Missing variable: {}", self.tokens.line_of(&next));
        } else {
            node.var = Some(self.tokens.expect(&[K::Symbol])?.text.to_string());
        }
        if let Some(slash) = self.tokens.accept(&[K::Slash]) {
            let concept = match self.tokens.accept(&[K::Symbol, K::String]) {
                | Some(concept) => Some(self.with_alignment(concept.text)),
                | None => {
                    warn!("Missing concept: {}", self.tokens.line_of(&slash));
                    None
                }
            };
            node.branches.push(Branch { role: CONCEPT_SLASH.to_string(), target: Target::Atom(concept) });
        }
        Ok(node)
    }

    /// `text` with an immediately following alignment glued on.
    fn with_alignment(&mut self, text: &str) -> String {
        match self.tokens.accept(&[K::Alignment]) {
            | Some(aln) => format!("{text}{}", aln.text),
            | None => text.to_string(),
        }
    }

    /* --------------------------------- Triples -------------------------------- */

    /// `role(source, target)` conjoined with `^`.
    pub fn parse_triples(&mut self) -> Result<Vec<Triple>> {
        while self.tokens.accept(&[K::Comment]).is_some() {}
        let mut triples = Vec::new();
        let mut strip_caret = false;
        loop {
            let role = self.parse_triple_role(strip_caret)?;
            self.tokens.expect(&[K::LParen])?;
            let symbol = self.tokens.expect(&[K::Symbol])?.text;
            let (source, target) = match symbol.split_once(',') {
                // role(a,b)
                | Some((source, rest)) if !rest.is_empty() => (source, Some(rest.to_string())),
                // role(a, b)
                | Some((source, _)) => {
                    let target = self.tokens.accept(&[K::Symbol, K::String]);
                    (source, target.map(|t| t.text.to_string()))
                }
                | None => match self.tokens.accept(&[K::Symbol]) {
                    // role(a , b)
                    | Some(next) if next.text == "," => {
                        let target = self.tokens.expect(&[K::Symbol, K::String])?;
                        (symbol, Some(target.text.to_string()))
                    }
                    // role(a ,b)
                    | Some(next) if next.text.starts_with(',') => {
                        (symbol, Some(next.text[1..].to_string()))
                    }
                    | Some(next) => {
                        return Err(self.tokens.error("Expected: RPAREN", Some(&next)));
                    }
                    // role(a)
                    | None => (symbol, None),
                },
            };
            self.tokens.expect(&[K::RParen])?;
            triples.push(Triple { source: source.to_string(), role, target });

            match self.tokens.peek_kind() {
                | Some(K::Symbol) => {
                    let next = self.tokens.peek()?;
                    if next.text == "^" {
                        self.tokens.next()?;
                        strip_caret = false;
                    } else if next.text.starts_with('^') {
                        strip_caret = true;
                    } else {
                        break;
                    }
                }
                | _ => break,
            }
        }
        Ok(triples)
    }

    fn parse_triple_role(&mut self, strip_caret: bool) -> Result<Role> {
        let mut role = self.tokens.expect(&[K::Symbol])?.text;
        if strip_caret {
            role = role.strip_prefix('^').unwrap_or(role);
        }
        Ok(if role.starts_with(':') { role.to_string() } else { format!(":{role}") })
    }

    /// Metadata of the next tree, or nothing if only comments are left.
    fn skip_to_next_tree(&mut self) -> Result<Option<Metadata>> {
        let metadata = self.parse_comments()?;
        Ok(if self.tokens.has_next() { Some(metadata) } else { None })
    }
}

/// Parses consecutive trees until the input runs out; stops after the first
/// error.
impl Iterator for Parser<'_> {
    type Item = Result<Tree>;
    fn next(&mut self) -> Option<Self::Item> {
        let metadata = match self.skip_to_next_tree() {
            | Ok(Some(metadata)) => metadata,
            | Ok(None) => return None,
            | Err(err) => return Some(Err(err)),
        };
        let tree = self.parse_node().map(|node| Tree { node, metadata });
        if tree.is_err() {
            // drain the stream so iteration ends
            while self.tokens.next().is_ok() {}
        }
        Some(tree)
    }
}

/* ------------------------------- Entry points ------------------------------ */

/// Parses the first tree in `text`.
pub fn parse(text: &str) -> Result<Tree> {
    Parser::new(text, None).parse_tree()
}

/// Parses every tree in `text`.
pub fn iterparse(text: &str) -> Parser<'_> {
    Parser::new(text, None)
}

/// Parses the triple conjunction notation.
pub fn parse_triples(text: &str) -> Result<Vec<Triple>> {
    Parser::triples(text, None).parse_triples()
}
