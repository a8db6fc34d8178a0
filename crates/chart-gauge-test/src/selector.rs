//! CSS-like selectors over a gauge scene.
//!
//! Supports:
//! - `"text"` - by element name
//! - `"#chart-gauge-1-section-2"` - by id
//! - `".gauge-value"` - by class
//! - `"[fill='#ff0000']"` - by attribute
//! - `"text.gauge-label"` - compound
//! - `"g.chart-gauge > path.needle"` / `"g text"` - child and descendant

use chart_gauge_core::{NodeId, Scene};
use thiserror::Error;

/// Parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Match by element name
    Tag(String),
    /// Match by `id` attribute
    Id(String),
    /// Match by class
    Class(String),
    /// Match by attribute value
    Attribute {
        /// Attribute name
        name: String,
        /// Expected value
        value: String,
    },
    /// All parts match the same node (e.g. `text.gauge-value`)
    Compound(Vec<Selector>),
    /// Right side has an ancestor matching the left side
    Descendant(Box<Selector>, Box<Selector>),
    /// Right side's parent matches the left side
    Child(Box<Selector>, Box<Selector>),
}

impl Selector {
    /// Parse a selector string.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        SelectorParser::new(input).parse()
    }

    /// Check if this selector matches node `id` of `scene`.
    #[must_use]
    pub fn matches(&self, scene: &Scene, id: NodeId) -> bool {
        let Some(node) = scene.node(id) else {
            return false;
        };
        match self {
            Self::Tag(name) => node.tag.name() == name.as_str(),
            Self::Id(expected) => node.get_attr("id") == Some(expected.as_str()),
            Self::Class(class) => node.has_class(class),
            Self::Attribute { name, value } => node.get_attr(name) == Some(value.as_str()),
            Self::Compound(parts) => parts.iter().all(|p| p.matches(scene, id)),
            Self::Child(parent, child) => {
                child.matches(scene, id)
                    && node.parent().is_some_and(|p| parent.matches(scene, p))
            }
            Self::Descendant(ancestor, inner) => {
                if !inner.matches(scene, id) {
                    return false;
                }
                let mut cursor = node.parent();
                while let Some(current) = cursor {
                    if ancestor.matches(scene, current) {
                        return true;
                    }
                    cursor = scene.node(current).and_then(|n| n.parent());
                }
                false
            }
        }
    }

    /// All matching nodes in document order.
    #[must_use]
    pub fn select(&self, scene: &Scene) -> Vec<NodeId> {
        scene
            .descendants(scene.root())
            .into_iter()
            .filter(|id| self.matches(scene, *id))
            .collect()
    }
}

/// Selector parser.
pub struct SelectorParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    /// Create a new parser.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Parse the selector.
    pub fn parse(&mut self) -> Result<Selector, SelectorError> {
        self.skip_whitespace();
        if self.peek_char().is_none() {
            return Err(SelectorError::Empty);
        }

        let mut selector = self.parse_compound()?;
        loop {
            let had_space = self.skip_whitespace();
            match self.peek_char() {
                None => return Ok(selector),
                Some('>') => {
                    self.advance();
                    self.skip_whitespace();
                    let child = self.parse_compound()?;
                    selector = Selector::Child(Box::new(selector), Box::new(child));
                }
                Some(_) if had_space => {
                    let inner = self.parse_compound()?;
                    selector = Selector::Descendant(Box::new(selector), Box::new(inner));
                }
                Some(c) => return Err(SelectorError::UnexpectedChar(c)),
            }
        }
    }

    fn parse_compound(&mut self) -> Result<Selector, SelectorError> {
        let mut parts = Vec::new();
        while let Some(c) = self.peek_char() {
            let part = match c {
                '#' => {
                    self.advance();
                    Selector::Id(self.read_identifier()?)
                }
                '.' => {
                    self.advance();
                    Selector::Class(self.read_identifier()?)
                }
                '[' => self.parse_attribute()?,
                _ if c.is_alphabetic() && parts.is_empty() => {
                    Selector::Tag(self.read_identifier()?)
                }
                _ if c.is_whitespace() || c == '>' => break,
                _ => return Err(SelectorError::UnexpectedChar(c)),
            };
            parts.push(part);
        }

        match parts.len() {
            0 => Err(SelectorError::ExpectedIdentifier),
            1 => Ok(parts.remove(0)),
            _ => Ok(Selector::Compound(parts)),
        }
    }

    fn parse_attribute(&mut self) -> Result<Selector, SelectorError> {
        self.advance(); // '['

        let name = self.read_until('=');
        if name.is_empty() || self.peek_char().is_none() {
            return Err(SelectorError::InvalidAttribute);
        }
        self.advance(); // '='

        let quote = self.peek_char().filter(|c| *c == '\'' || *c == '"');
        let value = match quote {
            Some(q) => {
                self.advance();
                let value = self.read_until(q);
                if self.peek_char() != Some(q) {
                    return Err(SelectorError::UnclosedAttribute);
                }
                self.advance();
                value
            }
            None => self.read_until(']'),
        };

        if self.peek_char() != Some(']') {
            return Err(SelectorError::UnclosedAttribute);
        }
        self.advance();

        Ok(Selector::Attribute {
            name: name.trim().to_string(),
            value,
        })
    }

    fn read_identifier(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start {
            return Err(SelectorError::ExpectedIdentifier);
        }

        Ok(self.input[start..self.pos].to_string())
    }

    fn read_until(&mut self, stop: char) -> String {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c == stop {
                break;
            }
            self.advance();
        }
        self.input[start..self.pos].to_string()
    }

    /// Returns whether any whitespace was skipped.
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
        self.pos > start
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }
}

/// Selector parsing error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// Empty selector
    #[error("empty selector")]
    Empty,
    /// Unexpected character
    #[error("unexpected character: '{0}'")]
    UnexpectedChar(char),
    /// Expected identifier
    #[error("expected identifier")]
    ExpectedIdentifier,
    /// Invalid attribute syntax
    #[error("invalid attribute syntax")]
    InvalidAttribute,
    /// Unclosed attribute bracket or quote
    #[error("unclosed attribute bracket")]
    UnclosedAttribute,
}
