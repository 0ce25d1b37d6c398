// Compiled form of a URI template

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::operator::Operator;
use super::parser::TemplateParser;
use crate::error::ParseError;

/// A parsed URI template: literal text interleaved with expressions.
///
/// Immutable once built, so one template can be expanded any number of
/// times, from any number of threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    pub(crate) parts: Vec<TemplatePart>,
    pub(crate) raw: String,
}

impl UriTemplate {
    pub(crate) fn new(parts: Vec<TemplatePart>, raw: String) -> Self {
        Self { parts, raw }
    }

    /// Parse a template string.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        TemplateParser::parse(raw)
    }

    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    /// The template text this was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Names of every variable referenced, in order of appearance.
    ///
    /// A name used in several expressions is listed once per use.
    pub fn names(&self) -> Vec<&str> {
        self.expressions()
            .flat_map(|expr| expr.terms.iter().map(|term| term.name.as_str()))
            .collect()
    }

    pub fn expressions(&self) -> impl Iterator<Item = &Expression> {
        self.parts.iter().filter_map(|part| match part {
            TemplatePart::Expression(expr) => Some(expr),
            TemplatePart::Literal(_) => None,
        })
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for UriTemplate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateParser::parse(s)
    }
}

impl TryFrom<&str> for UriTemplate {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        TemplateParser::parse(s)
    }
}

// Templates travel through config files as their raw text
impl Serialize for UriTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for UriTemplate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TemplateParser::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A template is a sequence of literal runs and expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    /// Copied to the output unchanged.
    Literal(String),
    Expression(Expression),
}

impl fmt::Display for TemplatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplatePart::Literal(text) => f.write_str(text),
            TemplatePart::Expression(expr) => fmt::Display::fmt(expr, f),
        }
    }
}

/// A `{...}` expression: an operator and at least one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub operator: Operator,
    pub terms: Vec<VarSpec>,
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        if let Some(ch) = self.operator.as_char() {
            write!(f, "{}", ch)?;
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            fmt::Display::fmt(term, f)?;
        }
        f.write_str("}")
    }
}

/// One variable reference inside an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarSpec {
    pub name: String,
    pub modifier: Modifier,
}

impl VarSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifier: Modifier::None,
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn explode(&self) -> bool {
        self.modifier == Modifier::Explode
    }

    pub fn prefix(&self) -> Option<usize> {
        match self.modifier {
            Modifier::Prefix(len) => Some(len),
            _ => None,
        }
    }
}

impl fmt::Display for VarSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        match self.modifier {
            Modifier::None => Ok(()),
            Modifier::Explode => f.write_str("*"),
            Modifier::Prefix(len) => write!(f, ":{}", len),
        }
    }
}

/// Value modifier of a variable. Explode and prefix never combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Modifier {
    #[default]
    None,
    /// `*`: composite values expand member by member.
    Explode,
    /// `:N`: string values are cut to their first N characters.
    Prefix(usize),
}
