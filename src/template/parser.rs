// Template compiler: splits a template into literals and expressions

use std::sync::LazyLock;

use regex::Regex;

use super::ast::{Expression, Modifier, TemplatePart, UriTemplate, VarSpec};
use super::operator::Operator;
use crate::error::ParseError;

/// varname = varchar *( ["."] varchar ), varchar = ALPHA / DIGIT / "_" / pct-encoded
static VALID_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_.]|%[0-9A-Fa-f]{2})+$").expect("variable name pattern compiles")
});

pub struct TemplateParser;

impl TemplateParser {
    pub fn parse(template: &str) -> Result<UriTemplate, ParseError> {
        match Self::parse_parts(template) {
            Ok(parts) => {
                tracing::debug!(template, parts = parts.len(), "compiled uri template");
                Ok(UriTemplate::new(parts, template.to_string()))
            }
            Err(err) => {
                tracing::debug!(template, error = %err, "failed to compile uri template");
                Err(err)
            }
        }
    }

    fn parse_parts(template: &str) -> Result<Vec<TemplatePart>, ParseError> {
        let mut parts = Vec::new();
        let mut chunks = template.split('{');

        // The text before the first `{` is always a literal
        let leading = chunks.next().unwrap_or_default();
        if leading.contains('}') {
            return Err(ParseError::UnexpectedClose);
        }
        push_literal(&mut parts, leading);

        for chunk in chunks {
            let mut pieces = chunk.split('}');
            let (Some(body), Some(trailing), None) = (pieces.next(), pieces.next(), pieces.next())
            else {
                return Err(ParseError::Malformed);
            };
            parts.push(TemplatePart::Expression(Self::parse_expression(body)?));
            push_literal(&mut parts, trailing);
        }

        Ok(parts)
    }

    fn parse_expression(body: &str) -> Result<Expression, ParseError> {
        let mut chars = body.chars();
        let operator = match chars.next() {
            Some(ch) if Operator::is_reserved_for_extension(ch) => {
                return Err(ParseError::ReservedOperator(ch));
            }
            Some(ch) => Operator::from_char(ch),
            None => None,
        };
        let var_list = match operator {
            Some(_) => chars.as_str(),
            None => body,
        };

        let terms = var_list
            .split(',')
            .map(Self::parse_term)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Expression {
            operator: operator.unwrap_or(Operator::Simple),
            terms,
        })
    }

    fn parse_term(term: &str) -> Result<VarSpec, ParseError> {
        let (spec, explode) = match term.strip_suffix('*') {
            Some(rest) => (rest, true),
            None => (term, false),
        };

        let mut split = spec.split(':');
        let name = split.next().unwrap_or_default();
        let prefix = split.next();
        if split.next().is_some() {
            return Err(ParseError::MultipleColons(term.to_string()));
        }

        if !VALID_NAME.is_match(name) {
            return Err(ParseError::InvalidName(name.to_string()));
        }

        let prefix = prefix.map(|digits| parse_prefix(digits, term)).transpose()?;

        // A prefix of zero or less truncates nothing
        let modifier = match (prefix.filter(|len| *len > 0), explode) {
            (Some(_), true) => return Err(ParseError::ExplodeAndPrefix(term.to_string())),
            (Some(len), false) => Modifier::Prefix(len),
            (None, true) => Modifier::Explode,
            (None, false) => Modifier::None,
        };

        Ok(VarSpec::new(name).with_modifier(modifier))
    }
}

/// Prefix lengths are signed decimal integers; negative ones clamp to zero.
fn parse_prefix(digits: &str, term: &str) -> Result<usize, ParseError> {
    let len: i64 = digits
        .parse()
        .map_err(|_| ParseError::InvalidPrefix(term.to_string()))?;
    usize::try_from(len.max(0)).map_err(|_| ParseError::InvalidPrefix(term.to_string()))
}

fn push_literal(parts: &mut Vec<TemplatePart>, text: &str) {
    if !text.is_empty() {
        parts.push(TemplatePart::Literal(text.to_string()));
    }
}
