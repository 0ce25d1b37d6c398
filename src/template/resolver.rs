// Template expansion: substitutes variable values into a compiled template

use std::collections::BTreeMap;

use super::ast::{Expression, TemplatePart, UriTemplate, VarSpec};
use super::encoding::escape;
use super::fields::FieldMappable;
use super::operator::Operator;
use super::value::{Value, Variables};
use crate::error::ExpandError;

/// Expands compiled templates against a set of variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateResolver;

impl TemplateResolver {
    pub fn new() -> Self {
        Self
    }

    /// Expand `template`, reading every variable from `variables`.
    ///
    /// Undefined variables (missing, null, or empty composites) produce no
    /// output and no separator. On error nothing is returned.
    pub fn expand<V>(&self, template: &UriTemplate, variables: &V) -> Result<String, ExpandError>
    where
        V: Variables + ?Sized,
    {
        let mut buf = String::with_capacity(template.raw.len());

        for part in &template.parts {
            match part {
                TemplatePart::Literal(text) => buf.push_str(text),
                TemplatePart::Expression(expr) => {
                    if let Err(err) = self.expand_expression(&mut buf, expr, variables) {
                        tracing::debug!(
                            template = %template,
                            error = %err,
                            "uri template expansion failed"
                        );
                        return Err(err);
                    }
                }
            }
        }

        tracing::debug!(template = %template, expanded = %buf, "expanded uri template");
        Ok(buf)
    }

    fn expand_expression<V>(
        &self,
        buf: &mut String,
        expr: &Expression,
        variables: &V,
    ) -> Result<(), ExpandError>
    where
        V: Variables + ?Sized,
    {
        let op = expr.operator;
        let mut zero_mark = buf.len();
        buf.push_str(op.first());
        let first_mark = buf.len();

        for term in &expr.terms {
            let Some(value) = variables.get(&term.name) else {
                tracing::trace!(name = %term.name, "skipping missing variable");
                continue;
            };

            if matches!(value, Value::Map(_)) && term.prefix().is_some() {
                return Err(ExpandError::TruncatedMap(term.name.clone()));
            }

            if is_undefined(value) {
                tracing::trace!(
                    name = %term.name,
                    kind = value.kind(),
                    "skipping undefined variable"
                );
                continue;
            }

            // An empty string keeps the leading string: "X{.empty}" => "X."
            if value.as_str() == Some("") {
                zero_mark = first_mark;
            }

            // Separators only go between terms that wrote something
            if buf.len() != first_mark {
                buf.push_str(op.separator());
            }

            match value {
                Value::String(s) => expand_string(buf, op, term, s),
                Value::List(items) => expand_list(buf, op, term, items),
                Value::Map(map) => expand_map(buf, op, term, map),
                Value::Null => {}
            }
        }

        if buf.len() == first_mark {
            buf.truncate(zero_mark);
        }

        Ok(())
    }
}

/// Missing members are skipped, so a composite with none left is undefined.
fn is_undefined(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(_) => false,
        Value::List(items) => items.iter().all(Value::is_null),
        Value::Map(map) => map.values().all(Value::is_null),
    }
}

fn expand_name(buf: &mut String, op: Operator, name: &str, empty: bool) {
    if op.named() {
        buf.push_str(name);
        buf.push_str(if empty { op.if_empty() } else { "=" });
    }
}

fn expand_string(buf: &mut String, op: Operator, term: &VarSpec, s: &str) {
    let s = truncate(s, term.prefix());
    expand_name(buf, op, &term.name, s.is_empty());
    buf.push_str(&escape(s, op.allow_reserved()));
}

fn expand_list(buf: &mut String, op: Operator, term: &VarSpec, items: &[Value]) {
    let explode = term.explode();
    if !explode {
        expand_name(buf, op, &term.name, false);
    }

    let members = items.iter().filter(|item| !item.is_null());
    for (i, item) in members.enumerate() {
        if i > 0 {
            buf.push_str(if explode { op.separator() } else { "," });
        }
        let rendered = render_member(item);
        let s = truncate(&rendered, term.prefix());
        if explode {
            expand_name(buf, op, &term.name, s.is_empty());
        }
        buf.push_str(&escape(s, op.allow_reserved()));
    }
}

fn expand_map(buf: &mut String, op: Operator, term: &VarSpec, map: &BTreeMap<String, Value>) {
    let explode = term.explode();
    if !explode {
        expand_name(buf, op, &term.name, false);
    }

    let entries = map.iter().filter(|(_, item)| !item.is_null());
    for (i, (key, item)) in entries.enumerate() {
        if i > 0 {
            buf.push_str(if explode { op.separator() } else { "," });
        }
        let rendered = render_member(item);
        buf.push_str(&escape(key, op.allow_reserved()));
        buf.push(if explode { '=' } else { ',' });
        buf.push_str(&escape(&rendered, op.allow_reserved()));
    }
}

/// Members of composites are expanded as strings; nested composites are flattened.
fn render_member(value: &Value) -> std::borrow::Cow<'_, str> {
    match value {
        Value::String(s) => s.as_str().into(),
        other => other.to_string().into(),
    }
}

/// First `max` characters of `s`, never splitting a character.
fn truncate(s: &str, max: Option<usize>) -> &str {
    match max.and_then(|max| s.char_indices().nth(max)) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

impl UriTemplate {
    /// Expand the template against a map of variables.
    pub fn expand<V: Variables + ?Sized>(&self, variables: &V) -> Result<String, ExpandError> {
        TemplateResolver::new().expand(self, variables)
    }

    /// Expand the template using a record's fields as the variables.
    pub fn expand_record<T>(&self, record: &T) -> Result<String, ExpandError>
    where
        T: FieldMappable + ?Sized,
    {
        self.expand(&record.field_map())
    }

    /// Expand the template against a JSON document, which must be an object.
    pub fn expand_json(&self, values: &serde_json::Value) -> Result<String, ExpandError> {
        let serde_json::Value::Object(object) = values else {
            return Err(ExpandError::UnsupportedValues(json_kind(values)));
        };
        let variables: BTreeMap<String, Value> = object
            .iter()
            .map(|(name, value)| (name.clone(), Value::from(value.clone())))
            .collect();
        self.expand(&variables)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
