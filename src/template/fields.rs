//! Reduction of record types to string-keyed maps.
//!
//! A record exposes its fields through [`FieldMappable`]; the expansion engine
//! then treats it exactly like a [`Value::Map`]. Each field may carry a tag
//! that renames it:
//!
//! - a tag containing `:` is read as a `key:"value"` list and its `uri` entry
//!   is used (`json:"id" uri:"user_id"` → `user_id`);
//! - any other tag is used as-is after trimming whitespace;
//! - with no tag, or an empty result, the declared field name is used.

use std::collections::BTreeMap;

use super::value::Value;

/// Tag key consulted in `key:"value"` style tags.
pub const TAG_KEY: &str = "uri";

/// One field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub tag: Option<&'static str>,
    pub value: Value,
}

impl Field {
    pub fn new(name: &'static str, value: impl Into<Value>) -> Self {
        Self {
            name,
            tag: None,
            value: value.into(),
        }
    }

    pub fn tagged(name: &'static str, tag: &'static str, value: impl Into<Value>) -> Self {
        Self {
            name,
            tag: Some(tag),
            value: value.into(),
        }
    }

    /// Map key this field is exposed under.
    pub fn key(&self) -> &'static str {
        let from_tag = match self.tag {
            Some(tag) if tag.contains(':') => lookup_tag(tag, TAG_KEY).unwrap_or_default(),
            Some(tag) => tag.trim(),
            None => "",
        };
        if from_tag.is_empty() {
            self.name
        } else {
            from_tag
        }
    }
}

/// Trait for record types that can stand in for a map of variables.
///
/// # Example
///
/// ```
/// use uritemplates::{Field, FieldMappable, UriTemplate};
///
/// struct Repo {
///     owner: String,
///     name: String,
/// }
///
/// impl FieldMappable for Repo {
///     fn fields(&self) -> Vec<Field> {
///         vec![
///             Field::new("owner", &self.owner),
///             Field::tagged("name", "repo", &self.name),
///         ]
///     }
/// }
///
/// let template = UriTemplate::parse("/repos{/owner,repo}").unwrap();
/// let repo = Repo { owner: "jtacoma".into(), name: "uritemplates".into() };
/// assert_eq!(template.expand_record(&repo).unwrap(), "/repos/jtacoma/uritemplates");
/// ```
pub trait FieldMappable {
    /// Every field of the record, in declaration order.
    fn fields(&self) -> Vec<Field>;

    /// Fields keyed by [`Field::key`]. Later fields win on key collisions.
    fn field_map(&self) -> BTreeMap<String, Value> {
        self.fields()
            .into_iter()
            .map(|field| (field.key().to_string(), field.value))
            .collect()
    }
}

impl<T: FieldMappable + ?Sized> FieldMappable for &T {
    fn fields(&self) -> Vec<Field> {
        (**self).fields()
    }
}

impl<T: FieldMappable + ?Sized> FieldMappable for Box<T> {
    fn fields(&self) -> Vec<Field> {
        (**self).fields()
    }
}

/// Find `key` in a conventional `key:"value" other:"value"` tag.
fn lookup_tag<'a>(tag: &'a str, key: &str) -> Option<&'a str> {
    let mut rest = tag;
    loop {
        rest = rest.trim_start();
        let colon = rest.find(':')?;
        let name = &rest[..colon];
        let quoted = rest[colon + 1..].strip_prefix('"')?;
        let end = closing_quote(quoted)?;
        if name == key {
            return Some(&quoted[..end]);
        }
        rest = &quoted[end + 1..];
    }
}

fn closing_quote(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, ch) in s.char_indices() {
        match ch {
            '\\' if !escaped => escaped = true,
            '"' if !escaped => return Some(i),
            _ => escaped = false,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    struct User {
        id: u64,
        login: String,
        email: Option<String>,
    }

    impl FieldMappable for User {
        fn fields(&self) -> Vec<Field> {
            vec![
                Field::tagged("Id", r#"json:"id" uri:"user_id""#, self.id),
                Field::tagged("Login", "  login ", &self.login),
                Field::new("email", self.email.clone()),
            ]
        }
    }

    #[test]
    fn test_key_from_uri_entry() {
        let field = Field::tagged("Id", r#"json:"id" uri:"user_id""#, 1);
        assert_eq!(field.key(), "user_id");
    }

    #[test]
    fn test_key_from_plain_tag_is_trimmed() {
        assert_eq!(Field::tagged("Login", "  login ", "x").key(), "login");
    }

    #[test]
    fn test_key_falls_back_to_name() {
        assert_eq!(Field::new("Name", "x").key(), "Name");
        assert_eq!(Field::tagged("Name", "   ", "x").key(), "Name");
        assert_eq!(Field::tagged("Name", r#"json:"name""#, "x").key(), "Name");
        assert_eq!(Field::tagged("Name", r#"uri:"""#, "x").key(), "Name");
    }

    #[test]
    fn test_lookup_tag_handles_escaped_quotes() {
        assert_eq!(lookup_tag(r#"a:"x\"y" uri:"z""#, "uri"), Some("z"));
        assert_eq!(lookup_tag(r#"uri:"unterminated"#, "uri"), None);
    }

    #[test]
    fn test_field_map() {
        let user = User {
            id: 7,
            login: "octocat".to_string(),
            email: None,
        };
        let map = user.field_map();
        assert_eq!(map.len(), 3);
        assert_eq!(map["user_id"], Value::from("7"));
        assert_eq!(map["login"], Value::from("octocat"));
        assert!(map["email"].is_null());
    }

    #[test]
    fn test_value_from_record() {
        let user = User {
            id: 1,
            login: "a".to_string(),
            email: Some("a@example.com".to_string()),
        };
        let Value::Map(map) = Value::from_record(&user) else {
            panic!("Expected map");
        };
        assert_eq!(map["email"].as_str(), Some("a@example.com"));
    }
}
