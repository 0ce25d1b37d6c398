//! Level 4 implementation of [RFC 6570](https://tools.ietf.org/html/rfc6570) URI Templates.
//!
//! Parse a template once, then expand it against any number of value sets:
//!
//! ```rust
//! use std::collections::HashMap;
//! use uritemplates::{UriTemplate, Value};
//!
//! let template = UriTemplate::parse("https://api.github.com/repos{/user,repo}").unwrap();
//!
//! let mut values = HashMap::new();
//! values.insert("user".to_string(), Value::from("jtacoma"));
//! values.insert("repo".to_string(), Value::from("uritemplates"));
//!
//! let expanded = template.expand(&values).unwrap();
//! assert_eq!(expanded, "https://api.github.com/repos/jtacoma/uritemplates");
//! ```
//!
//! Values are strings, lists or maps ([`Value`]). Records can take the place
//! of a map by implementing [`FieldMappable`], and JSON objects can be used
//! directly with [`UriTemplate::expand_json`].

mod error;
mod template;

pub use error::{Error, ExpandError, ParseError, Result};
pub use template::{
    escape, Expression, Field, FieldMappable, Modifier, Operator, TemplateParser, TemplatePart,
    TemplateResolver, UriTemplate, Value, VarSpec, Variables, TAG_KEY,
};

/// Parse a template string. Shorthand for [`UriTemplate::parse`].
pub fn compile(raw: &str) -> Result<UriTemplate> {
    Ok(UriTemplate::parse(raw)?)
}

/// Parse `raw` and expand it once.
///
/// ```rust
/// use std::collections::BTreeMap;
/// use uritemplates::{Error, Value};
///
/// let mut values = BTreeMap::new();
/// values.insert("q".to_string(), Value::from("rust lang"));
///
/// assert_eq!(uritemplates::expand("/search{?q}", &values)?, "/search?q=rust%20lang");
/// assert!(matches!(uritemplates::expand("/search{?q", &values), Err(Error::Parse(_))));
/// # Ok::<(), Error>(())
/// ```
pub fn expand<V: Variables + ?Sized>(raw: &str, variables: &V) -> Result<String> {
    Ok(compile(raw)?.expand(variables)?)
}
