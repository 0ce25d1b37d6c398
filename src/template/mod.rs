// Template module for RFC 6570 URI templates
//
// This module provides parsing of template strings into a compiled form and
// expansion of that form against variable values.

mod ast;
mod encoding;
mod fields;
mod operator;
mod parser;
mod resolver;
mod value;

pub use ast::{Expression, Modifier, TemplatePart, UriTemplate, VarSpec};
pub use encoding::escape;
pub use fields::{Field, FieldMappable, TAG_KEY};
pub use operator::Operator;
pub use parser::TemplateParser;
pub use resolver::TemplateResolver;
pub use value::{Value, Variables};
