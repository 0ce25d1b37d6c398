// Common test utilities shared across test files

use std::collections::BTreeMap;

use serde::Deserialize;
use uritemplates::Value;

/// A table of templates expanded against one set of variables.
#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct ExampleSuite {
    pub variables: BTreeMap<String, Value>,
    pub sections: Vec<ExampleSection>,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct ExampleSection {
    pub name: String,
    pub testcases: Vec<(String, String)>,
}

/// Load a YAML example suite from `tests/fixtures`.
#[allow(dead_code)]
pub fn load_suite(yaml: &str) -> anyhow::Result<ExampleSuite> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Build a variable set from a JSON object literal.
#[allow(dead_code)]
pub fn vars(json: serde_json::Value) -> BTreeMap<String, Value> {
    match Value::from(json) {
        Value::Map(map) => map,
        other => panic!("Expected a JSON object, got {}", other.kind()),
    }
}
