// Records expanded through FieldMappable, and templates loaded from config

use serde::Deserialize;
use uritemplates::{ExpandError, Field, FieldMappable, UriTemplate, Value};

mod common;

struct Issue {
    owner: String,
    repo: String,
    number: u64,
    labels: Vec<String>,
    assignee: Option<String>,
}

impl FieldMappable for Issue {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::tagged("Owner", r#"json:"owner" uri:"owner""#, &self.owner),
            Field::tagged("Repo", " repo ", &self.repo),
            Field::new("number", self.number),
            Field::tagged("Labels", r#"uri:"labels""#, self.labels.clone()),
            Field::new("assignee", self.assignee.clone()),
        ]
    }
}

struct Filter {
    state: &'static str,
    sort: &'static str,
}

impl FieldMappable for Filter {
    fn fields(&self) -> Vec<Field> {
        vec![Field::new("state", self.state), Field::new("sort", self.sort)]
    }
}

fn issue() -> Issue {
    Issue {
        owner: "jtacoma".to_string(),
        repo: "uritemplates".to_string(),
        number: 42,
        labels: vec!["bug".to_string(), "help wanted".to_string()],
        assignee: None,
    }
}

#[test]
fn test_expand_record_uses_field_keys() {
    let template =
        UriTemplate::parse("/repos{/owner,repo}/issues{/number}{?labels,assignee}").unwrap();
    assert_eq!(
        template.expand_record(&issue()).unwrap(),
        "/repos/jtacoma/uritemplates/issues/42?labels=bug,help%20wanted"
    );
}

#[test]
fn test_expand_boxed_record() {
    let record: Box<dyn FieldMappable> = Box::new(issue());
    let template = UriTemplate::parse("{/owner}").unwrap();
    assert_eq!(template.expand_record(&record).unwrap(), "/jtacoma");
}

#[test]
fn test_nested_record_expands_as_map() {
    let mut values = common::vars(serde_json::json!({"base": "/issues"}));
    values.insert(
        "filter".to_string(),
        Value::from_record(&Filter {
            state: "open",
            sort: "updated",
        }),
    );

    let template = UriTemplate::parse("{+base}{?filter*}").unwrap();
    assert_eq!(
        template.expand(&values).unwrap(),
        "/issues?sort=updated&state=open"
    );

    let template = UriTemplate::parse("{+base}{?filter:3}").unwrap();
    assert_eq!(
        template.expand(&values),
        Err(ExpandError::TruncatedMap("filter".to_string()))
    );
}

#[derive(Debug, Deserialize)]
struct Endpoints {
    issues: UriTemplate,
    search: UriTemplate,
}

#[test]
fn test_templates_load_from_yaml_config() {
    let config = r#"
issues: "/repos{/owner,repo}/issues"
search: "/search/issues{?q,page}"
"#;
    let endpoints: Endpoints = serde_yaml::from_str(config).unwrap();
    assert_eq!(endpoints.issues.names(), vec!["owner", "repo"]);
    assert_eq!(
        endpoints.search.expand_json(&serde_json::json!({"q": "is:open"})).unwrap(),
        "/search/issues?q=is%3Aopen"
    );
}

#[test]
fn test_invalid_template_in_config_fails_to_load() {
    let config = r#"
issues: "/repos{/owner"
search: "/search"
"#;
    let result: Result<Endpoints, _> = serde_yaml::from_str(config);
    assert!(result.unwrap_err().to_string().contains("malformed template"));
}
