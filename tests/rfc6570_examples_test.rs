// Expansion of the RFC 6570 section 3.2 example tables

use uritemplates::UriTemplate;

mod common;

const RFC6570_EXAMPLES: &str = include_str!("fixtures/rfc6570.yaml");

#[test]
fn test_rfc6570_examples() {
    let suite = common::load_suite(RFC6570_EXAMPLES).expect("Failed to load fixture");
    assert!(!suite.sections.is_empty());

    let mut failures = Vec::new();
    for section in &suite.sections {
        for (raw, expected) in &section.testcases {
            let template = UriTemplate::parse(raw)
                .unwrap_or_else(|e| panic!("{}: failed to parse {}: {}", section.name, raw, e));
            match template.expand(&suite.variables) {
                Ok(actual) if &actual == expected => {}
                Ok(actual) => failures.push(format!(
                    "{}: {} expanded to {:?}, expected {:?}",
                    section.name, raw, actual, expected
                )),
                Err(e) => failures.push(format!("{}: {} failed: {}", section.name, raw, e)),
            }
        }
    }

    assert!(failures.is_empty(), "mismatches:\n{}", failures.join("\n"));
}

#[test]
fn test_rfc6570_examples_round_trip() {
    let suite = common::load_suite(RFC6570_EXAMPLES).expect("Failed to load fixture");
    for section in &suite.sections {
        for (raw, _) in &section.testcases {
            let template: UriTemplate = raw.parse().unwrap();
            assert_eq!(&template.to_string(), raw);
        }
    }
}
