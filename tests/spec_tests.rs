use http::Method;
use talus::spec::{load_spec, spec_from_json, spec_from_yaml};
use talus::ParameterLocation;

mod tracing_util;
use tracing_util::TestTracing;

const YAML_DOC: &str = r#"
swagger: "2.0"
info:
  title: Minimal
  version: "1.0.0"
paths:
  /ping:
    get:
      operationId: ping
"#;

#[test]
fn test_spec_from_yaml() {
    let spec = spec_from_yaml(YAML_DOC).expect("parse");
    let op = spec.operation("/ping", &Method::GET).expect("operation");
    assert_eq!(op.operation_id, "ping");
}

#[test]
fn test_spec_from_json() {
    let spec = spec_from_json(
        r#"{ "swagger": "2.0", "paths": { "/ping": { "get": { "operationId": "ping" } } } }"#,
    )
    .expect("parse");
    assert!(spec.operation("/ping", &Method::GET).is_some());
}

#[test]
fn test_invalid_document_is_an_error() {
    assert!(spec_from_json(r#"{ "swagger": "2.0" }"#).is_err());
    assert!(spec_from_yaml("not: [valid").is_err());
}

#[test]
fn test_load_spec_keyed_by_extension() {
    let _tracing = TestTracing::init();
    let dir = std::env::temp_dir();
    let path = dir.join("talus_spec_test.yaml");
    std::fs::write(&path, YAML_DOC).expect("write temp spec");
    let spec = load_spec(path.to_str().expect("utf8 path")).expect("load");
    assert!(spec.operation("/ping", &Method::GET).is_some());
    let _cleanup = std::fs::remove_file(&path);
}

#[test]
fn test_path_level_parameters_are_merged_first() {
    let spec = spec_from_yaml(
        r#"
swagger: "2.0"
paths:
  /widgets/{id}:
    parameters:
      - { name: id, in: path, type: string, required: true }
    get:
      operationId: getWidget
      parameters:
        - { name: verbose, in: query, type: boolean }
"#,
    )
    .expect("parse");
    let op = spec
        .operation("/widgets/{id}", &Method::GET)
        .expect("operation");
    assert_eq!(op.parameters.len(), 2);
    assert_eq!(op.parameters[0].name, "id");
    assert_eq!(op.parameters[0].location, ParameterLocation::Path);
    assert_eq!(op.parameters[1].name, "verbose");
    assert_eq!(op.parameters[1].location, ParameterLocation::Query);
}
