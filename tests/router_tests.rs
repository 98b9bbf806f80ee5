use std::sync::Arc;

use http::Method;
use talus::spec::spec_from_yaml;
use talus::{DispatchError, Resolution, RouteResolver, API_DOCS_PATH};

mod tracing_util;
use tracing_util::TestTracing;

fn widget_spec() -> &'static str {
    r##"
swagger: "2.0"
info:
  title: Widget Service
  version: "1.0.0"
parameters:
  WidgetId:
    name: id
    in: path
    type: string
    required: true
paths:
  /widgets:
    get:
      operationId: listWidgets
    post:
      operationId: createWidget
  /widgets/{id}:
    get:
      operationId: getWidget
      parameters:
        - $ref: "#/parameters/WidgetId"
  /widgets/{name}:
    post:
      operationId: renameWidget
      parameters:
        - name: name
          in: path
          type: string
          required: true
  /count/{n}:
    get:
      operationId: countWidgets
      parameters:
        - name: n
          in: path
          type: integer
          required: true
"##
}

fn resolver() -> RouteResolver {
    let spec = spec_from_yaml(widget_spec()).expect("parse spec");
    RouteResolver::new(Arc::new(spec))
}

fn resolve_route(
    resolver: &RouteResolver,
    method: Method,
    path: &str,
) -> Result<Resolution, DispatchError> {
    resolver.resolve(&method, path)
}

#[test]
fn test_literal_route_resolves_with_empty_params() {
    let _tracing = TestTracing::init();
    let resolution = resolve_route(&resolver(), Method::GET, "/widgets").expect("resolve");
    let Resolution::Route(matched) = resolution else {
        panic!("expected a route match");
    };
    assert_eq!(matched.operation.operation_id, "listWidgets");
    assert!(matched.path_params.is_empty());
}

#[test]
fn test_path_parameter_extraction_through_ref() {
    let _tracing = TestTracing::init();
    let resolution = resolve_route(&resolver(), Method::GET, "/widgets/42").expect("resolve");
    let Resolution::Route(matched) = resolution else {
        panic!("expected a route match");
    };
    assert_eq!(matched.operation.operation_id, "getWidget");
    assert_eq!(
        matched.path_params.get("id").map(String::as_str),
        Some("42")
    );
}

#[test]
fn test_extra_segments_do_not_match() {
    let err = resolve_route(&resolver(), Method::GET, "/widgets/42/extra")
        .expect_err("must not resolve");
    assert!(matches!(err, DispatchError::RouteNotFound { .. }));
}

#[test]
fn test_method_mismatch_falls_through_to_later_templates() {
    let _tracing = TestTracing::init();
    // /widgets/{id} matches structurally but declares no POST; resolution
    // must continue to /widgets/{name}, which does
    let resolution = resolve_route(&resolver(), Method::POST, "/widgets/abc").expect("resolve");
    let Resolution::Route(matched) = resolution else {
        panic!("expected a route match");
    };
    assert_eq!(matched.operation.operation_id, "renameWidget");
    assert_eq!(
        matched.path_params.get("name").map(String::as_str),
        Some("abc")
    );
}

#[test]
fn test_first_structural_match_wins_in_document_order() {
    let spec = spec_from_yaml(
        r#"
swagger: "2.0"
paths:
  /things/{a}:
    get:
      operationId: firstDeclared
      parameters:
        - { name: a, in: path, type: string, required: true }
  /things/{b}:
    get:
      operationId: secondDeclared
      parameters:
        - { name: b, in: path, type: string, required: true }
"#,
    )
    .expect("parse spec");
    let resolver = RouteResolver::new(Arc::new(spec));
    let resolution = resolve_route(&resolver, Method::GET, "/things/x").expect("resolve");
    let Resolution::Route(matched) = resolution else {
        panic!("expected a route match");
    };
    assert_eq!(matched.operation.operation_id, "firstDeclared");
}

#[test]
fn test_integer_path_parameter_never_matches() {
    let err =
        resolve_route(&resolver(), Method::GET, "/count/5").expect_err("must not resolve");
    assert!(matches!(err, DispatchError::RouteNotFound { .. }));
}

#[test]
fn test_unknown_path_is_route_not_found() {
    let err = resolve_route(&resolver(), Method::GET, "/gadgets").expect_err("must not resolve");
    let DispatchError::RouteNotFound { method, path } = err else {
        panic!("expected RouteNotFound");
    };
    assert_eq!(method, Method::GET);
    assert_eq!(path, "/gadgets");
}

#[test]
fn test_undeclared_method_on_literal_path_is_route_not_found() {
    let err =
        resolve_route(&resolver(), Method::DELETE, "/widgets").expect_err("must not resolve");
    assert!(matches!(err, DispatchError::RouteNotFound { .. }));
}

#[test]
fn test_api_docs_bypasses_routing() {
    let resolution = resolve_route(&resolver(), Method::GET, API_DOCS_PATH).expect("resolve");
    assert!(matches!(resolution, Resolution::ApiDocs));
}

#[test]
fn test_unresolvable_ref_makes_the_template_unmatchable() {
    let spec = spec_from_yaml(
        r##"
swagger: "2.0"
paths:
  /widgets/{id}:
    get:
      operationId: getWidget
      parameters:
        - $ref: "#/parameters/NoSuchParameter"
"##,
    )
    .expect("parse spec");
    let resolver = RouteResolver::new(Arc::new(spec));
    let err = resolve_route(&resolver, Method::GET, "/widgets/42").expect_err("must not resolve");
    assert!(matches!(err, DispatchError::RouteNotFound { .. }));
}
