use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use tracing::{debug, info, warn};

use super::matcher::match_path;
use crate::error::DispatchError;
use crate::spec::{OperationMeta, SwaggerSpec};

/// Reserved diagnostic path serving the raw Swagger document as JSON.
///
/// Exists so the specification stays introspectable even when no controller
/// is registered for it; resolution special-cases it before normal routing.
pub const API_DOCS_PATH: &str = "/api-docs";

/// Result of successfully matching a request to a declared operation.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched operation (shared, read-only)
    pub operation: Arc<OperationMeta>,
    /// Path parameters extracted from the URL, e.g. `{id}` -> `"42"`
    pub path_params: HashMap<String, String>,
}

/// What resolution decided for a request.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// The reserved diagnostic path; serve the document, bypass routing
    ApiDocs,
    /// A declared operation matched
    Route(RouteMatch),
}

/// Maps an incoming method/path pair to a Swagger-declared operation.
///
/// Candidate paths are tried in document declaration order and the first
/// structural match with the requested method wins; there is no specificity
/// scoring, so more specific templates must be declared before more general
/// ones. A path that matches structurally but does not declare the method
/// falls through to later candidates, which is what makes overlapping
/// templates with disjoint method sets work.
#[derive(Debug, Clone)]
pub struct RouteResolver {
    spec: Arc<SwaggerSpec>,
}

impl RouteResolver {
    /// Create a resolver over a document view.
    #[must_use]
    pub fn new(spec: Arc<SwaggerSpec>) -> Self {
        RouteResolver { spec }
    }

    /// Resolve a request to an operation, or fail with a typed
    /// `RouteNotFound`. Not-found is an expected outcome here, not a fault;
    /// the orchestrator routes it through the same error handling as any
    /// other dispatch failure.
    pub fn resolve(&self, method: &Method, path: &str) -> Result<Resolution, DispatchError> {
        if path == API_DOCS_PATH {
            debug!(path, "serving the swagger document");
            return Ok(Resolution::ApiDocs);
        }

        debug!(method = %method, path, "route match attempt");

        for (template, _item) in self.spec.paths() {
            let operation = self.spec.operation(template, method);
            let parameters = match &operation {
                Some(op) => op.parameters.clone(),
                None => self.spec.path_level_parameters(template),
            };
            let Some(path_params) = match_path(path, template, &parameters) else {
                continue;
            };
            match operation {
                Some(op) => {
                    info!(
                        method = %method,
                        path,
                        template = %template,
                        operation_id = %op.operation_id,
                        path_params = ?path_params,
                        "route matched"
                    );
                    return Ok(Resolution::Route(RouteMatch {
                        operation: Arc::new(op),
                        path_params,
                    }));
                }
                None => {
                    // Structural match without the method: keep walking, a
                    // later overlapping template may declare it
                    debug!(
                        method = %method,
                        path,
                        template = %template,
                        "path matched but method not declared, trying later candidates"
                    );
                }
            }
        }

        warn!(method = %method, path, "no route matched");
        Err(DispatchError::RouteNotFound {
            method: method.clone(),
            path: path.to_string(),
        })
    }
}
