use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::core::{Middleware, Next};
use crate::error::DispatchError;
use crate::router::{Resolution, RouteResolver};
use crate::server::{Request, Response};
use crate::spec::SwaggerSpec;

/// Routing middleware: resolves the request against the Swagger document,
/// attaches the matched operation and extracted path parameters to the
/// request, and continues down the chain.
///
/// The reserved `/api-docs` path is answered here directly with the raw
/// document serialized as JSON; the rest of the chain never runs for it.
/// The `Content-Type` is left to upstream middleware.
pub struct RouterMiddleware {
    resolver: RouteResolver,
    spec: Arc<SwaggerSpec>,
}

impl RouterMiddleware {
    /// Create the routing middleware over a document view.
    #[must_use]
    pub fn new(spec: Arc<SwaggerSpec>) -> Self {
        RouterMiddleware {
            resolver: RouteResolver::new(Arc::clone(&spec)),
            spec,
        }
    }
}

impl Middleware for RouterMiddleware {
    fn call(
        &self,
        request: Request,
        response: Response,
        next: &Next,
    ) -> Result<Response, DispatchError> {
        match self.resolver.resolve(request.method(), request.path())? {
            Resolution::ApiDocs => {
                let body = serde_json::to_vec(self.spec.raw())
                    .map_err(|err| DispatchError::Controller(err.into()))?;
                Ok(response.with_body(body))
            }
            Resolution::Route(matched) => {
                let mut request = request.with_operation(Arc::clone(&matched.operation));
                for (name, value) in matched.path_params {
                    debug!(name, value, "attaching path parameter");
                    request = request.with_attribute(name, Value::String(value));
                }
                next(request, response)
            }
        }
    }
}
