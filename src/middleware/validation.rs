use tracing::warn;

use super::core::{Middleware, Next};
use crate::error::DispatchError;
use crate::server::{Request, Response};
use crate::spec::ParameterLocation;

/// Validates the request against the resolved operation's declared
/// parameters: every required path parameter must have been extracted and
/// attached by the routing middleware.
pub struct ValidationMiddleware;

impl Middleware for ValidationMiddleware {
    fn call(
        &self,
        request: Request,
        response: Response,
        next: &Next,
    ) -> Result<Response, DispatchError> {
        if let Some(operation) = request.operation() {
            for param in &operation.parameters {
                if param.location != ParameterLocation::Path || !param.required {
                    continue;
                }
                if request.attribute(&param.name).is_none() {
                    warn!(
                        operation_id = %operation.operation_id,
                        name = %param.name,
                        "required path parameter missing"
                    );
                    return Err(DispatchError::Validation {
                        detail: format!("missing required path parameter '{}'", param.name),
                    });
                }
            }
        }
        next(request, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::MiddlewareChain;
    use crate::spec::{OperationMeta, ParameterMeta};
    use http::Method;
    use serde_json::Value;
    use std::sync::Arc;

    fn operation_with_required_id() -> Arc<OperationMeta> {
        Arc::new(OperationMeta {
            method: Method::GET,
            path_pattern: "/widgets/{id}".to_string(),
            operation_id: "getWidget".to_string(),
            controller: None,
            parameters: vec![ParameterMeta {
                name: "id".to_string(),
                location: ParameterLocation::Path,
                ty: "string".to_string(),
                required: true,
            }],
        })
    }

    #[test]
    fn test_missing_required_path_parameter_is_rejected() {
        let mut chain = MiddlewareChain::new();
        chain.add_middleware(Arc::new(ValidationMiddleware));
        let request =
            Request::new(Method::GET, "/widgets/42").with_operation(operation_with_required_id());
        let err = chain
            .execute(request, Response::new())
            .expect_err("validation should fail");
        assert!(matches!(err, DispatchError::Validation { .. }));
    }

    #[test]
    fn test_attached_parameter_passes() {
        let mut chain = MiddlewareChain::new();
        chain.add_middleware(Arc::new(ValidationMiddleware));
        let request = Request::new(Method::GET, "/widgets/42")
            .with_operation(operation_with_required_id())
            .with_attribute("id", Value::String("42".to_string()));
        assert!(chain.execute(request, Response::new()).is_ok());
    }

    #[test]
    fn test_requests_without_operation_pass_through() {
        let mut chain = MiddlewareChain::new();
        chain.add_middleware(Arc::new(ValidationMiddleware));
        let request = Request::new(Method::GET, "/anywhere");
        assert!(chain.execute(request, Response::new()).is_ok());
    }
}
