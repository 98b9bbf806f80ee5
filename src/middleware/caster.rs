use serde_json::Value;
use tracing::debug;

use super::core::{Middleware, Next};
use crate::error::DispatchError;
use crate::server::{Request, Response};

/// Casts attached request attributes to their declared Swagger parameter
/// types. String-valued attributes whose parameter declares `integer`,
/// `number` or `boolean` are replaced with a typed JSON value; anything that
/// does not parse passes through unchanged for validation to judge.
pub struct CasterMiddleware;

impl Middleware for CasterMiddleware {
    fn call(
        &self,
        request: Request,
        response: Response,
        next: &Next,
    ) -> Result<Response, DispatchError> {
        let Some(operation) = request.operation().cloned() else {
            return next(request, response);
        };

        let mut request = request;
        for param in &operation.parameters {
            let raw = match request.attribute(&param.name) {
                Some(Value::String(s)) => s.clone(),
                _ => continue,
            };
            if let Some(cast) = cast_value(&raw, &param.ty) {
                debug!(name = %param.name, ty = %param.ty, "casting attribute");
                request = request.with_attribute(param.name.clone(), cast);
            }
        }
        next(request, response)
    }
}

fn cast_value(raw: &str, ty: &str) -> Option<Value> {
    match ty {
        "integer" => raw.parse::<i64>().ok().map(Value::from),
        "number" => raw.parse::<f64>().ok().map(Value::from),
        "boolean" => match raw {
            "true" | "1" => Some(Value::Bool(true)),
            "false" | "0" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}
