use super::core::{Middleware, Next};
use crate::error::DispatchError;
use crate::server::{Request, Response};

/// Post-processes the outgoing response: when no `Content-Type` was
/// declared by anything deeper in the chain, JSON is assumed.
pub struct HeaderMiddleware;

impl Middleware for HeaderMiddleware {
    fn call(
        &self,
        request: Request,
        response: Response,
        next: &Next,
    ) -> Result<Response, DispatchError> {
        let out = next(request, response)?;
        if out.header("content-type").is_none() {
            return Ok(out.with_header("Content-Type", "application/json"));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::MiddlewareChain;
    use http::Method;
    use std::sync::Arc;

    #[test]
    fn test_sets_default_content_type() {
        let mut chain = MiddlewareChain::new();
        chain.add_middleware(Arc::new(HeaderMiddleware));
        let out = chain
            .execute(Request::new(Method::GET, "/"), Response::new())
            .expect("execute");
        assert_eq!(out.header("Content-Type").as_deref(), Some("application/json"));
    }

    #[test]
    fn test_keeps_explicit_content_type() {
        let mut chain = MiddlewareChain::new();
        chain.add_middleware(Arc::new(
            |request: Request, response: Response, next: &Next| {
                next(request, response.with_header("Content-Type", "text/plain"))
            },
        ));
        chain.add_middleware(Arc::new(HeaderMiddleware));
        let out = chain
            .execute(Request::new(Method::GET, "/"), Response::new())
            .expect("execute");
        assert_eq!(out.header("Content-Type").as_deref(), Some("text/plain"));
    }
}
