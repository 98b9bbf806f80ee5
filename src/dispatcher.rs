//! The top-level orchestrator: owns the middleware chain, registers the
//! built-in middleware and user controllers, and bridges to the request
//! source and response sink collaborators.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::error::{ConfigError, DispatchError};
use crate::middleware::{
    CasterMiddleware, HeaderMiddleware, Middleware, MiddlewareChain, Next, RouterMiddleware,
    ValidationMiddleware,
};
use crate::server::{Request, RequestSource, Response, ResponseSink};
use crate::spec::SwaggerSpec;

/// Terminal business-logic handler for one operationId.
pub type Controller = Arc<dyn Fn(Request, Response) -> Result<Response, DispatchError> + Send + Sync>;

/// Converts a dispatch failure plus the original request/response into the
/// final response. The handler alone owns status and body decisions.
pub type ErrorHandler = Arc<dyn Fn(&Request, Response, &DispatchError) -> Response + Send + Sync>;

/// Opaque service locator passed through unexamined to controller
/// construction code during registration.
pub type Container = Arc<dyn Any + Send + Sync>;

/// Default error handler: writes `Error: <message>` into the body and
/// leaves the status code untouched. Deliberately not a 500; status
/// decisions belong to whoever replaces this handler.
fn default_error_handler() -> ErrorHandler {
    Arc::new(|_request, response, err| response.with_body(format!("Error: {err}")))
}

/// The dispatcher: one instance processes exactly one request-response
/// cycle per [`run`](Talus::run) invocation.
///
/// Controllers and middleware are registered up front; the middleware stack
/// is built once, lazily, on the first dispatch. The design assumes one
/// `Talus` (and hence one built stack) per request lifecycle; a server
/// adapter that wants to reuse an instance across concurrent requests must
/// enforce that discipline itself.
pub struct Talus {
    spec: Arc<SwaggerSpec>,
    chain: MiddlewareChain,
    controllers: HashMap<String, Controller>,
    /// User middleware queued until the stack is built, so the built-ins
    /// always end up outermost
    queued_middleware: Vec<Arc<dyn Middleware>>,
    error_handler: ErrorHandler,
    container: Option<Container>,
    source: Option<Box<dyn RequestSource>>,
    sink: Option<Box<dyn ResponseSink>>,
    stack_built: bool,
}

impl Talus {
    /// Start configuring a dispatcher.
    #[must_use]
    pub fn builder() -> TalusBuilder {
        TalusBuilder::default()
    }

    /// The document view this dispatcher routes against.
    #[must_use]
    pub fn spec(&self) -> &Arc<SwaggerSpec> {
        &self.spec
    }

    /// The opaque container supplied at construction, for controller setup
    /// code that wants it.
    #[must_use]
    pub fn container(&self) -> Option<&Container> {
        self.container.as_ref()
    }

    /// Register the controller for an operationId.
    ///
    /// Must happen before the first dispatch; the registry is snapshotted
    /// into the chain's terminal entry when the stack is built.
    pub fn add_controller<F>(&mut self, operation_id: impl Into<String>, controller: F)
    where
        F: Fn(Request, Response) -> Result<Response, DispatchError> + Send + Sync + 'static,
    {
        let operation_id = operation_id.into();
        debug!(operation_id = %operation_id, "controller registered");
        self.controllers.insert(operation_id, Arc::new(controller));
    }

    /// Queue a user middleware. It will execute after the built-in
    /// middleware and before the terminal controller dispatch, in
    /// reverse order of registration among user middleware.
    pub fn add_middleware<M: Middleware + 'static>(&mut self, middleware: M) {
        self.queued_middleware.push(Arc::new(middleware));
    }

    /// Replace the error handler collaborator.
    pub fn set_error_handler<F>(&mut self, handler: F)
    where
        F: Fn(&Request, Response, &DispatchError) -> Response + Send + Sync + 'static,
    {
        self.error_handler = Arc::new(handler);
    }

    /// Build the stack exactly once: seed with the terminal controller
    /// dispatch, then user middleware, then the built-ins in fixed order.
    /// The routing middleware is registered last so it executes first.
    fn build_stack(&mut self) {
        if self.stack_built {
            return;
        }
        self.stack_built = true;

        let registry: Arc<HashMap<String, Controller>> = Arc::new(self.controllers.clone());
        let terminal: Next = Arc::new(move |request: Request, response: Response| {
            let Some(operation) = request.operation().cloned() else {
                return Err(DispatchError::ContractViolation {
                    detail: "terminal dispatch reached without a resolved operation".to_string(),
                });
            };
            match registry.get(&operation.operation_id) {
                Some(controller) => {
                    info!(operation_id = %operation.operation_id, "invoking controller");
                    controller(request, response)
                }
                None => Err(DispatchError::OperationNotDefined {
                    operation_id: operation.operation_id.clone(),
                }),
            }
        });
        // The chain is private to this dispatcher and build_stack is
        // guarded, so the stack cannot have been seeded before this point.
        #[allow(clippy::expect_used)]
        let seeded = self
            .chain
            .seed(terminal)
            .expect("middleware stack seeded before build");
        debug!(stack_size = seeded, "middleware stack seeded");

        for middleware in self.queued_middleware.drain(..) {
            self.chain.add_middleware(middleware);
        }

        self.chain.add_middleware(Arc::new(HeaderMiddleware));
        self.chain.add_middleware(Arc::new(CasterMiddleware));
        self.chain.add_middleware(Arc::new(ValidationMiddleware));
        let size = self
            .chain
            .add_middleware(Arc::new(RouterMiddleware::new(Arc::clone(&self.spec))));
        debug!(stack_size = size, "middleware stack built");
    }

    /// Dispatch one request/response pair through the chain.
    ///
    /// This is the single catch boundary: any failure below it, expected or
    /// not, is delegated to the error-handler collaborator, whose output
    /// becomes the final response. Nothing is retried.
    pub fn handle(&mut self, request: Request, response: Response) -> Response {
        self.build_stack();
        debug!(method = %request.method(), path = %request.path(), "dispatching request");

        match self.chain.execute(request.clone(), response.clone()) {
            Ok(out) => out,
            Err(err) => {
                match &err {
                    DispatchError::ContractViolation { detail } => {
                        error!(detail = %detail, "middleware contract violated");
                    }
                    other => warn!(error = %other, "dispatch failed"),
                }
                (self.error_handler)(&request, response, &err)
            }
        }
    }

    /// One full cycle: obtain a request from the source collaborator, run
    /// the chain, write the final response through the sink collaborator.
    pub fn run(&mut self) -> io::Result<()> {
        let request = match &self.source {
            Some(source) => source.produce(),
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotConnected,
                    "no request source configured",
                ))
            }
        };
        let out = self.handle(request, Response::new());
        match &mut self.sink {
            Some(sink) => sink.write_response(&out),
            None => Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "no response sink configured",
            )),
        }
    }
}

// Hand-implemented: the collaborator trait objects have no Debug impls.
impl fmt::Debug for Talus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut controllers: Vec<&str> = self.controllers.keys().map(String::as_str).collect();
        controllers.sort_unstable();
        f.debug_struct("Talus")
            .field("controllers", &controllers)
            .field("queued_middleware", &self.queued_middleware.len())
            .field("has_container", &self.container.is_some())
            .field("has_source", &self.source.is_some())
            .field("has_sink", &self.sink.is_some())
            .field("stack_built", &self.stack_built)
            .finish_non_exhaustive()
    }
}

/// Explicit configuration for [`Talus`], validated once at build time.
///
/// The Swagger document is mandatory; everything else has a documented
/// default: a no-op logging sink (no `tracing` subscriber installed), an
/// error handler that writes the message into the body, and no request
/// source or response sink (required only for [`Talus::run`]).
#[derive(Default)]
pub struct TalusBuilder {
    document: Option<serde_json::Value>,
    error_handler: Option<ErrorHandler>,
    container: Option<Container>,
    source: Option<Box<dyn RequestSource>>,
    sink: Option<Box<dyn ResponseSink>>,
}

impl TalusBuilder {
    /// Supply the parsed Swagger document (required).
    #[must_use]
    pub fn document(mut self, document: serde_json::Value) -> Self {
        self.document = Some(document);
        self
    }

    /// Supply an already-wrapped document view.
    #[must_use]
    pub fn spec(mut self, spec: SwaggerSpec) -> Self {
        self.document = Some(spec.into_root());
        self
    }

    /// Replace the default error handler.
    #[must_use]
    pub fn error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Request, Response, &DispatchError) -> Response + Send + Sync + 'static,
    {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    /// Attach an opaque service locator, passed through unexamined.
    #[must_use]
    pub fn container(mut self, container: Container) -> Self {
        self.container = Some(container);
        self
    }

    /// Attach the request factory collaborator used by [`Talus::run`].
    #[must_use]
    pub fn request_source(mut self, source: impl RequestSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Attach the output collaborator used by [`Talus::run`].
    #[must_use]
    pub fn response_sink(mut self, sink: impl ResponseSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Validate the configuration and construct the dispatcher.
    pub fn build(self) -> Result<Talus, ConfigError> {
        let document = self.document.ok_or(ConfigError::MissingDocument)?;
        let spec = Arc::new(SwaggerSpec::new(document)?);
        Ok(Talus {
            spec,
            chain: MiddlewareChain::new(),
            controllers: HashMap::new(),
            queued_middleware: Vec::new(),
            error_handler: self.error_handler.unwrap_or_else(default_error_handler),
            container: self.container,
            source: self.source,
            sink: self.sink,
            stack_built: false,
        })
    }
}
