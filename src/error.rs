use std::fmt;

use http::Method;

/// Construction-time configuration failure.
///
/// Returned by [`TalusBuilder::build`](crate::dispatcher::TalusBuilder::build)
/// and never caught internally; a dispatcher with a broken configuration must
/// not come into existence.
#[derive(Debug)]
pub enum ConfigError {
    /// No Swagger document was supplied to the builder.
    MissingDocument,
    /// The supplied document is not a usable Swagger document.
    InvalidDocument {
        /// What was wrong with it
        detail: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingDocument => {
                write!(f, "a Swagger document is required to build a dispatcher")
            }
            ConfigError::InvalidDocument { detail } => {
                write!(f, "invalid Swagger document: {detail}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Request-time failure funnelled to the single catch boundary in
/// [`Talus::handle`](crate::dispatcher::Talus::handle).
///
/// Expected outcomes (`RouteNotFound`, `OperationNotDefined`, `Validation`)
/// and genuine faults (`ContractViolation`) travel the same path so the
/// error-handler collaborator sees every failure uniformly. The handler alone
/// decides the user-visible status and body.
#[derive(Debug)]
pub enum DispatchError {
    /// No declared path/method combination matched the request.
    RouteNotFound {
        /// Request method
        method: Method,
        /// Request path
        path: String,
    },
    /// A route matched but no controller was ever registered for its
    /// operationId. Distinct from `RouteNotFound`: the document declares the
    /// operation, the application forgot to wire it.
    OperationNotDefined {
        /// The orphaned operationId
        operation_id: String,
    },
    /// A middleware broke its contract, e.g. produced a malformed response.
    /// Not business-recoverable; logged as a bug signal rather than a
    /// user-facing condition.
    ContractViolation {
        /// Description of the violated contract
        detail: String,
    },
    /// The request failed validation against the declared parameters.
    Validation {
        /// What failed to validate
        detail: String,
    },
    /// Arbitrary failure raised by a user controller or middleware.
    Controller(anyhow::Error),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::RouteNotFound { method, path } => {
                write!(f, "no route matched {method} {path}")
            }
            DispatchError::OperationNotDefined { operation_id } => {
                write!(f, "operation '{operation_id}' is not defined with a controller")
            }
            DispatchError::ContractViolation { detail } => {
                write!(f, "middleware contract violation: {detail}")
            }
            DispatchError::Validation { detail } => {
                write!(f, "request validation failed: {detail}")
            }
            DispatchError::Controller(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Controller(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for DispatchError {
    fn from(err: anyhow::Error) -> Self {
        DispatchError::Controller(err)
    }
}
