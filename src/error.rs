use std::fmt;

/// Errors produced while a request flows through a bound hook chain.
///
/// These belong to handlers and to whatever server ultimately answers the
/// request; the binder itself never raises them. `status_code` gives the
/// conventional HTTP mapping for adapters that want one.
#[derive(Debug)]
pub enum RequestError {
    NotFound,
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    InternalError(String),
}

impl RequestError {
    pub fn status_code(&self) -> u16 {
        match self {
            RequestError::BadRequest(_) => 400,
            RequestError::Unauthorized(_) => 401,
            RequestError::Forbidden(_) => 403,
            RequestError::NotFound => 404,
            RequestError::InternalError(_) => 500,
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::NotFound => write!(f, "Not found"),
            RequestError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            RequestError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            RequestError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            RequestError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for RequestError {}

pub type RequestResult<T> = Result<T, RequestError>;

/// Fatal configuration problems detected while binding routes.
///
/// Binding happens once at startup; anything wrong with a controller's hook
/// wiring surfaces here instead of at request time.
#[derive(Debug, PartialEq, Eq)]
pub enum BindError {
    /// A `before`/`after` entry names a hook the controller cannot resolve.
    UnknownHook { controller: String, hook: String },
    /// Strict mode only: a filter entry carries both `only` and `except`.
    ConflictingFilter { controller: String, hook: String },
    /// An action reference is not of the form `"controller#action"`.
    InvalidActionRef(String),
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::UnknownHook { controller, hook } => {
                write!(f, "controller '{}' has no hook named '{}'", controller, hook)
            }
            BindError::ConflictingFilter { controller, hook } => {
                write!(
                    f,
                    "hook '{}' on controller '{}' sets both 'only' and 'except'",
                    hook, controller
                )
            }
            BindError::InvalidActionRef(spec) => {
                write!(f, "invalid action reference '{}', expected 'controller#action'", spec)
            }
        }
    }
}

impl std::error::Error for BindError {}

/// A path helper was invoked with fewer values than its template has tokens.
#[derive(Debug, PartialEq, Eq)]
pub struct ArityError {
    pub template: String,
    pub expected: usize,
    pub supplied: usize,
}

impl fmt::Display for ArityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "path template '{}' takes {} value(s), got {}",
            self.template, self.expected, self.supplied
        )
    }
}

impl std::error::Error for ArityError {}

/// Failure to render a named path helper through the router.
#[derive(Debug, PartialEq, Eq)]
pub enum PathError {
    UnknownHelper(String),
    Arity(ArityError),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::UnknownHelper(name) => write!(f, "no path helper named '{}'", name),
            PathError::Arity(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PathError::Arity(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ArityError> for PathError {
    fn from(err: ArityError) -> Self {
        PathError::Arity(err)
    }
}
