use std::{error, fmt, io};

use arcstr::ArcStr;

use crate::errors::service_error::{ServiceError, ServiceErrorKind};

/// An enum of all error kinds.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A required parameter was not bound when the request was built.
    MissingParameter,
    /// A bound parameter value could not be coerced into its declared
    /// shape.
    InvalidParameter,
    /// Conflicting output-selector configuration, detected before any call.
    InvalidSelectorConfig,
    /// The client was configured with unusable parameters, e.g. a malformed
    /// endpoint.
    InvalidClientConfig,
    /// The invocation was aborted by caller-initiated cancellation.
    Cancelled,
    /// The transport could not reach the service.
    Connectivity,
    /// The service understood the request and declined it.
    Rejected(ServiceErrorKind),
    /// A rejection whose code is not directly understood by the library.
    ExtensionError,
    /// Any other failure, with the original cause attached.
    Unknown,
}

/// Represents a command execution error.
///
/// For the most part you should be using the Error trait to interact with
/// this rather than the actual struct.
pub struct CmdError {
    repr: ErrorRepr,
}

#[derive(Debug)]
enum ErrorRepr {
    WithDescription(ErrorKind, &'static str),
    WithDescriptionAndDetail(ErrorKind, &'static str, ArcStr),
    IoError(io::Error),
    Connectivity {
        endpoint: ArcStr,
        operation: ArcStr,
        source: io::Error,
    },
    Rejected(ServiceError),
    Unknown(Box<dyn error::Error + Send + Sync>),
}

impl PartialEq for CmdError {
    fn eq(&self, other: &CmdError) -> bool {
        match (&self.repr, &other.repr) {
            (&ErrorRepr::WithDescription(kind_a, _), &ErrorRepr::WithDescription(kind_b, _)) => {
                kind_a == kind_b
            }
            (
                &ErrorRepr::WithDescriptionAndDetail(kind_a, _, _),
                &ErrorRepr::WithDescriptionAndDetail(kind_b, _, _),
            ) => kind_a == kind_b,
            (ErrorRepr::Rejected(a), ErrorRepr::Rejected(b)) => *a == *b,
            _ => false,
        }
    }
}

impl From<io::Error> for CmdError {
    fn from(err: io::Error) -> CmdError {
        CmdError {
            repr: ErrorRepr::IoError(err),
        }
    }
}

impl From<url::ParseError> for CmdError {
    fn from(err: url::ParseError) -> CmdError {
        CmdError {
            repr: ErrorRepr::WithDescriptionAndDetail(
                ErrorKind::InvalidClientConfig,
                "Endpoint URL did not parse",
                err.to_string().into(),
            ),
        }
    }
}

impl From<ServiceError> for CmdError {
    fn from(err: ServiceError) -> CmdError {
        CmdError {
            repr: ErrorRepr::Rejected(err),
        }
    }
}

impl From<ServiceErrorKind> for ErrorKind {
    fn from(kind: ServiceErrorKind) -> Self {
        ErrorKind::Rejected(kind)
    }
}

impl From<(ErrorKind, &'static str)> for CmdError {
    fn from((kind, desc): (ErrorKind, &'static str)) -> CmdError {
        CmdError {
            repr: ErrorRepr::WithDescription(kind, desc),
        }
    }
}

impl From<(ErrorKind, &'static str, String)> for CmdError {
    fn from((kind, desc, detail): (ErrorKind, &'static str, String)) -> CmdError {
        CmdError {
            repr: ErrorRepr::WithDescriptionAndDetail(kind, desc, detail.into()),
        }
    }
}

impl error::Error for CmdError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.repr {
            ErrorRepr::IoError(err) => Some(err),
            ErrorRepr::Connectivity { source, .. } => Some(source),
            ErrorRepr::Rejected(err) => Some(err),
            ErrorRepr::Unknown(cause) => Some(&**cause),
            _ => None,
        }
    }
}

impl fmt::Debug for CmdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for CmdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match &self.repr {
            ErrorRepr::WithDescription(kind, desc) => {
                desc.fmt(f)?;
                f.write_str(" - ")?;
                fmt::Debug::fmt(&kind, f)
            }
            ErrorRepr::WithDescriptionAndDetail(kind, desc, detail) => {
                desc.fmt(f)?;
                f.write_str(" - ")?;
                fmt::Debug::fmt(&kind, f)?;
                f.write_str(": ")?;
                detail.fmt(f)
            }
            ErrorRepr::IoError(err) => err.fmt(f),
            ErrorRepr::Connectivity {
                endpoint,
                operation,
                source,
            } => {
                write!(f, "Unable to reach {endpoint} for {operation}: {source}")
            }
            ErrorRepr::Rejected(err) => err.fmt(f),
            ErrorRepr::Unknown(cause) => {
                f.write_str("Unexpected failure: ")?;
                cause.fmt(f)
            }
        }
    }
}

impl CmdError {
    /// Wraps an arbitrary failure that fits no other kind.
    pub fn unknown(cause: Box<dyn error::Error + Send + Sync>) -> CmdError {
        CmdError {
            repr: ErrorRepr::Unknown(cause),
        }
    }

    pub(crate) fn missing_parameter(name: &str) -> CmdError {
        CmdError::from((
            ErrorKind::MissingParameter,
            "Required parameter is not bound",
            name.to_string(),
        ))
    }

    /// Attaches endpoint and operation context to a bare transport failure.
    ///
    /// Only connectivity-shaped failures are rewrapped; every other error
    /// passes through untouched so service rejections keep their original
    /// code and message.
    pub(crate) fn with_call_context(self, endpoint: &str, operation: &str) -> CmdError {
        match self.repr {
            ErrorRepr::IoError(source) | ErrorRepr::Connectivity { source, .. } => CmdError {
                repr: ErrorRepr::Connectivity {
                    endpoint: endpoint.into(),
                    operation: operation.into(),
                    source,
                },
            },
            other => CmdError { repr: other },
        }
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        match &self.repr {
            ErrorRepr::WithDescription(kind, _)
            | ErrorRepr::WithDescriptionAndDetail(kind, _, _) => *kind,
            ErrorRepr::IoError(_) | ErrorRepr::Connectivity { .. } => ErrorKind::Connectivity,
            ErrorRepr::Rejected(err) => match err.kind() {
                Some(kind) => ErrorKind::Rejected(kind),
                None => ErrorKind::ExtensionError,
            },
            ErrorRepr::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Returns the error detail.  For parameter validation errors this is
    /// the name of the offending parameter.
    pub fn detail(&self) -> Option<&str> {
        match &self.repr {
            ErrorRepr::WithDescriptionAndDetail(_, _, detail) => Some(detail.as_str()),
            ErrorRepr::Rejected(err) => err.details(),
            _ => None,
        }
    }

    /// Returns the raw rejection code if the service declined the request.
    pub fn code(&self) -> Option<&str> {
        match &self.repr {
            ErrorRepr::Rejected(err) => Some(err.code()),
            _ => None,
        }
    }

    /// Returns the name of the error category for display purposes.
    pub fn category(&self) -> &str {
        match self.kind() {
            ErrorKind::MissingParameter => "missing parameter",
            ErrorKind::InvalidParameter => "invalid parameter",
            ErrorKind::InvalidSelectorConfig => "invalid selector config",
            ErrorKind::InvalidClientConfig => "invalid client config",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Connectivity => "connectivity",
            ErrorKind::Rejected(_) | ErrorKind::ExtensionError => "rejected by service",
            ErrorKind::Unknown => "unknown",
        }
    }

    /// Indicates a failure that was detected locally, before any call was
    /// attempted.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::MissingParameter
                | ErrorKind::InvalidParameter
                | ErrorKind::InvalidSelectorConfig
                | ErrorKind::InvalidClientConfig
        )
    }

    /// Indicates that the invocation was aborted by cancellation.
    pub fn is_cancelled(&self) -> bool {
        self.kind() == ErrorKind::Cancelled
    }

    /// Indicates that the service could not be reached at all.
    pub fn is_connectivity_error(&self) -> bool {
        self.kind() == ErrorKind::Connectivity
    }

    /// Indicates that the service understood the request and declined it.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Rejected(_) | ErrorKind::ExtensionError
        )
    }
}
