use std::{error, fmt};

use arcstr::ArcStr;

/// Well-known rejection codes returned by the service.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
#[non_exhaustive]
pub enum ServiceErrorKind {
    /// A parameter value was understood but not acceptable.
    InvalidParameterValue,
    /// Two or more parameters cannot be combined.
    InvalidParameterCombination,
    /// The addressed resource does not exist.
    ResourceNotFound,
    /// A resource with the requested identifier already exists.
    ResourceAlreadyExists,
    /// The resource is not in a state that allows the operation.
    InvalidResourceState,
    /// A service quota would be exceeded.
    QuotaExceeded,
    /// The request was throttled at the service level.
    Throttling,
    /// The caller is not authorized for the operation.
    AccessDenied,
}

impl ServiceErrorKind {
    pub(crate) fn code(&self) -> &'static str {
        match self {
            Self::InvalidParameterValue => "InvalidParameterValue",
            Self::InvalidParameterCombination => "InvalidParameterCombination",
            Self::ResourceNotFound => "ResourceNotFoundFault",
            Self::ResourceAlreadyExists => "ResourceAlreadyExistsFault",
            Self::InvalidResourceState => "InvalidResourceStateFault",
            Self::QuotaExceeded => "QuotaExceededFault",
            Self::Throttling => "ThrottlingException",
            Self::AccessDenied => "AccessDeniedException",
        }
    }
}

/// A rejection that was returned from the service.
///
/// The service understood the request and declined it.  The code and
/// message the service provided pass through intact; codes the library does
/// not recognize are kept as extension rejections.
#[derive(PartialEq, Debug, Clone)]
pub struct ServiceError(pub(crate) Repr);

#[derive(PartialEq, Debug, Clone)]
pub(crate) enum Repr {
    Extension {
        code: ArcStr,
        detail: Option<ArcStr>,
    },
    Known {
        kind: ServiceErrorKind,
        detail: Option<ArcStr>,
    },
}

impl ServiceError {
    /// Creates a rejection with a well-known kind.
    pub fn known(kind: ServiceErrorKind, detail: Option<String>) -> ServiceError {
        ServiceError(Repr::Known {
            kind,
            detail: detail.map(ArcStr::from),
        })
    }

    /// Creates a rejection for a code the library does not recognize.
    pub fn extension(code: impl Into<ArcStr>, detail: Option<String>) -> ServiceError {
        ServiceError(Repr::Extension {
            code: code.into(),
            detail: detail.map(ArcStr::from),
        })
    }

    /// Returns the kind of rejection.  If `None`, check [`Self::code`] for
    /// the raw code.
    pub fn kind(&self) -> Option<ServiceErrorKind> {
        match &self.0 {
            Repr::Extension { .. } => None,
            Repr::Known { kind, .. } => Some(*kind),
        }
    }

    /// The rejection code returned by the service.
    pub fn code(&self) -> &str {
        match &self.0 {
            Repr::Extension { code, .. } => code,
            Repr::Known { kind, .. } => kind.code(),
        }
    }

    /// The service-provided message, if one exists.
    pub fn details(&self) -> Option<&str> {
        match &self.0 {
            Repr::Extension { detail, .. } => detail.as_ref().map(|s| s.as_str()),
            Repr::Known { detail, .. } => detail.as_ref().map(|s| s.as_str()),
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())?;
        if let Some(detail) = self.details() {
            f.write_str(": ")?;
            f.write_str(detail)?;
        }
        Ok(())
    }
}

impl error::Error for ServiceError {}
