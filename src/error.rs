//! Error types returned to API callers.
//!
//! Every rejection is a single [`CloudError`]: an HTTP status, a
//! machine-readable code, the offending field path and a message. The
//! request layer turns it into the wire envelope via [`CloudError::envelope`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// HTTP status used for every admission rejection.
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Machine-readable classification of a rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum CloudErrorCode {
    InvalidParameter,
    #[serde(rename = "MismatchingResourceID")]
    MismatchingResourceId,
    MismatchingResourceName,
    MismatchingResourceType,
    #[serde(rename = "InvalidCIDRRange")]
    InvalidCidrRange,
    InvalidNetworkAddress,
    PropertyChangeNotAllowed,
}

impl fmt::Display for CloudErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloudErrorCode::InvalidParameter => write!(f, "InvalidParameter"),
            CloudErrorCode::MismatchingResourceId => write!(f, "MismatchingResourceID"),
            CloudErrorCode::MismatchingResourceName => write!(f, "MismatchingResourceName"),
            CloudErrorCode::MismatchingResourceType => write!(f, "MismatchingResourceType"),
            CloudErrorCode::InvalidCidrRange => write!(f, "InvalidCIDRRange"),
            CloudErrorCode::InvalidNetworkAddress => write!(f, "InvalidNetworkAddress"),
            CloudErrorCode::PropertyChangeNotAllowed => write!(f, "PropertyChangeNotAllowed"),
        }
    }
}

/// Coarse category of a client input error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Something did not parse (CIDR, URL, GUID, resource id).
    MalformedInput,
    /// A number is outside its allowed bounds.
    OutOfRange,
    /// Two fields that must agree do not.
    ReferentialMismatch,
    /// A size or enumeration value that is not offered.
    UnsupportedCapability,
    /// A protected field was changed, or an output-only field was set.
    ImmutabilityViolation,
}

/// A single admission rejection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{status_code}: {code}: {target}: {message}")]
pub struct CloudError {
    pub status_code: u16,
    pub code: CloudErrorCode,
    pub target: String,
    pub message: String,
    kind: ErrorKind,
}

impl CloudError {
    /// A 400 rejection.
    pub fn bad_request(
        code: CloudErrorCode,
        kind: ErrorKind,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status_code: STATUS_BAD_REQUEST,
            code,
            target: target.into(),
            message: message.into(),
            kind,
        }
    }

    /// A 400 `InvalidParameter` rejection.
    pub fn invalid_parameter(
        kind: ErrorKind,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::bad_request(CloudErrorCode::InvalidParameter, kind, target, message)
    }

    /// Category of the rejection
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Admission rejections describe the request itself; resending the same
    /// request cannot succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Wire representation expected by API clients.
    pub fn envelope(&self) -> CloudErrorEnvelope {
        CloudErrorEnvelope {
            error: CloudErrorBody {
                code: self.code,
                message: self.message.clone(),
                target: self.target.clone(),
            },
        }
    }
}

/// `{"error": {...}}` body returned with a failed request.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CloudErrorEnvelope {
    pub error: CloudErrorBody,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CloudErrorBody {
    pub code: CloudErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target: String,
}

/// Result type alias for admission checks
pub type Result<T> = std::result::Result<T, CloudError>;
