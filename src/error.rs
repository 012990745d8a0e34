//! Protocol error types.
//!
//! Every decode failure in this crate is reported as a [`ProtocolError`]
//! carrying one of the JSON-RPC error codes. The code set is open: method-
//! specific codes outside the reserved range map to [`ErrorCode::Other`].

use serde_json::Value;

use crate::jsonrpc::ErrorObject;

/// JSON-RPC error codes.
///
/// The five named codes are reserved by JSON-RPC 2.0; anything else is
/// carried through as [`ErrorCode::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid JSON was received (-32700).
    ParseError,
    /// The JSON is not a valid request object (-32600).
    InvalidRequest,
    /// The method does not exist or is not available (-32601).
    MethodNotFound,
    /// Invalid method parameters (-32602).
    InvalidParams,
    /// Internal JSON-RPC error (-32603).
    InternalError,
    /// An application-defined error code.
    Other(i32),
}

impl ErrorCode {
    /// Returns the numeric wire value of this code.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            ErrorCode::ParseError => -32700,
            ErrorCode::InvalidRequest => -32600,
            ErrorCode::MethodNotFound => -32601,
            ErrorCode::InvalidParams => -32602,
            ErrorCode::InternalError => -32603,
            ErrorCode::Other(code) => code,
        }
    }
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        match code {
            -32700 => ErrorCode::ParseError,
            -32600 => ErrorCode::InvalidRequest,
            -32601 => ErrorCode::MethodNotFound,
            -32602 => ErrorCode::InvalidParams,
            -32603 => ErrorCode::InternalError,
            other => ErrorCode::Other(other),
        }
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A protocol-level error.
///
/// Carries the same three fields as a wire error object and converts into
/// one via [`ErrorObject::from`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolError {
    /// Error code.
    pub code: ErrorCode,
    /// Short human-readable description.
    pub message: String,
    /// Additional error data, defined by the sender.
    pub data: Option<Value>,
}

impl ProtocolError {
    /// Creates an error with the given code and message.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Attaches additional error data.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Creates a PARSE_ERROR (-32700).
    #[must_use]
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParseError, message)
    }

    /// Creates an INVALID_REQUEST (-32600).
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Creates a METHOD_NOT_FOUND (-32601) for the given method name.
    #[must_use]
    pub fn method_not_found(method: impl AsRef<str>) -> Self {
        Self::new(
            ErrorCode::MethodNotFound,
            format!("method not found: {}", method.as_ref()),
        )
    }

    /// Creates an INVALID_PARAMS (-32602).
    #[must_use]
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParams, message)
    }

    /// Creates an INTERNAL_ERROR (-32603).
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for ProtocolError {}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_eof() {
            Self::parse_error(err.to_string())
        } else {
            Self::internal_error(err.to_string())
        }
    }
}

impl From<ProtocolError> for ErrorObject {
    fn from(err: ProtocolError) -> Self {
        Self {
            code: err.code.into(),
            message: err.message,
            data: err.data,
        }
    }
}
