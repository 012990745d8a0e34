//! JSON-RPC 2.0 message envelope.
//!
//! The envelope layer treats `params` and `result` as opaque JSON; typed
//! decoding of those regions is layered on top (see [`crate::params`] and
//! [`crate::messages`]).
//!
//! Decoding dispatches on structure rather than committing to a shape up
//! front: presence of `method` selects the request/notification branch
//! (split on `id`), otherwise exactly one of `result`/`error` selects the
//! response/error branch. Anything else is an INVALID_REQUEST.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProtocolError;

/// The JSON-RPC version literal carried by every message.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC request ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Integer ID.
    Number(i64),
    /// String ID.
    String(String),
}

impl From<i64> for RequestId {
    fn from(id: i64) -> Self {
        RequestId::Number(id)
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        RequestId::String(id)
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        RequestId::String(id.to_owned())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{n}"),
            RequestId::String(s) => write!(f, "{s}"),
        }
    }
}

/// A request that expects a response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcRequest {
    /// Protocol version (always "2.0").
    pub jsonrpc: String,
    /// Request ID.
    pub id: RequestId,
    /// Method name.
    pub method: String,
    /// Request parameters, opaque at this layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Creates a new request.
    #[must_use]
    pub fn new(id: impl Into<RequestId>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            id: id.into(),
            method: method.into(),
            params,
        }
    }
}

/// A notification, which never receives a response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcNotification {
    /// Protocol version (always "2.0").
    pub jsonrpc: String,
    /// Method name.
    pub method: String,
    /// Notification parameters, opaque at this layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcNotification {
    /// Creates a new notification.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            method: method.into(),
            params,
        }
    }
}

/// A successful response to a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcResponse {
    /// Protocol version (always "2.0").
    pub jsonrpc: String,
    /// ID of the request this answers.
    pub id: RequestId,
    /// Result payload; its concrete shape depends on the request.
    pub result: Value,
}

impl JsonRpcResponse {
    /// Creates a success response.
    #[must_use]
    pub fn success(id: impl Into<RequestId>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            id: id.into(),
            result,
        }
    }
}

/// The error member of an error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Error code.
    pub code: i32,
    /// Short description of the error.
    pub message: String,
    /// Additional error data, defined by the sender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// An error response to a request.
///
/// The ID is optional: a receiver that could not extract an ID from a
/// malformed request responds with a null ID.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcError {
    /// Protocol version (always "2.0").
    pub jsonrpc: String,
    /// ID of the request this answers, if it could be determined.
    pub id: Option<RequestId>,
    /// The error that occurred.
    pub error: ErrorObject,
}

impl JsonRpcError {
    /// Creates an error response.
    #[must_use]
    pub fn new(id: Option<RequestId>, error: impl Into<ErrorObject>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            id,
            error: error.into(),
        }
    }
}

/// A JSON-RPC message: exactly one of the four envelope shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JsonRpcMessage {
    /// A request expecting a response.
    Request(JsonRpcRequest),
    /// A notification.
    Notification(JsonRpcNotification),
    /// A successful response.
    Response(JsonRpcResponse),
    /// An error response.
    Error(JsonRpcError),
}

impl JsonRpcMessage {
    /// Decodes a message from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns an INVALID_REQUEST error if the value does not match exactly
    /// one of the four envelope shapes.
    pub fn from_value(value: Value) -> Result<Self, ProtocolError> {
        let Value::Object(obj) = value else {
            return Err(ProtocolError::invalid_request(
                "message must be a JSON object",
            ));
        };

        match obj.get("jsonrpc") {
            Some(Value::String(version)) if version == JSONRPC_VERSION => {}
            Some(_) => {
                return Err(ProtocolError::invalid_request(format!(
                    "jsonrpc version must be \"{JSONRPC_VERSION}\""
                )));
            }
            None => {
                return Err(ProtocolError::invalid_request("missing jsonrpc version"));
            }
        }

        let has_method = obj.contains_key("method");
        let has_result = obj.contains_key("result");
        let has_error = obj.contains_key("error");

        if has_method {
            if has_result || has_error {
                return Err(ProtocolError::invalid_request(
                    "message carries both method and result/error",
                ));
            }
            let method = match obj.get("method") {
                Some(Value::String(m)) if !m.is_empty() => m.clone(),
                _ => {
                    return Err(ProtocolError::invalid_request(
                        "method must be a non-empty string",
                    ));
                }
            };
            let params = obj.get("params").cloned();
            return match obj.get("id") {
                Some(id) => Ok(JsonRpcMessage::Request(JsonRpcRequest {
                    jsonrpc: JSONRPC_VERSION.to_owned(),
                    id: parse_request_id(id)?,
                    method,
                    params,
                })),
                None => Ok(JsonRpcMessage::Notification(JsonRpcNotification {
                    jsonrpc: JSONRPC_VERSION.to_owned(),
                    method,
                    params,
                })),
            };
        }

        match (has_result, has_error) {
            (true, true) => Err(ProtocolError::invalid_request(
                "response carries both result and error",
            )),
            (true, false) => {
                let id = match obj.get("id") {
                    Some(id) if !id.is_null() => parse_request_id(id)?,
                    _ => {
                        return Err(ProtocolError::invalid_request("response missing id"));
                    }
                };
                Ok(JsonRpcMessage::Response(JsonRpcResponse {
                    jsonrpc: JSONRPC_VERSION.to_owned(),
                    id,
                    result: obj.get("result").cloned().unwrap_or(Value::Null),
                }))
            }
            (false, true) => {
                let error: ErrorObject = serde_json::from_value(
                    obj.get("error").cloned().unwrap_or(Value::Null),
                )
                .map_err(|e| {
                    ProtocolError::invalid_request(format!("malformed error object: {e}"))
                })?;
                let id = match obj.get("id") {
                    None | Some(Value::Null) => None,
                    Some(id) => Some(parse_request_id(id)?),
                };
                Ok(JsonRpcMessage::Error(JsonRpcError {
                    jsonrpc: JSONRPC_VERSION.to_owned(),
                    id,
                    error,
                }))
            }
            (false, false) => Err(ProtocolError::invalid_request(
                "message matches no JSON-RPC shape",
            )),
        }
    }

    /// Serializes this message to a JSON value.
    pub fn to_value(&self) -> Result<Value, ProtocolError> {
        serde_json::to_value(self).map_err(ProtocolError::from)
    }

    /// Returns the method name for requests and notifications.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        match self {
            JsonRpcMessage::Request(req) => Some(&req.method),
            JsonRpcMessage::Notification(notif) => Some(&notif.method),
            _ => None,
        }
    }

    /// Returns the correlation ID, if this message shape carries one.
    #[must_use]
    pub fn id(&self) -> Option<&RequestId> {
        match self {
            JsonRpcMessage::Request(req) => Some(&req.id),
            JsonRpcMessage::Response(resp) => Some(&resp.id),
            JsonRpcMessage::Error(err) => err.id.as_ref(),
            JsonRpcMessage::Notification(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for JsonRpcMessage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        JsonRpcMessage::from_value(value).map_err(serde::de::Error::custom)
    }
}

fn parse_request_id(value: &Value) -> Result<RequestId, ProtocolError> {
    match value {
        Value::String(s) => Ok(RequestId::String(s.clone())),
        Value::Number(n) => n.as_i64().map(RequestId::Number).ok_or_else(|| {
            ProtocolError::invalid_request("id must be an integer or a string")
        }),
        _ => Err(ProtocolError::invalid_request(
            "id must be an integer or a string",
        )),
    }
}

/// Decodes one message from raw bytes.
///
/// # Errors
///
/// Malformed JSON is a PARSE_ERROR; syntactically valid JSON that matches
/// none of the four envelope shapes is an INVALID_REQUEST.
pub fn decode_message(bytes: &[u8]) -> Result<JsonRpcMessage, ProtocolError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| ProtocolError::parse_error(e.to_string()))?;
    JsonRpcMessage::from_value(value)
}

/// Encodes a message to raw bytes.
///
/// Emits exactly the fields applicable to the message's shape: no `id` on
/// notifications, never both `result` and `error`.
pub fn encode_message(message: &JsonRpcMessage) -> Result<Vec<u8>, ProtocolError> {
    serde_json::to_vec(message).map_err(ProtocolError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    fn decode(value: Value) -> Result<JsonRpcMessage, ProtocolError> {
        JsonRpcMessage::from_value(value)
    }

    #[test]
    fn decodes_request() {
        let msg = decode(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/list",
            "params": {"cursor": "abc"}
        }))
        .unwrap();
        let JsonRpcMessage::Request(req) = msg else {
            panic!("expected request");
        };
        assert_eq!(req.id, RequestId::Number(1));
        assert_eq!(req.method, "tools/list");
        assert_eq!(req.params, Some(json!({"cursor": "abc"})));
    }

    #[test]
    fn decodes_notification() {
        let msg = decode(json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized"
        }))
        .unwrap();
        assert!(matches!(msg, JsonRpcMessage::Notification(_)));
        assert_eq!(msg.method(), Some("notifications/initialized"));
        assert!(msg.id().is_none());
    }

    #[test]
    fn decodes_response() {
        let msg = decode(json!({
            "jsonrpc": "2.0",
            "id": "req-7",
            "result": {}
        }))
        .unwrap();
        let JsonRpcMessage::Response(resp) = msg else {
            panic!("expected response");
        };
        assert_eq!(resp.id, RequestId::String("req-7".to_owned()));
        assert_eq!(resp.result, json!({}));
    }

    #[test]
    fn decodes_error_with_null_id() {
        let msg = decode(json!({
            "jsonrpc": "2.0",
            "id": null,
            "error": {"code": -32700, "message": "parse error"}
        }))
        .unwrap();
        let JsonRpcMessage::Error(err) = msg else {
            panic!("expected error");
        };
        assert!(err.id.is_none());
        assert_eq!(err.error.code, -32700);
    }

    #[test]
    fn rejects_result_and_error_together() {
        let err = decode(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {},
            "error": {"code": -32600, "message": "x"}
        }))
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[test]
    fn rejects_method_and_error_together() {
        let err = decode(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "ping",
            "error": {"code": -32600, "message": "x"}
        }))
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[test]
    fn rejects_missing_and_mismatched_version() {
        let err = decode(json!({"id": 1, "method": "ping"})).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);

        let err = decode(json!({"jsonrpc": "1.0", "id": 1, "method": "ping"})).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[test]
    fn rejects_empty_method() {
        let err = decode(json!({"jsonrpc": "2.0", "id": 1, "method": ""})).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[test]
    fn rejects_response_without_id() {
        let err = decode(json!({"jsonrpc": "2.0", "result": {}})).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[test]
    fn rejects_non_object_message() {
        let err = decode(json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[test]
    fn rejects_shapeless_object() {
        let err = decode(json!({"jsonrpc": "2.0", "id": 1})).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = decode_message(b"{not json").unwrap_err();
        assert_eq!(err.code, ErrorCode::ParseError);
    }

    #[test]
    fn notification_never_encodes_id() {
        let notif = JsonRpcNotification::new("notifications/progress", None);
        let value = serde_json::to_value(&notif).unwrap();
        assert!(value.get("id").is_none());
        assert!(value.get("params").is_none());
    }

    #[test]
    fn error_response_encodes_null_id() {
        let err = JsonRpcError::new(
            None,
            ErrorObject {
                code: -32700,
                message: "parse error".to_owned(),
                data: None,
            },
        );
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["id"], Value::Null);
        assert!(value["error"].get("data").is_none());
    }

    #[test]
    fn decode_encode_decode_is_fixed_point() {
        let inputs = [
            json!({"jsonrpc": "2.0", "id": 1, "method": "ping"}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized", "params": {"_meta": {"x": 1}}}),
            json!({"jsonrpc": "2.0", "id": "a", "result": {"ok": true}}),
            json!({"jsonrpc": "2.0", "id": 2, "error": {"code": -32601, "message": "nope", "data": [1]}}),
        ];
        for input in inputs {
            let first = JsonRpcMessage::from_value(input).unwrap();
            let encoded = encode_message(&first).unwrap();
            let second = decode_message(&encoded).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn request_id_conversions_and_display() {
        assert_eq!(RequestId::from(5), RequestId::Number(5));
        assert_eq!(RequestId::from("a"), RequestId::String("a".to_owned()));
        assert_eq!(RequestId::Number(5).to_string(), "5");
        assert_eq!(RequestId::String("a".to_owned()).to_string(), "a");
    }

    #[test]
    fn deserialize_impl_delegates_to_structural_dispatch() {
        let msg: JsonRpcMessage =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#).unwrap();
        assert!(matches!(msg, JsonRpcMessage::Request(_)));

        let result =
            serde_json::from_str::<JsonRpcMessage>(r#"{"jsonrpc":"2.0","id":1}"#);
        assert!(result.is_err());
    }
}
