//! Extensible params container.
//!
//! Every params (and result) object in the protocol reserves the `_meta`
//! key for protocol metadata while leaving all other keys open to vendor
//! extension. [`Params`] partitions the two on decode and reassembles them
//! on encode, preserving the additional fields verbatim. This is the single
//! forward-compatibility mechanism of the protocol; method-specific schemas
//! in [`crate::messages`] are layered over the same wire objects.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ProtocolError;

/// Progress token used to correlate progress notifications with requests.
///
/// Tokens can be either strings or integers. The token is opaque to the
/// receiver, which is not obligated to honor it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProgressToken {
    /// String progress token.
    String(String),
    /// Integer progress token.
    Number(i64),
}

impl From<String> for ProgressToken {
    fn from(s: String) -> Self {
        ProgressToken::String(s)
    }
}

impl From<&str> for ProgressToken {
    fn from(s: &str) -> Self {
        ProgressToken::String(s.to_owned())
    }
}

impl From<i64> for ProgressToken {
    fn from(n: i64) -> Self {
        ProgressToken::Number(n)
    }
}

impl std::fmt::Display for ProgressToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressToken::String(s) => write!(f, "{s}"),
            ProgressToken::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Typed view of the reserved `_meta` block on requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestMeta {
    /// Progress token for receiving out-of-band progress notifications.
    #[serde(rename = "progressToken", skip_serializing_if = "Option::is_none")]
    pub progress_token: Option<ProgressToken>,
}

/// A params or result object split into reserved metadata and open fields.
///
/// Decoding iterates the source object once: the `_meta` key lands in
/// [`Params::meta`], everything else in [`Params::extra`] with nested
/// structure, numeric types, and array ordering untouched. Encoding emits
/// `_meta` only when non-empty (receivers may treat its presence as a
/// signal), then every additional field.
///
/// The reserved key always wins: an additional field literally named
/// `_meta` is discarded on encode, so round-trip is only guaranteed when
/// [`Params::extra`] has no such key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    /// Reserved protocol metadata from the `_meta` key.
    pub meta: Map<String, Value>,
    /// All other fields, preserved verbatim.
    pub extra: Map<String, Value>,
}

impl Params {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if both the metadata and additional fields are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meta.is_empty() && self.extra.is_empty()
    }

    /// Adds an additional field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Adds a reserved metadata entry.
    #[must_use]
    pub fn with_meta_entry(mut self, key: impl Into<String>, value: Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }

    /// Attaches a progress token to the reserved metadata.
    #[must_use]
    pub fn with_progress_token(mut self, token: impl Into<ProgressToken>) -> Self {
        let token = match token.into() {
            ProgressToken::String(s) => Value::String(s),
            ProgressToken::Number(n) => Value::from(n),
        };
        self.meta.insert("progressToken".to_owned(), token);
        self
    }

    /// Returns the progress token from the reserved metadata, if present
    /// and well-formed.
    #[must_use]
    pub fn progress_token(&self) -> Option<ProgressToken> {
        let token = self.meta.get("progressToken")?;
        serde_json::from_value(token.clone()).ok()
    }

    /// Decodes a container from a params JSON value.
    ///
    /// # Errors
    ///
    /// Returns an INVALID_PARAMS error if the value is not an object.
    pub fn from_value(value: Value) -> Result<Self, ProtocolError> {
        serde_json::from_value(value)
            .map_err(|e| ProtocolError::invalid_params(format!("params must be an object: {e}")))
    }

    /// Encodes the container back to a single flat JSON object.
    pub fn to_value(&self) -> Result<Value, ProtocolError> {
        serde_json::to_value(self).map_err(ProtocolError::from)
    }
}

/// Decodes a request's opaque params region into a method-specific schema.
///
/// Absent params decode as an empty object, so schemas with only optional
/// fields accept requests that omit params entirely.
///
/// # Errors
///
/// Returns an INVALID_PARAMS error when a required field is missing or has
/// the wrong type for the schema.
pub fn parse_params<T>(params: Option<&Value>) -> Result<T, ProtocolError>
where
    T: serde::de::DeserializeOwned,
{
    let value = match params {
        Some(value) => value.clone(),
        None => Value::Object(Map::new()),
    };
    serde_json::from_value(value).map_err(|e| ProtocolError::invalid_params(e.to_string()))
}

impl Serialize for Params {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if !self.meta.is_empty() {
            map.serialize_entry("_meta", &self.meta)?;
        }
        for (key, value) in &self.extra {
            if key == "_meta" {
                // Reserved key wins; the colliding additional field is lost.
                log::warn!("discarding additional params field named _meta");
                continue;
            }
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Params {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let source = Map::<String, Value>::deserialize(deserializer)?;
        let mut params = Params::default();
        for (key, value) in source {
            if key == "_meta" {
                // A non-object _meta value is ignored rather than rejected.
                if let Value::Object(meta) = value {
                    params.meta = meta;
                }
            } else {
                params.extra.insert(key, value);
            }
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    #[test]
    fn decode_partitions_meta_from_additional_fields() {
        let params = Params::from_value(json!({
            "_meta": {"progressToken": "abc"},
            "foo": 1,
            "bar": [1, 2, 3]
        }))
        .unwrap();
        assert_eq!(params.meta.get("progressToken"), Some(&json!("abc")));
        assert_eq!(params.extra.get("foo"), Some(&json!(1)));
        assert_eq!(params.extra.get("bar"), Some(&json!([1, 2, 3])));
    }

    #[test]
    fn round_trip_reproduces_original_object() {
        let original = json!({
            "_meta": {"progressToken": "abc"},
            "foo": 1,
            "bar": [1, 2, 3],
            "nested": {"deep": {"x": 1.5}}
        });
        let params = Params::from_value(original.clone()).unwrap();
        assert_eq!(params.to_value().unwrap(), original);
    }

    #[test]
    fn empty_meta_is_omitted_on_encode() {
        let params = Params::new().with_field("foo", json!(1));
        let value = params.to_value().unwrap();
        assert_eq!(value, json!({"foo": 1}));
        assert!(value.get("_meta").is_none());
    }

    #[test]
    fn reserved_key_wins_over_colliding_additional_field() {
        // Round-trip loss here is intended protocol behavior.
        let mut params = Params::new().with_meta_entry("a", json!(1));
        params.extra.insert("_meta".to_owned(), json!({"b": 2}));
        params.extra.insert("other".to_owned(), json!(true));

        let value = params.to_value().unwrap();
        assert_eq!(value, json!({"_meta": {"a": 1}, "other": true}));

        let reparsed = Params::from_value(value).unwrap();
        assert_eq!(reparsed.meta.get("a"), Some(&json!(1)));
        assert!(!reparsed.extra.contains_key("_meta"));
    }

    #[test]
    fn non_object_meta_is_ignored() {
        let params = Params::from_value(json!({"_meta": 42, "foo": 1})).unwrap();
        assert!(params.meta.is_empty());
        assert_eq!(params.extra.get("foo"), Some(&json!(1)));
    }

    #[test]
    fn non_object_params_is_invalid() {
        let err = Params::from_value(json!([1, 2])).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParams);
    }

    #[test]
    fn progress_token_accessors() {
        let params = Params::new().with_progress_token("tok");
        assert_eq!(params.progress_token(), Some(ProgressToken::from("tok")));

        let params = Params::new().with_progress_token(7);
        assert_eq!(params.progress_token(), Some(ProgressToken::Number(7)));

        assert_eq!(Params::new().progress_token(), None);
    }

    #[test]
    fn request_meta_wire_names() {
        let meta = RequestMeta {
            progress_token: Some(ProgressToken::from("abc")),
        };
        assert_eq!(
            serde_json::to_value(&meta).unwrap(),
            json!({"progressToken": "abc"})
        );

        let meta: RequestMeta = serde_json::from_value(json!({})).unwrap();
        assert!(meta.progress_token.is_none());
    }

    #[test]
    fn parse_params_classifies_schema_violations() {
        use crate::messages::{ListToolsParams, SetLevelParams};

        let err = parse_params::<SetLevelParams>(Some(&json!({"level": 5}))).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParams);

        let err = parse_params::<SetLevelParams>(None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParams);

        let params: ListToolsParams = parse_params(None).unwrap();
        assert!(params.cursor.is_none());
    }

    #[test]
    fn progress_token_display() {
        assert_eq!(ProgressToken::from("abc").to_string(), "abc");
        assert_eq!(ProgressToken::from(12).to_string(), "12");
    }
}
