//! Capability negotiation descriptors.
//!
//! Known capabilities have fixed shapes, but the capability set itself is
//! open: either side can declare additional capabilities, which round-trip
//! untouched through the `experimental` bucket or as unknown sibling keys.
//! Presence of a sub-capability (even as an empty object) signals support;
//! nested flags default to false when omitted. These descriptors carry no
//! behavior; reconciling the two declarations is the handshake's job.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Capabilities a client may support.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientCapabilities {
    /// Experimental, non-standard capabilities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental: Option<Map<String, Value>>,
    /// Present if the client supports listing filesystem roots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roots: Option<RootsCapability>,
    /// Present if the client supports sampling from an LLM.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling: Option<SamplingCapability>,
    /// Capabilities this implementation does not recognize, preserved
    /// verbatim.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Capabilities a server may support.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerCapabilities {
    /// Experimental, non-standard capabilities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental: Option<Map<String, Value>>,
    /// Present if the server can send log messages to the client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingCapability>,
    /// Present if the server offers prompt templates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompts: Option<PromptsCapability>,
    /// Present if the server offers readable resources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourcesCapability>,
    /// Present if the server offers callable tools.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
    /// Capabilities this implementation does not recognize, preserved
    /// verbatim.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Roots capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootsCapability {
    /// Whether the client notifies on changes to the roots list.
    #[serde(
        rename = "listChanged",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub list_changed: bool,
}

/// Sampling capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplingCapability {}

/// Logging capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingCapability {}

/// Prompts capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptsCapability {
    /// Whether the server notifies on changes to the prompt list.
    #[serde(
        rename = "listChanged",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub list_changed: bool,
}

/// Resources capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourcesCapability {
    /// Whether the server supports resource update subscriptions.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub subscribe: bool,
    /// Whether the server notifies on changes to the resource list.
    #[serde(
        rename = "listChanged",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub list_changed: bool,
}

/// Tools capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolsCapability {
    /// Whether the server notifies on changes to the tool list.
    #[serde(
        rename = "listChanged",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub list_changed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_and_unknown_capabilities_round_trip() {
        let input = json!({
            "tools": {"listChanged": true},
            "fooBar": {"x": 1}
        });
        let caps: ServerCapabilities = serde_json::from_value(input.clone()).unwrap();
        assert!(caps.tools.as_ref().unwrap().list_changed);
        assert_eq!(caps.other.get("fooBar"), Some(&json!({"x": 1})));
        assert_eq!(serde_json::to_value(&caps).unwrap(), input);
    }

    #[test]
    fn absent_sub_capability_means_no_support() {
        let caps: ServerCapabilities = serde_json::from_value(json!({})).unwrap();
        assert!(caps.tools.is_none());
        assert!(caps.resources.is_none());
        assert_eq!(serde_json::to_value(&caps).unwrap(), json!({}));
    }

    #[test]
    fn empty_sub_capability_signals_support() {
        let caps: ServerCapabilities =
            serde_json::from_value(json!({"logging": {}, "prompts": {}})).unwrap();
        assert!(caps.logging.is_some());
        let prompts = caps.prompts.unwrap();
        assert!(!prompts.list_changed);
    }

    #[test]
    fn false_flags_are_omitted_on_encode() {
        let caps = ServerCapabilities {
            resources: Some(ResourcesCapability {
                subscribe: true,
                list_changed: false,
            }),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&caps).unwrap(),
            json!({"resources": {"subscribe": true}})
        );
    }

    #[test]
    fn experimental_bucket_round_trips() {
        let input = json!({
            "experimental": {"vendorFeature": {"enabled": true}},
            "sampling": {}
        });
        let caps: ClientCapabilities = serde_json::from_value(input.clone()).unwrap();
        assert!(caps.sampling.is_some());
        assert_eq!(
            caps.experimental.as_ref().unwrap().get("vendorFeature"),
            Some(&json!({"enabled": true}))
        );
        assert_eq!(serde_json::to_value(&caps).unwrap(), input);
    }

    #[test]
    fn client_unknown_sibling_keys_round_trip() {
        let input = json!({
            "roots": {"listChanged": true},
            "elicitation": {}
        });
        let caps: ClientCapabilities = serde_json::from_value(input.clone()).unwrap();
        assert!(caps.roots.as_ref().unwrap().list_changed);
        assert_eq!(caps.other.get("elicitation"), Some(&json!({})));
        assert_eq!(serde_json::to_value(&caps).unwrap(), input);
    }
}
