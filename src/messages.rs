//! Method params and result types.
//!
//! One params/result struct pair per protocol method. These are flat schema
//! declarations; the generic [`crate::params::Params`] container remains
//! available for methods whose params need open extension.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::capabilities::{ClientCapabilities, ServerCapabilities};
use crate::content::{Content, Reference, ResourceContents, Role};
use crate::jsonrpc::RequestId;
use crate::params::{ProgressToken, RequestMeta};
use crate::types::{
    Cursor, Implementation, LoggingLevel, ModelPreferences, Prompt, Resource, ResourceTemplate,
    Root, Tool,
};

/// Method name constants for every protocol operation.
pub mod methods {
    /// initialize request.
    pub const INITIALIZE: &str = "initialize";
    /// initialized notification.
    pub const INITIALIZED: &str = "notifications/initialized";
    /// ping request.
    pub const PING: &str = "ping";
    /// cancelled notification.
    pub const CANCELLED: &str = "notifications/cancelled";
    /// progress notification.
    pub const PROGRESS: &str = "notifications/progress";
    /// resources/list request.
    pub const RESOURCES_LIST: &str = "resources/list";
    /// resources/templates/list request.
    pub const RESOURCE_TEMPLATES_LIST: &str = "resources/templates/list";
    /// resources/read request.
    pub const RESOURCES_READ: &str = "resources/read";
    /// resources/subscribe request.
    pub const RESOURCES_SUBSCRIBE: &str = "resources/subscribe";
    /// resources/unsubscribe request.
    pub const RESOURCES_UNSUBSCRIBE: &str = "resources/unsubscribe";
    /// resource list changed notification.
    pub const RESOURCES_LIST_CHANGED: &str = "notifications/resources/list_changed";
    /// resource updated notification.
    pub const RESOURCES_UPDATED: &str = "notifications/resources/updated";
    /// prompts/list request.
    pub const PROMPTS_LIST: &str = "prompts/list";
    /// prompts/get request.
    pub const PROMPTS_GET: &str = "prompts/get";
    /// prompt list changed notification.
    pub const PROMPTS_LIST_CHANGED: &str = "notifications/prompts/list_changed";
    /// tools/list request.
    pub const TOOLS_LIST: &str = "tools/list";
    /// tools/call request.
    pub const TOOLS_CALL: &str = "tools/call";
    /// tool list changed notification.
    pub const TOOLS_LIST_CHANGED: &str = "notifications/tools/list_changed";
    /// logging/setLevel request.
    pub const LOGGING_SET_LEVEL: &str = "logging/setLevel";
    /// log message notification.
    pub const LOGGING_MESSAGE: &str = "notifications/message";
    /// sampling/createMessage request.
    pub const SAMPLING_CREATE_MESSAGE: &str = "sampling/createMessage";
    /// completion/complete request.
    pub const COMPLETION_COMPLETE: &str = "completion/complete";
    /// roots/list request.
    pub const ROOTS_LIST: &str = "roots/list";
    /// roots list changed notification.
    pub const ROOTS_LIST_CHANGED: &str = "notifications/roots/list_changed";
}

// ============================================================================
// Initialization
// ============================================================================

/// initialize request params.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitializeParams {
    /// The latest protocol version the client supports.
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Client capabilities.
    pub capabilities: ClientCapabilities,
    /// Client implementation info.
    #[serde(rename = "clientInfo")]
    pub client_info: Implementation,
}

/// initialize response result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitializeResult {
    /// The protocol version the server wants to use. If the client cannot
    /// support it, it must disconnect.
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server capabilities.
    pub capabilities: ServerCapabilities,
    /// Server implementation info.
    #[serde(rename = "serverInfo")]
    pub server_info: Implementation,
    /// Instructions describing how to use the server, usable as a model hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// A result that indicates success but carries no data beyond reserved
/// metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptyResult {
    /// Reserved protocol metadata.
    #[serde(rename = "_meta", default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
}

/// Cancelled notification params.
///
/// Sent by either side to cancel a previously-issued in-flight request.
/// Due to latency it may arrive after the request already finished; a
/// client must not cancel its own initialize request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelledParams {
    /// The ID of the request to cancel. Must correspond to a request
    /// previously issued in the same direction.
    #[serde(rename = "requestId")]
    pub request_id: RequestId,
    /// Optional reason for the cancellation, suitable for logging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Progress notification params, correlated to the originating request by
/// the token from its `_meta.progressToken`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressParams {
    /// The token given in the initial request.
    #[serde(rename = "progressToken")]
    pub progress_token: ProgressToken,
    /// Progress so far; should increase even if the total is unknown.
    pub progress: f64,
    /// Total expected progress, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    /// Optional message describing current status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProgressParams {
    /// Creates a progress notification.
    #[must_use]
    pub fn new(token: impl Into<ProgressToken>, progress: f64) -> Self {
        Self {
            progress_token: token.into(),
            progress,
            total: None,
            message: None,
        }
    }

    /// Sets the total for determinate progress.
    #[must_use]
    pub fn with_total(mut self, total: f64) -> Self {
        self.total = Some(total);
        self
    }

    /// Adds a status message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns progress as a fraction of the total, if the total is known.
    #[must_use]
    pub fn fraction(&self) -> Option<f64> {
        self.total
            .map(|t| if t > 0.0 { self.progress / t } else { 0.0 })
    }
}

// ============================================================================
// Resources
// ============================================================================

/// resources/list request params.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListResourcesParams {
    /// Pagination cursor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Cursor>,
}

/// resources/list response result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResourcesResult {
    /// Available resources.
    pub resources: Vec<Resource>,
    /// Cursor for the next page, if more results exist.
    #[serde(rename = "nextCursor", skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<Cursor>,
}

/// resources/templates/list request params.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListResourceTemplatesParams {
    /// Pagination cursor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Cursor>,
}

/// resources/templates/list response result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResourceTemplatesResult {
    /// Available resource templates.
    #[serde(rename = "resourceTemplates")]
    pub resource_templates: Vec<ResourceTemplate>,
    /// Cursor for the next page, if more results exist.
    #[serde(rename = "nextCursor", skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<Cursor>,
}

/// resources/read request params.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadResourceParams {
    /// The URI of the resource to read. Interpretation of the scheme is up
    /// to the server.
    pub uri: String,
    /// Arguments to pass to the resource handler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Map<String, Value>>,
    /// Reserved request metadata.
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RequestMeta>,
}

/// resources/read response result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadResourceResult {
    /// Contents of the resource or its sub-resources.
    pub contents: Vec<ResourceContents>,
}

/// resources/subscribe request params.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscribeParams {
    /// The URI of the resource to subscribe to.
    pub uri: String,
}

/// resources/unsubscribe request params.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsubscribeParams {
    /// The URI of the resource to unsubscribe from.
    pub uri: String,
}

/// Resource updated notification params. Only sent after a matching
/// subscribe request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUpdatedParams {
    /// The updated URI; may be a sub-resource of the subscription.
    pub uri: String,
}

// ============================================================================
// Prompts
// ============================================================================

/// prompts/list request params.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListPromptsParams {
    /// Pagination cursor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Cursor>,
}

/// prompts/list response result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPromptsResult {
    /// Available prompts.
    pub prompts: Vec<Prompt>,
    /// Cursor for the next page, if more results exist.
    #[serde(rename = "nextCursor", skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<Cursor>,
}

/// prompts/get request params.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetPromptParams {
    /// Prompt name.
    pub name: String,
    /// Arguments for the prompt template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<HashMap<String, String>>,
    /// Reserved request metadata.
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RequestMeta>,
}

/// prompts/get response result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetPromptResult {
    /// Optional prompt description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The rendered prompt messages.
    pub messages: Vec<PromptMessage>,
}

/// A message within a rendered prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMessage {
    /// Message role.
    pub role: Role,
    /// Message content.
    pub content: Content,
}

// ============================================================================
// Tools
// ============================================================================

/// tools/list request params.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListToolsParams {
    /// Pagination cursor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Cursor>,
}

/// tools/list response result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListToolsResult {
    /// Available tools.
    pub tools: Vec<Tool>,
    /// Cursor for the next page, if more results exist.
    #[serde(rename = "nextCursor", skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<Cursor>,
}

/// tools/call request params.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallToolParams {
    /// Tool name.
    pub name: String,
    /// Tool arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Value>,
    /// Reserved request metadata.
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RequestMeta>,
}

/// tools/call response result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallToolResult {
    /// Tool output content.
    pub content: Vec<Content>,
    /// Whether the tool call errored.
    #[serde(rename = "isError", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

// ============================================================================
// Logging
// ============================================================================

/// logging/setLevel request params. The server sends all messages at this
/// level and above as notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetLevelParams {
    /// Minimum level the client wants to receive.
    pub level: LoggingLevel,
}

/// Log message notification params.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMessageParams {
    /// Severity of this message.
    pub level: LoggingLevel,
    /// Optional name of the issuing logger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logger: Option<String>,
    /// The data to log; any JSON value.
    pub data: Value,
}

// ============================================================================
// Sampling
// ============================================================================

/// A message issued to or received from an LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingMessage {
    /// Message role.
    pub role: Role,
    /// Message content.
    pub content: Content,
}

impl SamplingMessage {
    /// Creates a user text message.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Content::text(text),
        }
    }

    /// Creates an assistant text message.
    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Content::text(text),
        }
    }
}

/// Context inclusion mode for sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IncludeContext {
    /// Include no external context.
    None,
    /// Include context from the requesting server only.
    ThisServer,
    /// Include context from all connected servers.
    AllServers,
}

/// sampling/createMessage request params, sent from server to client to
/// request an LLM completion. The client has full discretion over model
/// choice and should keep a human in the loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMessageParams {
    /// Conversation messages.
    pub messages: Vec<SamplingMessage>,
    /// Maximum tokens to generate.
    #[serde(rename = "maxTokens")]
    pub max_tokens: u32,
    /// Optional system prompt.
    #[serde(rename = "systemPrompt", skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Sequences that end generation.
    #[serde(
        rename = "stopSequences",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub stop_sequences: Vec<String>,
    /// Model selection preferences.
    #[serde(rename = "modelPreferences", skip_serializing_if = "Option::is_none")]
    pub model_preferences: Option<ModelPreferences>,
    /// How much connected-server context to include.
    #[serde(rename = "includeContext", skip_serializing_if = "Option::is_none")]
    pub include_context: Option<IncludeContext>,
    /// Provider-specific metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    /// Reserved request metadata.
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RequestMeta>,
}

impl CreateMessageParams {
    /// Creates a sampling request with default settings.
    #[must_use]
    pub fn new(messages: Vec<SamplingMessage>, max_tokens: u32) -> Self {
        Self {
            messages,
            max_tokens,
            system_prompt: None,
            temperature: None,
            stop_sequences: Vec::new(),
            model_preferences: None,
            include_context: None,
            metadata: None,
            meta: None,
        }
    }

    /// Sets the system prompt.
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the stop sequences.
    #[must_use]
    pub fn with_stop_sequences(mut self, sequences: Vec<String>) -> Self {
        self.stop_sequences = sequences;
        self
    }
}

/// sampling/createMessage response result, returned by the client with the
/// completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMessageResult {
    /// Role of the generated message.
    pub role: Role,
    /// Generated content.
    pub content: Content,
    /// Name of the model that generated the message.
    pub model: String,
    /// Why sampling stopped, if known.
    #[serde(rename = "stopReason", skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
}

impl CreateMessageResult {
    /// Creates a text completion result.
    #[must_use]
    pub fn text(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Content::text(text),
            model: model.into(),
            stop_reason: Some("endTurn".to_owned()),
        }
    }

    /// Returns the text content if this is a text completion.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        self.content.as_text()
    }
}

// ============================================================================
// Completion
// ============================================================================

/// The argument being completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteArgument {
    /// Argument name.
    pub name: String,
    /// Current argument value, used for completion matching.
    pub value: String,
}

/// completion/complete request params.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteParams {
    /// What the completion is for.
    #[serde(rename = "ref")]
    pub reference: Reference,
    /// The argument being completed.
    pub argument: CompleteArgument,
}

/// The completion values within a [`CompleteResult`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    /// Completion values; at most 100 items.
    pub values: Vec<String>,
    /// Total number of options available, which can exceed the values sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Whether more options exist beyond those returned.
    #[serde(rename = "hasMore", default, skip_serializing_if = "std::ops::Not::not")]
    pub has_more: bool,
}

/// completion/complete response result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteResult {
    /// Completion options.
    pub completion: Completion,
}

// ============================================================================
// Roots
// ============================================================================

/// roots/list response result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListRootsResult {
    /// Roots the server can operate on.
    pub roots: Vec<Root>,
}
