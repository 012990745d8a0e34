//! MCP message schema and JSON-RPC wire encoding.
//!
//! This crate provides:
//! - The four JSON-RPC 2.0 envelope shapes with structural-dispatch decoding
//! - The extensible `_meta`/additional-fields params container
//! - Open discriminated unions for message content, resource contents, and
//!   completion references, with verbatim preservation of unknown variants
//! - Client/server capability descriptors with lossless round-trip of
//!   unknown capabilities
//! - Typed params/result schemas for every protocol method
//!
//! # Wire Format
//!
//! Each message is a UTF-8 JSON object carrying the `jsonrpc: "2.0"`
//! literal. Framing (how byte boundaries between messages are established),
//! method dispatch, and request/response correlation bookkeeping belong to
//! the embedding transport and dispatcher, not this crate.
//!
//! All decode and encode operations are pure, synchronous, and stateless;
//! concurrent use requires no coordination.

#![forbid(unsafe_code)]

mod capabilities;
mod content;
mod error;
mod jsonrpc;
mod messages;
mod params;
mod types;

pub use capabilities::{
    ClientCapabilities, LoggingCapability, PromptsCapability, ResourcesCapability,
    RootsCapability, SamplingCapability, ServerCapabilities, ToolsCapability,
};
pub use content::{
    Annotations, BlobResourceContents, Content, EmbeddedResource, ImageContent, PromptReference,
    Reference, ResourceContents, ResourceReference, Role, TextContent, TextResourceContents,
};
pub use error::{ErrorCode, ProtocolError};
pub use jsonrpc::{
    ErrorObject, JSONRPC_VERSION, JsonRpcError, JsonRpcMessage, JsonRpcNotification,
    JsonRpcRequest, JsonRpcResponse, RequestId, decode_message, encode_message,
};
pub use messages::*;
pub use params::{Params, ProgressToken, RequestMeta, parse_params};
pub use types::*;
