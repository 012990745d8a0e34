//! Message content and reference unions.
//!
//! Content values carry a `type` discriminator and form an open set: a
//! decoder must handle variants it has never heard of, because content
//! frequently passes through intermediaries (proxies, loggers) that do not
//! understand every kind. Unrecognized variants are preserved verbatim as
//! [`Content::Unknown`] instead of being rejected or dropped, and re-encode
//! byte-for-byte (up to key order).
//!
//! Resource contents use field presence instead of a tag: a `text` field
//! selects the text variant, `blob` the binary one. Both or neither is a
//! decode error.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role of a message participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User role.
    User,
    /// Assistant role.
    Assistant,
}

/// Optional annotations shared by all content variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotations {
    /// Intended audience, in priority order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audience: Vec<Role>,
    /// Importance from 0 (optional) to 1 (effectively required).
    ///
    /// The range is not enforced here; out-of-range values are accepted on
    /// decode and left to the embedding application's policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
}

/// Text provided to or from an LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    /// The text content of the message.
    pub text: String,
    /// Optional annotations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
}

/// An image provided to or from an LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageContent {
    /// Base64-encoded image data.
    pub data: String,
    /// MIME type of the image (e.g. "image/png").
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    /// Optional annotations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
}

/// Resource contents embedded in a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedResource {
    /// The embedded resource contents.
    pub resource: ResourceContents,
    /// Optional annotations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
}

/// A content value, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Text content (`type: "text"`).
    Text(TextContent),
    /// Image content (`type: "image"`).
    Image(ImageContent),
    /// Embedded resource content (`type: "resource"`).
    Resource(EmbeddedResource),
    /// A variant this implementation does not recognize, preserved verbatim
    /// for pass-through.
    Unknown(Value),
}

impl Content {
    /// Creates text content.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text(TextContent {
            text: text.into(),
            annotations: None,
        })
    }

    /// Creates image content.
    #[must_use]
    pub fn image(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Content::Image(ImageContent {
            data: data.into(),
            mime_type: mime_type.into(),
            annotations: None,
        })
    }

    /// Returns the text if this is text content.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(c) => Some(&c.text),
            _ => None,
        }
    }
}

impl Serialize for Content {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Content::Text(c) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "text")?;
                map.serialize_entry("text", &c.text)?;
                if let Some(annotations) = &c.annotations {
                    map.serialize_entry("annotations", annotations)?;
                }
                map.end()
            }
            Content::Image(c) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "image")?;
                map.serialize_entry("data", &c.data)?;
                map.serialize_entry("mimeType", &c.mime_type)?;
                if let Some(annotations) = &c.annotations {
                    map.serialize_entry("annotations", annotations)?;
                }
                map.end()
            }
            Content::Resource(c) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "resource")?;
                map.serialize_entry("resource", &c.resource)?;
                if let Some(annotations) = &c.annotations {
                    map.serialize_entry("annotations", annotations)?;
                }
                map.end()
            }
            Content::Unknown(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let tag = value.get("type").and_then(Value::as_str).map(str::to_owned);
        match tag.as_deref() {
            Some("text") => serde_json::from_value(value)
                .map(Content::Text)
                .map_err(serde::de::Error::custom),
            Some("image") => serde_json::from_value(value)
                .map(Content::Image)
                .map_err(serde::de::Error::custom),
            Some("resource") => serde_json::from_value(value)
                .map(Content::Resource)
                .map_err(serde::de::Error::custom),
            tag => {
                if let Some(tag) = tag {
                    log::debug!("preserving unknown content variant: {tag}");
                }
                Ok(Content::Unknown(value))
            }
        }
    }
}

/// Text contents of a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextResourceContents {
    /// The URI of this resource.
    pub uri: String,
    /// The MIME type of this resource, if known.
    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// The text of the item.
    pub text: String,
}

/// Binary contents of a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobResourceContents {
    /// The URI of this resource.
    pub uri: String,
    /// The MIME type of this resource, if known.
    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Base64-encoded binary data of the item.
    pub blob: String,
}

/// The contents of a resource, either textual or binary.
///
/// Disambiguated by which of `text`/`blob` is present rather than by a
/// discriminator tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResourceContents {
    /// Textual contents.
    Text(TextResourceContents),
    /// Binary contents.
    Blob(BlobResourceContents),
}

impl ResourceContents {
    /// Returns the resource URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        match self {
            ResourceContents::Text(c) => &c.uri,
            ResourceContents::Blob(c) => &c.uri,
        }
    }

    /// Returns the MIME type, if known.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        match self {
            ResourceContents::Text(c) => c.mime_type.as_deref(),
            ResourceContents::Blob(c) => c.mime_type.as_deref(),
        }
    }
}

impl<'de> Deserialize<'de> for ResourceContents {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let has_text = value.get("text").is_some();
        let has_blob = value.get("blob").is_some();
        match (has_text, has_blob) {
            (true, true) => Err(serde::de::Error::custom(
                "resource contents carries both text and blob",
            )),
            (false, false) => Err(serde::de::Error::custom(
                "resource contents carries neither text nor blob",
            )),
            (true, false) => serde_json::from_value(value)
                .map(ResourceContents::Text)
                .map_err(serde::de::Error::custom),
            (false, true) => serde_json::from_value(value)
                .map(ResourceContents::Blob)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// Reference to a prompt, for completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptReference {
    /// The name of the prompt or prompt template.
    pub name: String,
}

/// Reference to a resource or resource template, for completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceReference {
    /// The URI or URI template of the resource.
    pub uri: String,
}

/// A completion reference, discriminated by its `type` field.
///
/// Open like [`Content`]: unrecognized reference kinds are preserved
/// verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    /// A prompt reference (`type: "ref/prompt"`).
    Prompt(PromptReference),
    /// A resource reference (`type: "ref/resource"`).
    Resource(ResourceReference),
    /// A variant this implementation does not recognize.
    Unknown(Value),
}

impl Serialize for Reference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Reference::Prompt(r) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "ref/prompt")?;
                map.serialize_entry("name", &r.name)?;
                map.end()
            }
            Reference::Resource(r) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "ref/resource")?;
                map.serialize_entry("uri", &r.uri)?;
                map.end()
            }
            Reference::Unknown(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let tag = value.get("type").and_then(Value::as_str).map(str::to_owned);
        match tag.as_deref() {
            Some("ref/prompt") => serde_json::from_value(value)
                .map(Reference::Prompt)
                .map_err(serde::de::Error::custom),
            Some("ref/resource") => serde_json::from_value(value)
                .map(Reference::Resource)
                .map_err(serde::de::Error::custom),
            _ => Ok(Reference::Unknown(value)),
        }
    }
}
