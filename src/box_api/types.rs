//! Request and response payloads for the Box endpoints we call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// OAuth2 grant type for the JWT-bearer exchange.
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Attributes requested from `GET /files/{id}`.
pub const FILE_INFO_FIELDS: &str =
    "id,name,size,type,created_at,modified_at,description,parent,path_collection,shared_link";

/// Form body for `POST /oauth2/token`.
#[derive(Serialize)]
pub struct TokenRequest<'a> {
    pub grant_type: &'a str,
    pub assertion: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

/// Successful token endpoint response.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub restricted_to: Option<Value>,
    #[serde(default)]
    pub issued_token_type: Option<String>,
}

/// Reference to a file in an AI request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRef {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl ItemRef {
    pub fn file(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: "file",
        }
    }
}

/// Body for `POST /ai/extract`.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractRequest {
    pub prompt: String,
    pub items: Vec<ItemRef>,
}

impl ExtractRequest {
    /// Freeform extraction over one file. A requested output format is
    /// appended to the prompt as an instruction, since the endpoint has no
    /// separate format parameter.
    pub fn new(file_id: &str, prompt: &str, format: Option<&str>) -> Self {
        let prompt = match format.map(str::trim).filter(|f| !f.is_empty()) {
            Some(format) => format!("{}\n\nReturn the result formatted as {}.", prompt, format),
            None => prompt.to_string(),
        };
        Self {
            prompt,
            items: vec![ItemRef::file(file_id)],
        }
    }
}

/// One option of an enum / multiSelect field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub key: String,
}

/// A field the structured extractor should fill in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub key: String,
    /// `string`, `float`, `date`, `enum` or `multiSelect`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
}

/// Reference to an enterprise metadata template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataTemplateRef {
    pub template_key: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub scope: &'static str,
}

impl MetadataTemplateRef {
    pub fn enterprise(template_key: impl Into<String>) -> Self {
        Self {
            template_key: template_key.into(),
            kind: "metadata_template",
            scope: "enterprise",
        }
    }
}

/// Body for `POST /ai/extract_structured`.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractStructuredRequest {
    pub items: Vec<ItemRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_template: Option<MetadataTemplateRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldDefinition>>,
}

impl ExtractStructuredRequest {
    /// A template id, when present, wins over explicit field definitions.
    pub fn new(file_id: &str, fields: Option<Vec<FieldDefinition>>, template_id: Option<&str>) -> Self {
        let (metadata_template, fields) = match template_id {
            Some(key) => (Some(MetadataTemplateRef::enterprise(key)), None),
            None => (None, fields),
        };
        Self {
            items: vec![ItemRef::file(file_id)],
            metadata_template,
            fields,
        }
    }
}

/// Folder reference as returned inside file objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathCollection {
    #[serde(default)]
    pub entries: Vec<FolderRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SharedLink {
    #[serde(default)]
    pub url: Option<String>,
}

/// The subset of Box's file object we read.
#[derive(Debug, Clone, Deserialize)]
pub struct BoxFile {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub modified_at: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent: Option<FolderRef>,
    #[serde(default)]
    pub path_collection: Option<PathCollection>,
    #[serde(default)]
    pub shared_link: Option<SharedLink>,
}

/// File attributes returned by `get-file-info`.
///
/// Every field is always present in the JSON output, `null` when Box did
/// not return it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub id: String,
    pub name: Option<String>,
    pub size: Option<u64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub created_at: Option<String>,
    pub modified_at: Option<String>,
    pub description: Option<String>,
    pub parent: Option<FolderRef>,
    pub path: Option<String>,
    pub shared_link: Option<String>,
}

impl From<BoxFile> for FileInfo {
    fn from(file: BoxFile) -> Self {
        let path = file.path_collection.as_ref().map(|collection| {
            let mut segments: Vec<&str> = collection
                .entries
                .iter()
                .map(|folder| folder.name.as_deref().unwrap_or(folder.id.as_str()))
                .collect();
            if let Some(name) = file.name.as_deref() {
                segments.push(name);
            }
            format!("/{}", segments.join("/"))
        });

        Self {
            id: file.id,
            name: file.name,
            size: file.size,
            kind: file.kind,
            created_at: file.created_at,
            modified_at: file.modified_at,
            description: file.description,
            parent: file.parent,
            path,
            shared_link: file.shared_link.and_then(|link| link.url),
        }
    }
}
