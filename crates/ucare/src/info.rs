//! Server metadata records.
//!
//! Fields the handles act on are typed; everything else the server sends is
//! kept in `extra` so a record can be printed or re-serialized without loss.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Metadata of a single file as returned by `GET /files/<uuid>/`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FileInfo {
    #[serde(default)]
    pub uuid: String,
    /// File has finished propagating to backing storage
    #[serde(default, deserialize_with = "null_as_false")]
    pub on_s3: bool,
    /// Set once the file has been stored
    #[serde(default)]
    pub last_keep_claim: Option<Value>,
    /// Removal timestamp
    #[serde(default)]
    pub removed: Option<Value>,
    #[serde(default)]
    pub original_file_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FileInfo {
    pub fn is_on_storage(&self) -> bool {
        self.on_s3
    }

    pub fn is_stored(&self) -> bool {
        self.last_keep_claim.as_ref().is_some_and(|v| !v.is_null())
    }

    pub fn is_removed(&self) -> bool {
        self.removed.as_ref().is_some_and(|v| !v.is_null())
    }
}

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Metadata of a file group as returned by `GET /groups/<group_id>/`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupInfo {
    /// File records in slot order; `None` marks a slot the server withheld
    #[serde(default)]
    pub files: Vec<Option<FileInfo>>,
    #[serde(default)]
    pub datetime_stored: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GroupInfo {
    pub fn is_stored(&self) -> bool {
        self.datetime_stored.as_ref().is_some_and(|v| !v.is_null())
    }
}
