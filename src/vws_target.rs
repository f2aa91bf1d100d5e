use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A target to be uploaded with [`Vws::add_target`](crate::Vws::add_target).
#[derive(Debug, Clone)]
pub struct NewTarget {
    name: String,
    width: f64,
    image: Vec<u8>,
    metadata: Option<Vec<u8>>,
    active_flag: bool,
}

#[derive(Debug, Serialize)]
struct TargetPayload<'a> {
    name: &'a str,
    width: f64,
    image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    application_metadata: Option<String>,
    active_flag: u8,
}

impl NewTarget {
    pub fn new(name: impl Into<String>, width: f64, image: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            width,
            image: image.into(),
            metadata: None,
            active_flag: true,
        }
    }

    /// Reads the image at `path` and names the target `<stem>_<unix seconds>.<ext>`
    /// so repeated uploads of the same file do not collide on the server.
    pub fn from_file(path: impl AsRef<Path>, width: f64) -> Result<Self> {
        let path = path.as_ref();
        let image = fs::read(path)?;
        let name = unique_name(path, Utc::now());
        let metadata = serde_json::json!({ "image_url": path.to_string_lossy() });

        Self::new(name, width, image).with_metadata(&metadata)
    }

    /// Attaches application metadata, stored as base64 of its JSON encoding.
    pub fn with_metadata<M: Serialize + ?Sized>(mut self, metadata: &M) -> Result<Self> {
        self.metadata = Some(serde_json::to_vec(metadata)?);
        Ok(self)
    }

    pub fn with_active_flag(mut self, active: bool) -> Self {
        self.active_flag = active;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn image(&self) -> &[u8] {
        &self.image
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let payload = TargetPayload {
            name: &self.name,
            width: self.width,
            image: STANDARD.encode(&self.image),
            application_metadata: self.metadata.as_ref().map(|m| STANDARD.encode(m)),
            active_flag: self.active_flag as u8,
        };
        Ok(serde_json::to_vec(&payload)?)
    }
}

fn unique_name(path: &Path, now: DateTime<Utc>) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, now.timestamp(), ext),
        None => format!("{}_{}", stem, now.timestamp()),
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultResponse {
    pub result_code: String,
    #[serde(default)]
    pub transaction_id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddTargetResponse {
    #[serde(default)]
    pub result_code: String,
    #[serde(default)]
    pub transaction_id: String,
    pub target_id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TargetListResponse {
    #[serde(default)]
    pub result_code: String,
    #[serde(default)]
    pub transaction_id: String,
    pub results: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TargetRecordResponse {
    #[serde(default)]
    pub result_code: String,
    #[serde(default)]
    pub transaction_id: String,
    /// Processing state of the target, e.g. `processing`, `success` or `failed`.
    #[serde(default)]
    pub status: String,
    pub target_record: TargetRecord,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TargetRecord {
    pub target_id: String,
    #[serde(default)]
    pub active_flag: bool,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub width: f64,
    /// 0 to 5, or -1 while the image is still being processed.
    #[serde(default)]
    pub tracking_rating: i32,
    #[serde(default)]
    pub reco_rating: String,
}
