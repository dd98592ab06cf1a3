//! Outgoing request bodies.
//!
//! The caller picks the encoding by picking the variant; the gateway never
//! inspects the value to guess.

use std::collections::HashSet;

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::error::GatewayError;

/// A file part of a multipart body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAttachment {
    pub name: String,
    pub data: Vec<u8>,
}

impl FileAttachment {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into(), data: data.into() }
    }
}

impl From<hudori_common::models::FileUpload> for FileAttachment {
    fn from(upload: hudori_common::models::FileUpload) -> Self {
        Self { name: upload.name, data: upload.data }
    }
}

/// Form fields and file parts, each keyed by form name, written in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MultipartBody {
    pub fields: Vec<(String, String)>,
    pub files: Vec<(String, FileAttachment)>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    pub fn file(mut self, key: impl Into<String>, file: FileAttachment) -> Self {
        self.files.push((key.into(), file));
        self
    }

    /// Assemble the form. Nothing is returned unless every part was accepted.
    pub(crate) fn into_form(self) -> Result<Form, GatewayError> {
        let mut seen = HashSet::new();
        for key in self.fields.iter().map(|(k, _)| k).chain(self.files.iter().map(|(k, _)| k)) {
            if !seen.insert(key.as_str()) {
                return Err(GatewayError::InvalidPayload(format!("duplicate form key '{key}'")));
            }
        }

        let mut form = Form::new();
        for (key, value) in self.fields {
            form = form.text(key, value);
        }
        for (key, file) in self.files {
            let part = Part::bytes(file.data)
                .file_name(file.name)
                .mime_str("application/octet-stream")
                .map_err(|e| GatewayError::EncodingFailed(Box::new(e)))?;
            form = form.part(key, part);
        }
        Ok(form)
    }
}

/// Body of an outgoing request.
#[derive(Debug, Clone, Default)]
pub enum Payload {
    #[default]
    NoBody,
    Json(Value),
    Multipart(MultipartBody),
}

impl Payload {
    /// Serialize any value into a JSON payload.
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self, GatewayError> {
        serde_json::to_value(value)
            .map(Payload::Json)
            .map_err(|e| GatewayError::EncodingFailed(Box::new(e)))
    }
}
