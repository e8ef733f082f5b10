//! Message payload models
//!
//! A received message is either plain text or a named binary payload
//! that travels base64-encoded inside a SOAP body.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::{Path, PathBuf};

/// A message pulled from the gateway
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReceivedMessage {
    Text(String),
    File(FilePayload),
}

/// Named binary payload carried in a SOAP `File` element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePayload {
    /// Original file name as sent by the peer
    pub name: String,
    pub data: Vec<u8>,
}

impl FilePayload {
    /// Load a file from disk, keeping only its final path component as
    /// the payload name
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read file {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, data })
    }

    /// Encode the payload for embedding in an envelope
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// Decode a payload received in an envelope. Embedded whitespace is
    /// tolerated since the XML emitter may wrap text content.
    pub fn from_base64(name: impl Into<String>, encoded: &str) -> Result<Self> {
        let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let data = STANDARD
            .decode(compact.as_bytes())
            .context("Failed to decode base64 file payload")?;
        Ok(Self {
            name: name.into(),
            data,
        })
    }

    /// Unique output name: the original stem suffixed with a millisecond
    /// timestamp, keeping the extension
    pub fn timestamped_name(&self, now_millis: i64) -> String {
        let path = Path::new(&self.name);
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone());
        match path.extension() {
            Some(ext) => format!("{}_{}.{}", stem, now_millis, ext.to_string_lossy()),
            None => format!("{}_{}", stem, now_millis),
        }
    }

    /// Write the payload into `dir` under its timestamped name and
    /// return the path written
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        let name = self.timestamped_name(chrono::Utc::now().timestamp_millis());
        let target = dir.join(name);
        std::fs::write(&target, &self.data)
            .with_context(|| format!("Failed to write file {}", target.display()))?;
        Ok(target)
    }
}
