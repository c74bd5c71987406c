//! Source format adapters.
//!
//! # Responsibilities
//! - Decode a byte stream into a sequence of [`RedirectRecord`]s
//! - Hide the textual syntax (YAML, JSON, TOML) behind one trait
//! - Map file extensions to formats
//!
//! # Design Decisions
//! - One adapter per format; the table builder never sees the format
//! - Adapters are stateless and shared through [`DecoderRegistry`]
//! - A new format is a new [`RecordDecoder`] impl plus a registry entry

use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::DecodeError;
use crate::routing::record::RedirectRecord;

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Yaml,
    Json,
    Toml,
}

impl SourceFormat {
    /// Infer the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
        };
        f.write_str(name)
    }
}

/// Decodes a structured text stream into redirect records.
pub trait RecordDecoder: Send + Sync + fmt::Debug {
    /// Parse the whole stream as a list of `{path, url}` objects.
    fn decode(&self, reader: &mut dyn Read) -> Result<Vec<RedirectRecord>, DecodeError>;
}

/// YAML sequence of mappings.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlDecoder;

impl RecordDecoder for YamlDecoder {
    fn decode(&self, reader: &mut dyn Read) -> Result<Vec<RedirectRecord>, DecodeError> {
        Ok(serde_yaml::from_reader(reader)?)
    }
}

/// JSON array of objects.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonDecoder;

impl RecordDecoder for JsonDecoder {
    fn decode(&self, reader: &mut dyn Read) -> Result<Vec<RedirectRecord>, DecodeError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// TOML document with a `[[redirects]]` array of tables.
///
/// TOML has no top-level arrays, so the records live under one key.
#[derive(Debug, Default, Clone, Copy)]
pub struct TomlDecoder;

#[derive(Deserialize)]
struct TomlDocument {
    redirects: Vec<RedirectRecord>,
}

impl RecordDecoder for TomlDecoder {
    fn decode(&self, reader: &mut dyn Read) -> Result<Vec<RedirectRecord>, DecodeError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let document: TomlDocument = toml::from_str(&content)?;
        Ok(document.redirects)
    }
}

/// Lookup from format to adapter.
#[derive(Debug)]
pub struct DecoderRegistry {
    decoders: HashMap<SourceFormat, Box<dyn RecordDecoder>>,
}

impl DecoderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Register (or replace) the adapter for `format`.
    pub fn register(&mut self, format: SourceFormat, decoder: Box<dyn RecordDecoder>) {
        self.decoders.insert(format, decoder);
    }

    pub fn get(&self, format: SourceFormat) -> Option<&dyn RecordDecoder> {
        self.decoders.get(&format).map(|d| d.as_ref())
    }
}

impl Default for DecoderRegistry {
    /// Registry with every built-in format.
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(SourceFormat::Yaml, Box::new(YamlDecoder));
        registry.register(SourceFormat::Json, Box::new(JsonDecoder));
        registry.register(SourceFormat::Toml, Box::new(TomlDecoder));
        registry
    }
}
