//! Model artifact encoding and decoding.
//!
//! Binary layout:
//!
//! ```text
//! +--------+-----------------+----------------------+
//! | "FLM1" | version (u32 LE)| postcard(model)      |
//! +--------+-----------------+----------------------+
//! ```

use crate::classifier::{LinearTextModel, MODEL_FORMAT_VERSION, ModelError};
use std::path::Path;
use thiserror::Error;

/// Magic bytes at the start of a binary model artifact.
pub const MODEL_MAGIC: &[u8; 4] = b"FLM1";

const HEADER_LEN: usize = 8;

/// Errors from reading or writing model artifacts.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary decode error: {0}")]
    Postcard(#[from] postcard::Error),

    #[error("not a factlens model file (bad magic)")]
    BadMagic,

    #[error("model file truncated ({0} bytes)")]
    Truncated(usize),

    #[error("header version {header} does not match payload version {payload}")]
    VersionMismatch { header: u32, payload: u32 },

    #[error("unsupported model file extension '{0}' (use .json or .flm)")]
    UnsupportedExtension(String),

    #[error("invalid model: {0}")]
    Model(#[from] ModelError),
}

/// On-disk encoding of a model artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Json,
    Binary,
}

impl ModelFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, FormatError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "flm" | "bin" => Ok(Self::Binary),
            _ => Err(FormatError::UnsupportedExtension(ext)),
        }
    }
}

// =============================================================================
// JSON
// =============================================================================

/// Decode and validate a JSON model artifact.
pub fn model_from_json(json: &str) -> Result<LinearTextModel, FormatError> {
    let model: LinearTextModel = serde_json::from_str(json)?;
    model.validate()?;
    Ok(model)
}

/// Encode a model as pretty JSON.
pub fn model_to_json(model: &LinearTextModel) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(model)?)
}

// =============================================================================
// BINARY
// =============================================================================

/// Encode a model in the binary format.
pub fn model_to_bytes(model: &LinearTextModel) -> Result<Vec<u8>, FormatError> {
    let payload = postcard::to_stdvec(model)?;
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(MODEL_MAGIC);
    out.extend_from_slice(&model.format_version.to_le_bytes());
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Decode and validate a binary model artifact.
pub fn model_from_bytes(bytes: &[u8]) -> Result<LinearTextModel, FormatError> {
    if bytes.len() < HEADER_LEN {
        return Err(FormatError::Truncated(bytes.len()));
    }
    let (header, payload) = bytes.split_at(HEADER_LEN);
    if &header[..4] != MODEL_MAGIC {
        return Err(FormatError::BadMagic);
    }
    let version = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
    if version != MODEL_FORMAT_VERSION {
        return Err(ModelError::Version {
            found: version,
            expected: MODEL_FORMAT_VERSION,
        }
        .into());
    }

    let model: LinearTextModel = postcard::from_bytes(payload)?;
    if model.format_version != version {
        return Err(FormatError::VersionMismatch {
            header: version,
            payload: model.format_version,
        });
    }
    model.validate()?;
    Ok(model)
}

// =============================================================================
// FILES
// =============================================================================

/// Load a model artifact, choosing the format by extension.
pub fn load_model(path: &Path) -> Result<LinearTextModel, FormatError> {
    match ModelFormat::from_path(path)? {
        ModelFormat::Json => model_from_json(&std::fs::read_to_string(path)?),
        ModelFormat::Binary => model_from_bytes(&std::fs::read(path)?),
    }
}

/// Write a model artifact, choosing the format by extension.
pub fn save_model(model: &LinearTextModel, path: &Path) -> Result<(), FormatError> {
    match ModelFormat::from_path(path)? {
        ModelFormat::Json => std::fs::write(path, model_to_json(model)?)?,
        ModelFormat::Binary => std::fs::write(path, model_to_bytes(model)?)?,
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classifier;
    use crate::classifier::tests::toy_model;

    #[test]
    fn binary_artifact_starts_with_header() {
        let bytes = model_to_bytes(&toy_model()).unwrap_or_default();
        assert_eq!(&bytes[..4], MODEL_MAGIC);
        assert_eq!(&bytes[4..8], &MODEL_FORMAT_VERSION.to_le_bytes());
    }

    #[test]
    fn binary_decode_preserves_predictions() {
        let model = toy_model();
        let bytes = model_to_bytes(&model).unwrap_or_default();
        let decoded = model_from_bytes(&bytes);
        assert!(decoded.is_ok());
        let decoded = decoded.unwrap_or_else(|_| toy_model());
        let text = "Government announces shocking miracle";
        assert_eq!(decoded.predict(text), model.predict(text));
    }

    #[test]
    fn bad_magic_and_truncation_are_rejected() {
        assert!(matches!(model_from_bytes(b"FLM"), Err(FormatError::Truncated(3))));
        assert!(matches!(
            model_from_bytes(b"NOPE\x01\x00\x00\x00rest"),
            Err(FormatError::BadMagic)
        ));
        assert!(matches!(
            model_from_bytes(b"FLM1\x09\x00\x00\x00rest"),
            Err(FormatError::Model(ModelError::Version { found: 9, .. }))
        ));
    }

    #[test]
    fn json_loader_validates() {
        let mut model = toy_model();
        model.ngram_max = 0;
        let json = serde_json::to_string(&model).unwrap_or_default();
        assert!(matches!(
            model_from_json(&json),
            Err(FormatError::Model(ModelError::NgramRange(0)))
        ));
    }

    #[test]
    fn files_roundtrip_by_extension() {
        let dir = tempfile::tempdir();
        assert!(dir.is_ok());
        let Ok(dir) = dir else { return };
        let model = toy_model();

        for name in ["model.json", "model.flm"] {
            let path = dir.path().join(name);
            assert!(save_model(&model, &path).is_ok());
            let loaded = load_model(&path);
            assert!(matches!(loaded, Ok(ref m) if *m == model), "{}", name);
        }
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(matches!(
            ModelFormat::from_path(Path::new("model.pkl")),
            Err(FormatError::UnsupportedExtension(ext)) if ext == "pkl"
        ));
        assert!(matches!(
            load_model(Path::new("no_extension")),
            Err(FormatError::UnsupportedExtension(_))
        ));
    }
}
