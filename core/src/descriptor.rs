//! Project descriptor reading: fetch envelope, base64-decode, parse JSON.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::content_source::ContentSource;
use crate::errors::DescriptorReadError;
use crate::model::{FileEnvelope, ProjectDescriptor};

/// Read and parse the descriptor at `path`. Any failure is scoped to this
/// one path.
pub async fn read_descriptor(
    source: &dyn ContentSource,
    path: &str,
) -> Result<ProjectDescriptor, DescriptorReadError> {
    let envelope = source.fetch_file(path).await?;
    decode_descriptor(path, &envelope)
}

/// Decode an already fetched envelope.
///
/// The hosting API wraps base64 payloads at 60 columns, so all ASCII
/// whitespace is dropped before decoding.
pub fn decode_descriptor(
    path: &str,
    envelope: &FileEnvelope,
) -> Result<ProjectDescriptor, DescriptorReadError> {
    if let Some(encoding) = envelope.encoding.as_deref()
        && encoding != "base64"
    {
        return Err(DescriptorReadError::Envelope {
            path: path.to_string(),
            message: format!("unsupported content encoding '{encoding}'"),
        });
    }

    let compact: String = envelope
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD
        .decode(compact)
        .map_err(|source| DescriptorReadError::Decode {
            path: path.to_string(),
            source,
        })?;

    serde_json::from_slice(&bytes).map_err(|source| DescriptorReadError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Encode a descriptor the way the contents API would serve it.
pub fn encode_descriptor(descriptor: &ProjectDescriptor) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(descriptor)?;
    Ok(STANDARD.encode(json))
}
