//! # Item-Blob Decoding
//!
//! SkyBlock inventories (armor, ender chest, wardrobe, bags) arrive as
//! base64-encoded, gzip-compressed blobs. This module turns a blob back into
//! its raw NBT bytes; parsing the NBT structure itself is left to the caller.

use crate::core::error::{ClientError, ClientResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// The only blob layout the upstream currently emits.
const SUPPORTED_LAYOUT: i64 = 0;

/// A binary inventory blob as returned by SkyBlock endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemBytes {
    /// Layout discriminator (`0` everywhere today)
    #[serde(rename = "type")]
    pub kind: i64,

    /// Base64-encoded, gzipped payload
    pub data: String,
}

/// Decode a blob into its decompressed NBT bytes.
pub fn decode(blob: &ItemBytes) -> ClientResult<Vec<u8>> {
    if blob.kind != SUPPORTED_LAYOUT {
        return Err(ClientError::decode(format!(
            "Unsupported item data layout: {}",
            blob.kind
        )));
    }

    let compressed = STANDARD
        .decode(&blob.data)
        .map_err(|e| ClientError::decode(format!("Item data is not valid base64: {e}")))?;

    let mut bytes = Vec::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut bytes)
        .map_err(|e| ClientError::decode(format!("Item data failed to decompress: {e}")))?;

    Ok(bytes)
}
