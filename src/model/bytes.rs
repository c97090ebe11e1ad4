//! Serde adapter encoding raw blobs as standard base64 strings.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&STANDARD.encode(data))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    // Missing and null blobs both decode to empty data
    let encoded = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    STANDARD
        .decode(encoded.as_bytes())
        .map_err(serde::de::Error::custom)
}
