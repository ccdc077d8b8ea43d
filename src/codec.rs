// 🧬 Codecs - On-disk formats for the containers
//
// JSON (human readable) backs sets and mappings.
// bincode (opaque, unversioned) backs sequences.

use crate::error::StoreResult;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub trait Codec {
    /// File extension for backing files written by this codec
    const EXTENSION: &'static str;

    fn encode<T: Serialize + ?Sized>(value: &T) -> StoreResult<Vec<u8>>;

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> StoreResult<T>;
}

/// Pretty-printed UTF-8 JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    const EXTENSION: &'static str = "json";

    fn encode<T: Serialize + ?Sized>(value: &T) -> StoreResult<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(value)?)
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> StoreResult<T> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// bincode 1.x blob; only readable by the same encoder
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl Codec for BincodeCodec {
    const EXTENSION: &'static str = "bin";

    fn encode<T: Serialize + ?Sized>(value: &T) -> StoreResult<Vec<u8>> {
        Ok(bincode::serialize(value)?)
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> StoreResult<T> {
        Ok(bincode::deserialize(bytes)?)
    }
}
