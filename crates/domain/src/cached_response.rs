use crate::DomainError;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Header set on every response replayed from the cache. Live responses never
/// carry it.
pub const CACHE_HIT_HEADER: &str = "x-reports-cached";

/// Opaque cache key derived from the full request identity.
///
/// The key is the request path followed by the raw query string, verbatim.
/// Query parameters are not sorted or otherwise normalized, so
/// `?a=1&b=2` and `?b=2&a=1` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(Arc<str>);

impl CacheKey {
    pub fn new(path_and_query: impl Into<Arc<str>>) -> Self {
        Self(path_and_query.into())
    }

    pub fn from_parts(path: &str, query: Option<&str>) -> Self {
        match query {
            Some(q) => Self(Arc::from(format!("{path}?{q}"))),
            None => Self(Arc::from(path)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A captured report response, stored as the cache value.
///
/// Headers keep every value of a repeated header in its original order. Values
/// are raw bytes, so non-ASCII values replay exactly as they were sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    #[serde(default = "default_status")]
    pub status: u16,
    #[serde(default, with = "base64_headers")]
    pub headers: BTreeMap<String, Vec<Bytes>>,
    #[serde(with = "base64_body")]
    pub body: Bytes,
}

fn default_status() -> u16 {
    200
}

impl CachedResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl AsRef<[u8]>) -> Self {
        self.push_header(name, value);
        self
    }

    pub fn push_header(&mut self, name: &str, value: impl AsRef<[u8]>) {
        self.headers
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(Bytes::copy_from_slice(value.as_ref()));
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DomainError> {
        serde_json::to_vec(self).map_err(|e| DomainError::CacheSerialization(e.to_string()))
    }

    pub fn from_slice(raw: &[u8]) -> Result<Self, DomainError> {
        serde_json::from_slice(raw).map_err(|e| DomainError::CacheSerialization(e.to_string()))
    }
}

mod base64_body {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(body: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(body))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map(Bytes::from)
            .map_err(serde::de::Error::custom)
    }
}

mod base64_headers {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        headers: &BTreeMap<String, Vec<Bytes>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let encoded: BTreeMap<&str, Vec<String>> = headers
            .iter()
            .map(|(name, values)| {
                (
                    name.as_str(),
                    values.iter().map(|v| STANDARD.encode(v)).collect(),
                )
            })
            .collect();
        encoded.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, Vec<Bytes>>, D::Error> {
        let encoded = BTreeMap::<String, Vec<String>>::deserialize(deserializer)?;
        encoded
            .into_iter()
            .map(|(name, values)| {
                let values = values
                    .iter()
                    .map(|v| STANDARD.decode(v.as_bytes()).map(Bytes::from))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(serde::de::Error::custom)?;
                Ok((name, values))
            })
            .collect()
    }
}
