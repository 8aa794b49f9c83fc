//! Master-key request signing.

use crate::error::CosmosError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Kind of resource a request addresses, as used in the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Databases,
    Containers,
    Documents,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Databases => "dbs",
            ResourceType::Containers => "colls",
            ResourceType::Documents => "docs",
        }
    }
}

/// Format a timestamp the way `x-ms-date` expects it (RFC 1123, GMT).
pub fn format_http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Decoded account master key.
#[derive(Clone)]
pub struct MasterKey(Vec<u8>);

impl MasterKey {
    /// Decode a base64 master key as shown in the Azure portal.
    pub fn from_base64(key: &str) -> Result<Self, CosmosError> {
        let bytes = STANDARD
            .decode(key.trim())
            .map_err(|e| CosmosError::InvalidKey(e.to_string()))?;
        if bytes.is_empty() {
            return Err(CosmosError::InvalidKey("key is empty".to_string()));
        }
        Ok(Self(bytes))
    }

    /// Build the URL-encoded `authorization` header value for a request.
    ///
    /// `resource_link` is the path of the addressed resource without a
    /// leading slash (`dbs/{db}`), or of the parent for create calls
    /// (`""` when creating a database).
    pub fn authorization(
        &self,
        verb: &str,
        resource_type: ResourceType,
        resource_link: &str,
        date: &str,
    ) -> Result<String, CosmosError> {
        let payload = format!(
            "{}\n{}\n{}\n{}\n\n",
            verb.to_lowercase(),
            resource_type.as_str(),
            resource_link,
            date.to_lowercase()
        );

        let mut mac = HmacSha256::new_from_slice(&self.0)
            .map_err(|e| CosmosError::InvalidKey(e.to_string()))?;
        mac.update(payload.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        let token = format!("type=master&ver=1.0&sig={signature}");
        Ok(url::form_urlencoded::byte_serialize(token.as_bytes()).collect())
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterKey(***)")
    }
}
