//! Content-derived identifiers for exported transactions

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::transaction::HttpTransaction;

/// Number of hex characters kept from the digest
pub const IDENTIFIER_LEN: usize = 5;

/// Which parts of a transaction feed the identifier digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityScope {
    /// Hash the target host and port
    pub include_service: bool,
    /// Hash the response bytes when present
    pub include_response: bool,
}

impl Default for IdentityScope {
    fn default() -> Self {
        Self {
            include_service: true,
            include_response: true,
        }
    }
}

/// Short, stable identifier of a transaction's content
///
/// Five hex characters give a keyspace of about a million values, so two
/// transactions in one batch can share an identifier. File names stay unique
/// through the order number prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier([u8; IDENTIFIER_LEN]);

impl Identifier {
    /// Identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Built from lowercase hex digits only
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute the SHA-256 digest of a transaction
///
/// The digest covers, in order and without separators:
/// 1. Target host
/// 2. Target port (decimal)
/// 3. Request bytes
/// 4. Response bytes
///
/// Parts excluded by `scope` or absent on the transaction are skipped.
#[must_use]
pub fn digest<T: HttpTransaction + ?Sized>(transaction: &T, scope: IdentityScope) -> [u8; 32] {
    let mut hasher = Sha256::new();

    if scope.include_service {
        let service = transaction.service();
        hasher.update(service.host.as_bytes());
        hasher.update(service.port.to_string().as_bytes());
    }

    if let Some(request) = transaction.request() {
        hasher.update(request);
    }

    if scope.include_response {
        if let Some(response) = transaction.response() {
            hasher.update(response);
        }
    }

    hasher.finalize().into()
}

/// Derive the short identifier of a transaction
#[must_use]
pub fn identify<T: HttpTransaction + ?Sized>(transaction: &T, scope: IdentityScope) -> Identifier {
    let hash = digest(transaction, scope);
    let encoded = hex::encode(&hash[..IDENTIFIER_LEN.div_ceil(2)]);

    let mut id = [0u8; IDENTIFIER_LEN];
    id.copy_from_slice(&encoded.as_bytes()[..IDENTIFIER_LEN]);
    Identifier(id)
}
