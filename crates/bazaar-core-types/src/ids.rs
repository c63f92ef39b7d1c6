//! Identifier newtypes
//!
//! Every persisted record carries a `UniqueEntityId`. Two records are the
//! same entity exactly when their ids are equal; payload is never compared.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, immutable identity of a domain entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniqueEntityId(String);

impl UniqueEntityId {
    /// Mint a fresh identity using UUIDv7 (time-ordered)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap an existing identifier (from storage or caller input)
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl Default for UniqueEntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UniqueEntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UniqueEntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UniqueEntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Unique identifier for a single request or operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random RequestId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_generation() {
        let id1 = UniqueEntityId::new();
        let id2 = UniqueEntityId::new();

        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
    }

    #[test]
    fn test_entity_id_equality_is_by_value() {
        let a = UniqueEntityId::from_string("image-1");
        let b = UniqueEntityId::from("image-1");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "image-1");
    }

    #[test]
    fn test_request_id_generation() {
        let id1 = RequestId::new();
        let id2 = RequestId::new();

        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
    }

    #[test]
    fn test_entity_id_serializes_as_plain_string() {
        let id = UniqueEntityId::from_string("p-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"p-1\"");

        let back: UniqueEntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
