use bazaar_core_types::UniqueEntityId;
use serde::{Deserialize, Serialize};

/// An uploaded file a product image can point at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: UniqueEntityId,
    /// Storage key of the uploaded file
    pub key: String,
}

impl Attachment {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            id: UniqueEntityId::new(),
            key: key.into(),
        }
    }
}

/// Result of resolving caller-supplied attachment ids
///
/// `found` follows the order of the requested ids; `not_found_ids` lists the
/// ids with no stored attachment, also in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentLookup {
    pub found: Vec<Attachment>,
    pub not_found_ids: Vec<UniqueEntityId>,
}

impl AttachmentLookup {
    pub fn is_complete(&self) -> bool {
        self.not_found_ids.is_empty()
    }
}
