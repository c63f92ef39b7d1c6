use bazaar_core_types::UniqueEntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One seller looking at another seller's product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    pub id: UniqueEntityId,
    pub viewer_id: UniqueEntityId,
    pub product_id: UniqueEntityId,
    pub created_at: DateTime<Utc>,
}

impl View {
    pub fn new(
        viewer_id: UniqueEntityId,
        product_id: UniqueEntityId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UniqueEntityId::new(),
            viewer_id,
            product_id,
            created_at,
        }
    }
}
