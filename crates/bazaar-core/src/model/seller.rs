use bazaar_core_types::UniqueEntityId;
use serde::{Deserialize, Serialize};

/// A registered seller; also the viewer of other sellers' products
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    pub id: UniqueEntityId,
    pub name: String,
    pub email: String,
}

impl Seller {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UniqueEntityId::new(),
            name: name.into(),
            email: email.into(),
        }
    }
}
