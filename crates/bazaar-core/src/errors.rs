use bazaar_core_types::{RequestId, UniqueEntityId};
use thiserror::Error;

/// Result type alias using BazaarError
pub type Result<T> = std::result::Result<T, BazaarError>;

/// Result type alias using the canonical ExError
pub type ExResult<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and responses at the outer surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    InvalidTitle,
    InvalidPrice,
    NotFound,
    DuplicateIdentity,
    AlreadyExists,

    // Business rules
    Forbidden,
    InvalidTransition,

    // Integration/IO
    Io,
    Persistence,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidTitle => "ERR_INVALID_TITLE",
            ExErrorKind::InvalidPrice => "ERR_INVALID_PRICE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::DuplicateIdentity => "ERR_DUPLICATE_IDENTITY",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::Forbidden => "ERR_FORBIDDEN",
            ExErrorKind::InvalidTransition => "ERR_INVALID_TRANSITION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus context for
/// debugging. Collaborator traits and use cases return this type.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    ids: Option<Vec<String>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
            ids: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add the list of offending ids (unresolved attachments, duplicates)
    pub fn with_ids(mut self, ids: Vec<String>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the offending ids, if any
    pub fn ids(&self) -> Option<&[String]> {
        self.ids.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(ids) = &self.ids {
            write!(f, " (ids: {})", ids.join(", "))?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Typed domain errors for marketplace operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BazaarError {
    // ===== Lookup Errors =====
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: String },

    #[error("Seller not found: {seller_id}")]
    SellerNotFound { seller_id: String },

    /// The viewer of a product is also a seller record
    #[error("Viewer not found: {viewer_id}")]
    ViewerNotFound { viewer_id: String },

    #[error("Category not found: {category_id}")]
    CategoryNotFound { category_id: String },

    /// One or more caller-supplied attachment ids do not resolve
    #[error("Attachments not found: {}", ids.join(", "))]
    AttachmentsNotFound { ids: Vec<String> },

    // ===== Reconciliation Errors =====
    /// An initial snapshot contained two members with the same identity
    #[error("Duplicate identity in initial items: {id}")]
    DuplicateIdentity { id: String },

    // ===== Ownership / Transition Errors =====
    #[error("Seller {seller_id} cannot update product {product_id} owned by another seller")]
    UpdateAnotherSellerProduct {
        product_id: String,
        seller_id: String,
    },

    #[error("Product {product_id} is sold and cannot be updated")]
    UpdateSoldProduct { product_id: String },

    #[error("Product {product_id} is sold and cannot be cancelled")]
    CancelSoldProduct { product_id: String },

    #[error("Product {product_id} is cancelled and cannot be sold")]
    SellCancelledProduct { product_id: String },

    #[error("Seller {viewer_id} cannot register a view on their own product {product_id}")]
    ViewOwnProduct {
        product_id: String,
        viewer_id: String,
    },

    #[error("Viewer {viewer_id} already viewed product {product_id}")]
    DuplicateView {
        product_id: String,
        viewer_id: String,
    },

    // ===== Validation Errors =====
    #[error("Invalid title: {reason}")]
    InvalidTitle { reason: String },

    #[error("Invalid price: {price_in_cents}")]
    InvalidPrice { price_in_cents: i64 },

    #[error("Invalid product status: {status}")]
    InvalidStatus { status: String },
}

impl BazaarError {
    /// Shorthand for the attachments-not-found error
    pub fn attachments_not_found(ids: &[UniqueEntityId]) -> Self {
        BazaarError::AttachmentsNotFound {
            ids: ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}

/// Conversion from BazaarError to ExError
impl From<BazaarError> for ExError {
    fn from(err: BazaarError) -> Self {
        match err {
            BazaarError::ProductNotFound { product_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(product_id)
                .with_message("Product not found"),

            BazaarError::SellerNotFound { seller_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(seller_id)
                .with_message("Seller not found"),

            BazaarError::ViewerNotFound { viewer_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(viewer_id)
                .with_message("Viewer not found"),

            BazaarError::CategoryNotFound { category_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(category_id)
                .with_message("Category not found"),

            BazaarError::AttachmentsNotFound { ids } => ExError::new(ExErrorKind::NotFound)
                .with_ids(ids)
                .with_message("Attachments not found"),

            BazaarError::DuplicateIdentity { id } => ExError::new(ExErrorKind::DuplicateIdentity)
                .with_entity_id(id)
                .with_message("Duplicate identity in initial items"),

            BazaarError::UpdateAnotherSellerProduct {
                product_id,
                seller_id,
            } => ExError::new(ExErrorKind::Forbidden)
                .with_entity_id(product_id)
                .with_message(format!(
                    "Seller {} does not own this product",
                    seller_id
                )),

            BazaarError::UpdateSoldProduct { product_id } => {
                ExError::new(ExErrorKind::InvalidTransition)
                    .with_entity_id(product_id)
                    .with_message("Sold products cannot be updated")
            }

            BazaarError::CancelSoldProduct { product_id } => {
                ExError::new(ExErrorKind::InvalidTransition)
                    .with_entity_id(product_id)
                    .with_message("Sold products cannot be cancelled")
            }

            BazaarError::SellCancelledProduct { product_id } => {
                ExError::new(ExErrorKind::InvalidTransition)
                    .with_entity_id(product_id)
                    .with_message("Cancelled products cannot be sold")
            }

            BazaarError::ViewOwnProduct {
                product_id,
                viewer_id,
            } => ExError::new(ExErrorKind::Forbidden)
                .with_entity_id(product_id)
                .with_message(format!("Viewer {} owns this product", viewer_id)),

            BazaarError::DuplicateView {
                product_id,
                viewer_id,
            } => ExError::new(ExErrorKind::AlreadyExists)
                .with_entity_id(product_id)
                .with_message(format!("Viewer {} already viewed this product", viewer_id)),

            BazaarError::InvalidTitle { reason } => ExError::new(ExErrorKind::InvalidTitle)
                .with_message(format!("Invalid title: {}", reason)),

            BazaarError::InvalidPrice { price_in_cents } => ExError::new(ExErrorKind::InvalidPrice)
                .with_message(format!("Price must not be negative, got {}", price_in_cents)),

            BazaarError::InvalidStatus { status } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("Unknown product status: {}", status)),
        }
    }
}
