pub mod attachment;
pub mod category;
pub mod product;
pub mod product_image;
pub mod seller;
pub mod view;

pub use attachment::{Attachment, AttachmentLookup};
pub use category::Category;
pub use product::{Product, ProductDetails, ProductStatus};
pub use product_image::{ProductImage, ProductImageList};
pub use seller::Seller;
pub use view::View;
