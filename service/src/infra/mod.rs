//! Infrastructure layer.

pub mod content_store;

#[cfg(any(test, feature = "memory"))]
pub use self::content_store::InMemory;
pub use self::content_store::ContentStore;
#[cfg(feature = "strapi")]
pub use self::content_store::{strapi, Strapi};
