//! [`ContentStore`]-related implementations.

pub mod document;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod predicate;
#[cfg(feature = "strapi")]
pub mod strapi;

use derive_more::{Display, Error as StdError, From};

#[cfg(any(test, feature = "memory"))]
pub use self::memory::InMemory;
pub use self::predicate::Predicate;
#[cfg(feature = "strapi")]
pub use self::strapi::Strapi;

/// Remote content store operation.
pub use common::Handler as ContentStore;

/// [`ContentStore`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Strapi`] error.
    #[cfg(feature = "strapi")]
    Strapi(strapi::Error),

    /// [`InMemory`] error.
    #[cfg(any(test, feature = "memory"))]
    Memory(memory::Error),
}

impl Error {
    /// Returns the reason of the request being rejected as invalid by the
    /// store, if it was.
    #[must_use]
    pub fn rejection(&self) -> Option<String> {
        match self {
            #[cfg(feature = "strapi")]
            Self::Strapi(strapi::Error::Status { status, message })
                if status.is_client_error()
                    && *status != reqwest::StatusCode::NOT_FOUND =>
            {
                Some(message.clone())
            }
            #[cfg(feature = "strapi")]
            Self::Strapi(_) => None,
            #[cfg(any(test, feature = "memory"))]
            Self::Memory(memory::Error::Encode(_)) => None,
            #[cfg(any(test, feature = "memory"))]
            Self::Memory(
                e @ (memory::Error::MissingAttribute(_)
                | memory::Error::UnknownRelation { .. }),
            ) => Some(e.to_string()),
        }
    }

    /// Indicates whether the store cannot be reached at all.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        match self {
            #[cfg(feature = "strapi")]
            Self::Strapi(e) => matches!(e, strapi::Error::Request(_)),
            #[cfg(any(test, feature = "memory"))]
            Self::Memory(_) => false,
        }
    }
}
