//! [`Image`]-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;

use crate::{api::scalar, Context};

/// An image attached to a listing.
#[derive(Clone, Debug, From)]
pub struct Image(domain::Image);

/// An image attached to a listing.
#[graphql_object(context = Context)]
impl Image {
    /// Unique identifier of this `Image`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// URL this `Image` is served from.
    ///
    /// May be relative to the content store.
    pub fn url(&self) -> String {
        self.0.url.to_string()
    }

    /// Original file name of this `Image`.
    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// Alternative text of this `Image`.
    pub fn alternative_text(&self) -> Option<&str> {
        self.0.alternative_text.as_deref()
    }

    /// MIME type of this `Image`.
    pub fn mime(&self) -> Option<&str> {
        self.0.mime.as_deref()
    }

    /// Width of this `Image` in pixels.
    pub fn width(&self) -> Option<i32> {
        self.0.width.and_then(|w| i32::try_from(w).ok())
    }

    /// Height of this `Image` in pixels.
    pub fn height(&self) -> Option<i32> {
        self.0.height.and_then(|h| i32::try_from(h).ok())
    }
}

/// Unique identifier of an `Image`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ImageId", with = scalar::Via::<domain::image::Id>)]
pub struct Id(domain::image::Id);
