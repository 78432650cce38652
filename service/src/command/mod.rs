//! [`Command`] definition.

pub mod create_listing;
pub mod delete_listing;
pub mod update_listing;
pub mod update_listing_positions;
pub mod upload_images;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_listing::CreateListing, delete_listing::DeleteListing,
    update_listing::UpdateListing,
    update_listing_positions::UpdateListingPositions,
    upload_images::UploadImages,
};
