//! Domain definitions.

pub mod category;
pub mod city;
pub mod image;
pub mod listing;
mod slug;
pub mod tag;
pub mod user;

pub use self::{
    category::Category, city::City, image::Image, listing::Listing,
    slug::Slug, tag::Tag,
};
