//! Wire documents exchanged with a [`ContentStore`].
//!
//! [`ContentStore`]: super::ContentStore

use serde::{Deserialize, Serialize};

use crate::domain::{
    category, city, image, listing, tag, user, Category, City, Image, Listing,
    Slug, Tag,
};

/// [`Listing`] document with its relations populated.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDocument {
    /// ID of the [`Listing`].
    pub id: listing::Id,

    /// Title of the [`Listing`].
    pub title: listing::Title,

    /// Slug of the [`Listing`].
    pub slug: Slug,

    /// Description of the [`Listing`].
    #[serde(default)]
    pub description: Option<listing::Description>,

    /// Price of the [`Listing`].
    #[serde(default)]
    pub price: Option<listing::Price>,

    /// Contact phone of the [`Listing`].
    #[serde(default)]
    pub phone: Option<listing::Phone>,

    /// Contact email of the [`Listing`].
    #[serde(default)]
    pub email: Option<listing::Email>,

    /// Address of the [`Listing`].
    #[serde(default)]
    pub address: Option<listing::Address>,

    /// Populated [`City`] relation.
    #[serde(default)]
    pub city: Option<City>,

    /// Populated [`Category`] relation.
    #[serde(default)]
    pub category: Option<Category>,

    /// Populated [`Tag`] relations.
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,

    /// Populated [`Image`] media.
    ///
    /// Stores report no media as `null` rather than an empty list.
    #[serde(default)]
    pub images: Option<Vec<Image>>,

    /// Featured flag of the [`Listing`].
    #[serde(default)]
    pub featured: Option<bool>,

    /// Lifecycle status of the [`Listing`].
    #[serde(default)]
    pub status: Option<listing::Status>,

    /// Populated owner relation.
    #[serde(default)]
    pub owner: Option<OwnerDocument>,

    /// Manual homepage position of the [`Listing`].
    #[serde(default)]
    pub homepage_position: Option<listing::Position>,

    /// Manual category position of the [`Listing`].
    #[serde(default)]
    pub category_position: Option<listing::Position>,

    /// Creation time of the [`Listing`].
    pub created_at: listing::CreationDateTime,

    /// Last modification time of the [`Listing`].
    #[serde(default)]
    pub updated_at: Option<listing::ModificationDateTime>,
}

/// Owner relation of a [`ListingDocument`].
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct OwnerDocument {
    /// ID of the owning user.
    pub id: user::Id,
}

impl From<ListingDocument> for Listing {
    fn from(doc: ListingDocument) -> Self {
        Self {
            id: doc.id,
            title: doc.title,
            slug: doc.slug,
            description: doc.description.unwrap_or_default(),
            price: doc.price,
            phone: doc.phone,
            email: doc.email,
            address: doc.address,
            city: doc.city,
            category: doc.category,
            tags: doc.tags.unwrap_or_default(),
            images: doc.images.unwrap_or_default(),
            featured: doc.featured.unwrap_or_default(),
            status: doc.status.unwrap_or_default(),
            owner: doc.owner.map(|o| o.id),
            homepage_position: doc.homepage_position,
            category_position: doc.category_position,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

impl From<Listing> for ListingDocument {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id,
            title: listing.title,
            slug: listing.slug,
            description: Some(listing.description),
            price: listing.price,
            phone: listing.phone,
            email: listing.email,
            address: listing.address,
            city: listing.city,
            category: listing.category,
            tags: Some(listing.tags),
            images: Some(listing.images),
            featured: Some(listing.featured),
            status: Some(listing.status),
            owner: listing.owner.map(|id| OwnerDocument { id }),
            homepage_position: listing.homepage_position,
            category_position: listing.category_position,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        }
    }
}

/// Payload creating or replacing a [`Listing`], referencing its relations by
/// their IDs.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftDocument {
    /// Title of the [`Listing`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<listing::Title>,

    /// Slug of the [`Listing`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<Slug>,

    /// Description of the [`Listing`].
    pub description: listing::Description,

    /// Price of the [`Listing`].
    pub price: Option<listing::Price>,

    /// Contact phone of the [`Listing`].
    pub phone: Option<listing::Phone>,

    /// Contact email of the [`Listing`].
    pub email: Option<listing::Email>,

    /// Address of the [`Listing`].
    pub address: Option<listing::Address>,

    /// ID of the [`City`] relation.
    pub city: Option<city::Id>,

    /// ID of the [`Category`] relation.
    pub category: Option<category::Id>,

    /// IDs of the [`Tag`] relations.
    pub tags: Vec<tag::Id>,

    /// IDs of the [`Image`] media.
    pub images: Vec<image::Id>,

    /// Featured flag of the [`Listing`].
    pub featured: bool,

    /// Lifecycle status of the [`Listing`].
    pub status: listing::Status,

    /// ID of the owning user.
    pub owner: Option<user::Id>,
}

impl From<listing::Draft> for DraftDocument {
    fn from(draft: listing::Draft) -> Self {
        let listing::Draft {
            title,
            slug,
            description,
            price,
            phone,
            email,
            address,
            city,
            category,
            tags,
            images,
            featured,
            status,
            owner,
        } = draft;

        Self {
            title,
            slug,
            description,
            price,
            phone,
            email,
            address,
            city,
            category,
            tags,
            images,
            featured,
            status,
            owner,
        }
    }
}
