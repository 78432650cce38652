//! [`Tag`]-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;

use crate::{api::scalar, Context};

/// A tag marking listings.
#[derive(Clone, Debug, From)]
pub struct Tag(domain::Tag);

/// A tag marking listings.
#[graphql_object(context = Context)]
impl Tag {
    /// Unique identifier of this `Tag`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Human-readable name of this `Tag`.
    pub fn name(&self) -> &str {
        self.0.name.as_ref()
    }

    /// Slug of this `Tag`.
    pub fn slug(&self) -> scalar::Slug {
        self.0.slug.clone().into()
    }
}

/// Unique identifier of a `Tag`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "TagId", with = scalar::Via::<domain::tag::Id>)]
pub struct Id(domain::tag::Id);
