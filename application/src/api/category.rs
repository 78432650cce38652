//! [`Category`]-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;

use crate::{api::scalar, Context};

/// A category listings belong to.
#[derive(Clone, Debug, From)]
pub struct Category(domain::Category);

/// A category listings belong to.
#[graphql_object(context = Context)]
impl Category {
    /// Unique identifier of this `Category`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Human-readable name of this `Category`.
    pub fn name(&self) -> &str {
        self.0.name.as_ref()
    }

    /// Slug of this `Category`.
    pub fn slug(&self) -> scalar::Slug {
        self.0.slug.clone().into()
    }
}

/// Unique identifier of a `Category`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "CategoryId", with = scalar::Via::<domain::category::Id>)]
pub struct Id(domain::category::Id);
