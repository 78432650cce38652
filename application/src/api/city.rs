//! [`City`]-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;

use crate::{api::scalar, Context};

/// A city listings are located in.
#[derive(Clone, Debug, From)]
pub struct City(domain::City);

/// A city listings are located in.
#[graphql_object(context = Context)]
impl City {
    /// Unique identifier of this `City`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Human-readable name of this `City`.
    pub fn name(&self) -> &str {
        self.0.name.as_ref()
    }

    /// Slug of this `City`.
    pub fn slug(&self) -> scalar::Slug {
        self.0.slug.clone().into()
    }
}

/// Unique identifier of a `City`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "CityId", with = scalar::Via::<domain::city::Id>)]
pub struct Id(domain::city::Id);
