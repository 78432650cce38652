//! GraphQL API definitions.

pub mod category;
pub mod city;
pub mod image;
pub mod listing;
mod mutation;
mod query;
pub mod scalar;
pub mod tag;
pub mod user;

use juniper::EmptySubscription;

use crate::{define_error, Context};

pub use self::{
    category::Category, city::City, image::Image, listing::Listing,
    mutation::Mutation, query::Query, tag::Tag, user::Id as UserId,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

/// Creates a new [`Schema`].
#[must_use]
pub fn schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}

define_error! {
    enum ListingError {
        #[code = "LISTING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Listing` does not exist"]
        NotExists,

        #[code = "LISTING_AMBIGUOUS"]
        #[status = CONFLICT]
        #[message = "Several `Listing`s share the requested slug"]
        Ambiguous,

        #[code = "INVALID_POSITION"]
        #[status = BAD_REQUEST]
        #[message = "`Listing` position must not be negative"]
        InvalidPosition,
    }
}
