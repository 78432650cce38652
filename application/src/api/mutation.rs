//! GraphQL [`Mutation`]s definitions.

use juniper::{graphql_object, Nullable};
use service::{
    command,
    domain::listing::{Position, PositionChange},
    Command as _,
};

use crate::{
    api::{self, listing, scalar, ListingError},
    AsError, Context, Error,
};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Changes the manual positions of the `Listing` with the provided ID.
    ///
    /// An omitted position stays unchanged, while `null` returns the
    /// `Listing` to the chronological order. Nothing else is changed.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the provided ID does not
    ///                          exist;
    /// - `INVALID_POSITION` - a provided position is negative.
    #[tracing::instrument(
        skip_all,
        fields(
            category_position = ?category_position,
            gql.name = "updateListingPositions",
            homepage_position = ?homepage_position,
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_listing_positions(
        id: listing::Id,
        homepage_position: Nullable<i32>,
        category_position: Nullable<i32>,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        let homepage = position_change(homepage_position).map_err(ctx.error())?;
        let category = position_change(category_position).map_err(ctx.error())?;

        ctx.service()
            .execute(command::UpdateListingPositions {
                listing_id: id.into(),
                homepage,
                category,
            })
            .await
            .map(Into::into)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Creates a new `Listing`.
    ///
    /// `ListingInput.images` must refer to the `Image`s already uploaded via
    /// the `/upload` endpoint.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `STORE_REJECTED` - the content store rejected the `Listing`, for
    ///                      example, due to an occupied slug.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createListing",
            otel.name = Self::SPAN_NAME,
            slug = %slug,
            title = %title,
        ),
    )]
    pub async fn create_listing(
        title: listing::Title,
        slug: scalar::Slug,
        input: Option<listing::Input>,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        ctx.service()
            .execute(command::CreateListing {
                draft: input
                    .unwrap_or_default()
                    .into_draft(Some(title), Some(slug)),
            })
            .await
            .map(Into::into)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Replaces the editable attributes of the `Listing` with the provided
    /// ID.
    ///
    /// Omitted `title` and `slug` stay unchanged. Manual positions are never
    /// changed.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the provided ID does not
    ///                          exist;
    /// - `STORE_REJECTED` - the content store rejected the `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateListing",
            id = %id,
            otel.name = Self::SPAN_NAME,
            slug = ?slug.as_ref().map(ToString::to_string),
            title = ?title.as_ref().map(ToString::to_string),
        ),
    )]
    pub async fn update_listing(
        id: listing::Id,
        title: Option<listing::Title>,
        slug: Option<scalar::Slug>,
        input: Option<listing::Input>,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        ctx.service()
            .execute(command::UpdateListing {
                listing_id: id.into(),
                draft: input.unwrap_or_default().into_draft(title, slug),
            })
            .await
            .map(Into::into)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Deletes the `Listing` with the provided ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the provided ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteListing",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_listing(
        id: listing::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        ctx.service()
            .execute(command::DeleteListing {
                listing_id: id.into(),
            })
            .await
            .map(|()| true)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }
}

/// Converts the provided GraphQL position into a [`PositionChange`].
fn position_change(
    position: Nullable<i32>,
) -> Result<Option<PositionChange>, Error> {
    match position {
        Nullable::ImplicitNull => Ok(None),
        Nullable::ExplicitNull => Ok(Some(PositionChange::Clear)),
        Nullable::Some(pos) => Position::new(pos)
            .map(|p| Some(PositionChange::Set(p)))
            .ok_or_else(|| ListingError::InvalidPosition.into()),
    }
}

impl AsError for command::update_listing_positions::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::ListingNotExists(_) => Some(ListingError::NotExists.into()),
            Self::Store(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::ListingNotExists(_) => Some(ListingError::NotExists.into()),
            Self::Store(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::delete_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::ListingNotExists(_) => Some(ListingError::NotExists.into()),
            Self::Store(e) => e.try_as_error(),
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use httpmock::{Method::POST, MockServer};
    use juniper::{graphql_value, Nullable};
    use serde_json::json;
    use service::{
        domain::listing::{Position, PositionChange},
        infra::{strapi, Strapi},
    };

    use crate::{api, Context, Service};

    use super::position_change;

    #[tokio::test]
    async fn creates_listing_with_uploaded_images() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                _ = when
                    .method(POST)
                    .path("/api/listings")
                    .body_contains(r#""slug":"acme""#)
                    .body_contains(r#""images":[3,5]"#);
                _ = then.status(200).json_body(json!({"data": {
                    "id": 12,
                    "title": "Acme",
                    "slug": "acme",
                    "description": "",
                    "featured": false,
                    "status": "active",
                    "images": [
                        {"id": 3, "url": "/uploads/a.png"},
                        {"id": 5, "url": "/uploads/b.png"},
                    ],
                    "createdAt": "2024-05-01T09:00:00.000Z",
                }}));
            })
            .await;
        let store = Strapi::new(&strapi::Config {
            base_url: server.base_url(),
            api_token: None,
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        let ctx =
            Context::new(Service::new(service::Config::default(), store));

        let (res, errs) = juniper::execute(
            r#"mutation {
                createListing(
                    title: "Acme",
                    slug: "acme",
                    input: {images: ["3", "5"]},
                ) { id images { id } }
            }"#,
            None,
            &api::schema(),
            &juniper::Variables::new(),
            &ctx,
        )
        .await
        .unwrap();

        mock.assert_async().await;
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            res,
            graphql_value!({"createListing": {
                "id": "12",
                "images": [{"id": "3"}, {"id": "5"}],
            }}),
        );
    }

    #[test]
    fn distinguishes_omitted_and_null_positions() {
        assert_eq!(position_change(Nullable::ImplicitNull).unwrap(), None);
        assert_eq!(
            position_change(Nullable::ExplicitNull).unwrap(),
            Some(PositionChange::Clear),
        );
        assert_eq!(
            position_change(Nullable::Some(2)).unwrap(),
            Position::new(2).map(PositionChange::Set),
        );
    }

    #[test]
    fn rejects_negative_position() {
        let err = position_change(Nullable::Some(-1)).unwrap_err();

        assert_eq!(err.code, "INVALID_POSITION");
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
    }
}
