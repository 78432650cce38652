//! GraphQL [`Query`]s definitions.

use futures::future;
use juniper::graphql_object;
use service::{
    query,
    read::listing::{
        list::{self, Arguments, Filter, Sort},
        order, SlugLookup,
    },
    Query as _,
};
use tracing as log;

use crate::{
    api::{self, listing, scalar},
    AsError, Context, Error,
};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Fetches the page of `Listing`s matching all the provided criteria,
    /// newest first.
    ///
    /// `tags` match when any of them is attached to a `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            category = ?category.as_ref().map(ToString::to_string),
            city = ?city.as_ref().map(ToString::to_string),
            featured = ?featured,
            gql.name = "listings",
            otel.name = Self::SPAN_NAME,
            page = ?page,
            page_size = ?page_size,
            slug_prefix = ?slug_prefix,
            status = ?status,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "GraphQL arguments")]
    pub async fn listings(
        city: Option<scalar::Slug>,
        category: Option<scalar::Slug>,
        tags: Option<Vec<scalar::Slug>>,
        featured: Option<bool>,
        status: Option<listing::Status>,
        slug_prefix: Option<String>,
        page: Option<i32>,
        page_size: Option<i32>,
        ctx: &Context,
    ) -> Result<listing::Page, Error> {
        let selector = list::Selector {
            arguments: arguments(page, page_size, ctx),
            filter: Filter {
                city: city.map(Into::into),
                category: category.map(Into::into),
                tags: tags.into_iter().flatten().map(Into::into).collect(),
                featured,
                status: status.map(Into::into),
                slug_prefix,
                ..Filter::default()
            },
            sort: Sort::Newest,
        };
        ctx.service()
            .execute(query::listings::List::by(selector))
            .await
            .map(Into::into)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Returns the newest featured `Listing`s.
    ///
    /// If a `city` is provided, but the `Listing`s of it cannot be fetched,
    /// the featured `Listing`s of all the cities are returned instead.
    #[tracing::instrument(
        skip_all,
        fields(
            city = ?city.as_ref().map(ToString::to_string),
            gql.name = "featuredListings",
            limit = ?limit,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn featured_listings(
        limit: Option<i32>,
        city: Option<scalar::Slug>,
        ctx: &Context,
    ) -> Result<Vec<api::Listing>, Error> {
        let limit = limit.map(scalar::count);

        let scoped = if let Some(city) = city {
            let res = ctx
                .service()
                .execute(query::listings::Featured {
                    limit,
                    city: Some(city.into()),
                })
                .await;
            match res {
                Ok(listings) => Some(listings),
                Err(e) => {
                    log::warn!(
                        "city-scoped featured listings cannot be fetched, \
                         falling back to unscoped: {e}",
                    );
                    None
                }
            }
        } else {
            None
        };
        let listings = if let Some(listings) = scoped {
            listings
        } else {
            ctx.service()
                .execute(query::listings::Featured { limit, city: None })
                .await
                .map_err(AsError::into_error)
                .map_err(ctx.error())?
        };

        Ok(listings.into_iter().map(Into::into).collect())
    }

    /// Returns the `Listing`s displayed on the homepage.
    ///
    /// `latest` ones are manually positioned first, then newest.
    #[tracing::instrument(
        skip_all,
        fields(
            featured_limit = ?featured_limit,
            gql.name = "homepageListings",
            latest_limit = ?latest_limit,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn homepage_listings(
        featured_limit: Option<i32>,
        latest_limit: Option<i32>,
        ctx: &Context,
    ) -> listing::Homepage {
        let svc = ctx.service();
        let latest_limit = latest_limit
            .map_or(svc.config().default_page_size, scalar::count);

        let (featured, latest) = future::join(
            svc.execute(query::listings::Featured {
                limit: featured_limit.map(scalar::count),
                city: None,
            }),
            svc.execute(query::listings::List::by(list::Selector {
                arguments: Arguments::first(latest_limit),
                filter: Filter::default(),
                sort: order::Context::Homepage.sort(),
            })),
        )
        .await;

        listing::Homepage {
            featured: featured
                .map(|ls| ls.into_iter().map(Into::into).collect())
                .map_err(AsError::into_error)
                .map_err(ctx.error()),
            latest: latest
                .map(|page| {
                    order::Context::Homepage
                        .arrange(&page.items)
                        .into_iter()
                        .map(Into::into)
                        .collect()
                })
                .map_err(AsError::into_error)
                .map_err(ctx.error()),
        }
    }

    /// Fetches the page of `Listing`s of the `Category` with the provided
    /// slug in their display order: manually positioned first, then oldest.
    #[tracing::instrument(
        skip_all,
        fields(
            category = %category,
            gql.name = "categoryListings",
            otel.name = Self::SPAN_NAME,
            page = ?page,
            page_size = ?page_size,
        ),
    )]
    pub async fn category_listings(
        category: scalar::Slug,
        page: Option<i32>,
        page_size: Option<i32>,
        ctx: &Context,
    ) -> Result<listing::Page, Error> {
        let selector = list::Selector {
            arguments: arguments(page, page_size, ctx),
            filter: Filter {
                category: Some(category.into()),
                ..Filter::default()
            },
            sort: order::Context::Category.sort(),
        };
        let mut page = ctx
            .service()
            .execute(query::listings::List::by(selector))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        page.items = order::Context::Category.arrange(&page.items);

        Ok(page.into())
    }

    /// Returns the `Listing` with the provided slug, if any.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_AMBIGUOUS` - several `Listing`s share the provided slug.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "listing",
            otel.name = Self::SPAN_NAME,
            slug = %slug,
        ),
    )]
    pub async fn listing(
        slug: scalar::Slug,
        ctx: &Context,
    ) -> Result<Option<api::Listing>, Error> {
        let lookup = ctx
            .service()
            .execute(query::listing::BySlug(slug.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        found(lookup, ctx)
    }

    /// Returns the `Listing` with the provided ID, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "listingById",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn listing_by_id(
        id: listing::Id,
        ctx: &Context,
    ) -> Result<Option<api::Listing>, Error> {
        ctx.service()
            .execute(query::listing::ById::by(id.into()))
            .await
            .map(|l| l.map(Into::into))
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Returns the `Listing` with the provided slug, if it's located in the
    /// `City` and belongs to the `Category` with the provided slugs.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_AMBIGUOUS` - several `Listing`s share the provided slug.
    #[tracing::instrument(
        skip_all,
        fields(
            category = %category,
            city = %city,
            gql.name = "listingAt",
            otel.name = Self::SPAN_NAME,
            slug = %slug,
        ),
    )]
    pub async fn listing_at(
        city: scalar::Slug,
        category: scalar::Slug,
        slug: scalar::Slug,
        ctx: &Context,
    ) -> Result<Option<api::Listing>, Error> {
        let listing = Self::listing(slug, ctx).await?;
        let (city, category) = (city.into(), category.into());

        Ok(listing.filter(|l| l.as_ref().is_placed_in(&city, &category)))
    }

    /// Fetches the page of `Listing`s owned by the user with the provided
    /// ID, newest first.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "listingsByOwner",
            otel.name = Self::SPAN_NAME,
            owner = %owner,
            page = ?page,
            page_size = ?page_size,
        ),
    )]
    pub async fn listings_by_owner(
        owner: api::UserId,
        page: Option<i32>,
        page_size: Option<i32>,
        ctx: &Context,
    ) -> Result<listing::Page, Error> {
        ctx.service()
            .execute(query::listings::ByOwner {
                owner: owner.into(),
                arguments: arguments(page, page_size, ctx),
            })
            .await
            .map(Into::into)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Fetches the whole working set of `Listing`s for reordering them on
    /// the homepage: manually positioned first, then newest.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "homepageCuration",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn homepage_curation(
        ctx: &Context,
    ) -> Result<listing::Page, Error> {
        ctx.service()
            .execute(query::listings::HomepageCuration)
            .await
            .map(Into::into)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Fetches the whole working set of `Listing`s of the `Category` with
    /// the provided slug for reordering them inside it: manually positioned
    /// first, then newest.
    #[tracing::instrument(
        skip_all,
        fields(
            category = %category,
            gql.name = "categoryCuration",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn category_curation(
        category: scalar::Slug,
        ctx: &Context,
    ) -> Result<listing::Page, Error> {
        ctx.service()
            .execute(query::listings::CategoryCuration {
                category: category.into(),
            })
            .await
            .map(Into::into)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }
}

/// Builds pagination [`Arguments`] from the provided GraphQL ones.
fn arguments(
    page: Option<i32>,
    page_size: Option<i32>,
    ctx: &Context,
) -> Arguments {
    Arguments::new(
        page.map(scalar::count),
        page_size.map(scalar::count),
        ctx.service().config().default_page_size,
    )
}

/// Unwraps the single [`api::Listing`] of the provided [`SlugLookup`].
fn found(
    lookup: SlugLookup,
    ctx: &Context,
) -> Result<Option<api::Listing>, Error> {
    match lookup {
        SlugLookup::Absent => Ok(None),
        SlugLookup::Found(l) => Ok(Some((*l).into())),
        SlugLookup::Ambiguous(ls) => {
            log::error!(
                "slug `{}` is shared by {} listings",
                ls.first().map(|l| l.slug.to_string()).unwrap_or_default(),
                ls.len(),
            );
            Err(api::ListingError::Ambiguous.into()).map_err(ctx.error())
        }
    }
}
