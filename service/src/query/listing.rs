//! [`Query`] collection related to a single [`Listing`].

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{listing, Listing, Slug},
    infra::{content_store, ContentStore},
    read::listing::{
        list::{self, Arguments, Filter, Sort},
        SlugLookup,
    },
    Service,
};

use super::{Query, StoreQuery};

/// Number of [`Listing`]s sharing a [`Slug`] fetched for reporting.
const SLUG_MATCHES_LIMIT: usize = 10;

/// Queries a [`Listing`] by its [`listing::Id`].
pub type ById = StoreQuery<By<Option<Listing>, listing::Id>>;

/// Queries a [`Listing`] by its exact [`Slug`].
///
/// Every [`Listing`] sharing the [`Slug`] is reported, so a violated
/// uniqueness is never hidden.
#[derive(Clone, Debug)]
pub struct BySlug(pub Slug);

impl<S> Query<BySlug> for Service<S>
where
    S: ContentStore<
        Select<By<list::Page, list::Selector>>,
        Ok = list::Page,
        Err = Traced<content_store::Error>,
    >,
{
    type Ok = SlugLookup;
    type Err = Traced<content_store::Error>;

    async fn execute(
        &self,
        BySlug(slug): BySlug,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = list::Selector {
            arguments: Arguments::first(SLUG_MATCHES_LIMIT),
            filter: Filter {
                slug: Some(slug),
                ..Filter::default()
            },
            sort: Sort::Newest,
        };
        self.store()
            .execute(Select(By::new(selector)))
            .await
            .map(SlugLookup::from_page)
            .map_err(tracerr::wrap!())
    }
}
