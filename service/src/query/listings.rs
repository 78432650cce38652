//! [`Query`] collection related to the multiple [`Listing`]s.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{user, Listing, Slug},
    infra::{content_store, ContentStore},
    read::listing::list::{self, Arguments, Filter, Sort},
    Service,
};

use super::{Query, StoreQuery};

/// Queries a [`list::Page`] of [`Listing`]s matching a [`Filter`].
pub type List = StoreQuery<By<list::Page, list::Selector>>;

/// Queries the newest featured [`Listing`]s.
#[derive(Clone, Debug, Default)]
pub struct Featured {
    /// Maximum number of [`Listing`]s to return.
    ///
    /// [`Config::featured_limit`] is used if [`None`].
    ///
    /// [`Config::featured_limit`]: crate::Config::featured_limit
    pub limit: Option<usize>,

    /// [`Slug`] of the [`City`] to narrow the [`Listing`]s to, if any.
    ///
    /// [`City`]: crate::domain::City
    pub city: Option<Slug>,
}

impl<S> Query<Featured> for Service<S>
where
    S: ContentStore<
        Select<By<list::Page, list::Selector>>,
        Ok = list::Page,
        Err = Traced<content_store::Error>,
    >,
{
    type Ok = Vec<Listing>;
    type Err = Traced<content_store::Error>;

    async fn execute(&self, query: Featured) -> Result<Self::Ok, Self::Err> {
        let Featured { limit, city } = query;

        let selector = list::Selector {
            arguments: Arguments::first(
                limit.unwrap_or(self.config().featured_limit),
            ),
            filter: Filter {
                city,
                featured: Some(true),
                ..Filter::default()
            },
            sort: Sort::Newest,
        };
        self.store()
            .execute(Select(By::new(selector)))
            .await
            .map(|page| page.items)
            .map_err(tracerr::wrap!())
    }
}

/// Queries a [`list::Page`] of [`Listing`]s owned by a user.
#[derive(Clone, Copy, Debug)]
pub struct ByOwner {
    /// ID of the user owning the [`Listing`]s.
    pub owner: user::Id,

    /// Pagination [`Arguments`].
    pub arguments: Arguments,
}

impl<S> Query<ByOwner> for Service<S>
where
    S: ContentStore<
        Select<By<list::Page, list::Selector>>,
        Ok = list::Page,
        Err = Traced<content_store::Error>,
    >,
{
    type Ok = list::Page;
    type Err = Traced<content_store::Error>;

    async fn execute(&self, query: ByOwner) -> Result<Self::Ok, Self::Err> {
        let selector = list::Selector {
            arguments: query.arguments,
            filter: Filter {
                owner: Some(query.owner),
                ..Filter::default()
            },
            sort: Sort::Newest,
        };
        self.store()
            .execute(Select(By::new(selector)))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Queries the whole working set of [`Listing`]s for reordering them on the
/// homepage.
#[derive(Clone, Copy, Debug, Default)]
pub struct HomepageCuration;

impl<S> Query<HomepageCuration> for Service<S>
where
    S: ContentStore<
        Select<By<list::Page, list::Selector>>,
        Ok = list::Page,
        Err = Traced<content_store::Error>,
    >,
{
    type Ok = list::Page;
    type Err = Traced<content_store::Error>;

    async fn execute(
        &self,
        _: HomepageCuration,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = list::Selector {
            arguments: Arguments::first(self.config().curation_page_size),
            filter: Filter::default(),
            sort: Sort::HomepageCuration,
        };
        self.store()
            .execute(Select(By::new(selector)))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Queries the whole working set of [`Listing`]s of a [`Category`] for
/// reordering them inside it.
///
/// [`Category`]: crate::domain::Category
#[derive(Clone, Debug)]
pub struct CategoryCuration {
    /// [`Slug`] of the [`Category`].
    ///
    /// [`Category`]: crate::domain::Category
    pub category: Slug,
}

impl<S> Query<CategoryCuration> for Service<S>
where
    S: ContentStore<
        Select<By<list::Page, list::Selector>>,
        Ok = list::Page,
        Err = Traced<content_store::Error>,
    >,
{
    type Ok = list::Page;
    type Err = Traced<content_store::Error>;

    async fn execute(
        &self,
        query: CategoryCuration,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = list::Selector {
            arguments: Arguments::first(self.config().curation_page_size),
            filter: Filter {
                category: Some(query.category),
                ..Filter::default()
            },
            sort: Sort::CategoryCuration,
        };
        self.store()
            .execute(Select(By::new(selector)))
            .await
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use common::operations::Update;
    use futures::future;

    use crate::{
        domain::{
            category, city,
            listing::{mock, Position},
            Category, City, Listing, Slug,
        },
        infra::InMemory,
        read::listing::{
            list::{Arguments, Filter, Selector, Sort},
            order, PositionsPatch,
        },
        Config, Query as _, Service,
    };

    use super::{
        ByOwner, CategoryCuration, Featured, HomepageCuration, List,
    };

    fn slug(s: &str) -> Slug {
        Slug::new(s).unwrap()
    }

    fn ids(listings: &[Listing]) -> Vec<u64> {
        listings.iter().map(|l| u64::from(l.id)).collect()
    }

    async fn reposition(svc: &Service<InMemory>, patch: PositionsPatch) {
        drop(svc.store().execute(Update(patch)).await.unwrap());
    }

    /// Creates a [`Service`] over eight listings: the odd ones are featured,
    /// the ones divisible by three are in Paris, the even ones are plumbers
    /// owned by the user `7`.
    fn service(config: Config) -> Service<InMemory> {
        let paris = City {
            id: city::Id::from(1),
            name: city::Name::new("Paris").unwrap(),
            slug: slug("paris"),
        };
        let plumbers = Category {
            id: category::Id::from(1),
            name: category::Name::new("Plumbers").unwrap(),
            slug: slug("plumbers"),
        };
        let store = InMemory::new((1..=8).map(|id| {
            let mut l = mock::listing(id, &format!("l-{id}"), id * 100);
            l.featured = id % 2 == 1;
            if id % 3 == 0 {
                l.city = Some(paris.clone());
            }
            if id % 2 == 0 {
                l.category = Some(plumbers.clone());
                l.owner = Some(7.into());
            }
            l
        }));
        Service::new(config, store)
    }

    #[tokio::test]
    async fn lists_by_filter() {
        let svc = service(Config::default());

        let page = svc
            .execute(List::by(Selector {
                arguments: Arguments::new(Some(1), None, 3),
                filter: Filter {
                    featured: Some(false),
                    ..Filter::default()
                },
                sort: Sort::Newest,
            }))
            .await
            .unwrap();

        assert_eq!(ids(&page.items), [8, 6, 4]);
        assert_eq!(page.info.total, 4);
        assert_eq!(page.info.page_count, 2);
    }

    #[tokio::test]
    async fn featured_defaults_to_configured_limit() {
        let svc = service(Config {
            featured_limit: 3,
            ..Config::default()
        });

        let default = svc.execute(Featured::default()).await.unwrap();
        let limited = svc
            .execute(Featured {
                limit: Some(1),
                city: None,
            })
            .await
            .unwrap();

        assert_eq!(ids(&default), [7, 5, 3]);
        assert_eq!(ids(&limited), [7]);
    }

    #[tokio::test]
    async fn scoped_featured_is_a_subset_of_unscoped() {
        let svc = service(Config::default());

        let (unscoped, scoped) = future::join(
            svc.execute(Featured {
                limit: Some(10),
                city: None,
            }),
            svc.execute(Featured {
                limit: Some(10),
                city: Some(slug("paris")),
            }),
        )
        .await;
        let (unscoped, scoped) = (unscoped.unwrap(), scoped.unwrap());

        let in_paris: Vec<_> = unscoped
            .into_iter()
            .filter(|l| {
                l.city.as_ref().is_some_and(|c| c.slug == slug("paris"))
            })
            .collect();
        assert_eq!(ids(&scoped), [3]);
        assert_eq!(scoped, in_paris);
    }

    #[tokio::test]
    async fn lists_by_owner() {
        let svc = service(Config::default());

        let page = svc
            .execute(ByOwner {
                owner: 7.into(),
                arguments: Arguments::new(Some(2), Some(3), 10),
            })
            .await
            .unwrap();
        let foreign = svc
            .execute(ByOwner {
                owner: 8.into(),
                arguments: Arguments::first(10),
            })
            .await
            .unwrap();

        assert_eq!(ids(&page.items), [2]);
        assert_eq!(page.info.total, 4);
        assert!(!page.info.has_next_page());
        assert!(page.info.has_previous_page());
        assert!(foreign.is_empty());
    }

    #[tokio::test]
    async fn curates_homepage_by_position() {
        let svc = service(Config {
            curation_page_size: 4,
            ..Config::default()
        });
        for (id, pos) in [(2, 1), (5, 0)] {
            reposition(&svc, PositionsPatch {
                id: id.into(),
                homepage: Some(Position::new(pos).into()),
                category: None,
            })
            .await;
        }

        let page = svc.execute(HomepageCuration).await.unwrap();

        assert_eq!(ids(&page.items), [5, 2, 8, 7]);
        assert_eq!(page.info.page_size, 4);
        assert_eq!(page.info.total, 8);
    }

    #[tokio::test]
    async fn curates_category_by_position() {
        let svc = service(Config::default());
        reposition(&svc, PositionsPatch {
            id: 4.into(),
            homepage: None,
            category: Some(Position::new(0).into()),
        })
        .await;

        let page = svc
            .execute(CategoryCuration {
                category: slug("plumbers"),
            })
            .await
            .unwrap();

        assert_eq!(ids(&page.items), [4, 8, 6, 2]);
        assert_eq!(page.info.page_size, 100);
    }

    #[tokio::test]
    async fn pages_category_in_display_order() {
        let svc = service(Config::default());
        reposition(&svc, PositionsPatch {
            id: 8.into(),
            homepage: None,
            category: Some(Position::new(0).into()),
        })
        .await;
        let svc = &svc;
        let page = move |n: usize| {
            svc.execute(List::by(Selector {
                arguments: Arguments::new(Some(n), Some(2), 10),
                filter: Filter {
                    category: Some(slug("plumbers")),
                    ..Filter::default()
                },
                sort: order::Context::Category.sort(),
            }))
        };

        let (first, second) = future::join(page(1), page(2)).await;
        let (first, second) = (first.unwrap(), second.unwrap());

        assert_eq!(ids(&first.items), [8, 2]);
        assert_eq!(ids(&second.items), [4, 6]);
        assert_eq!(
            ids(&order::Context::Category.arrange(&first.items)),
            ids(&first.items),
        );
        assert_eq!(first.info.total, 4);
    }
}
