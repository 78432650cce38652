//! In-process [`ContentStore`] implementation.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use common::{
    operations::{By, Delete, Insert, Select, Update, Upload},
    pagination::{Order, PageInfo},
    DateTime,
};
use derive_more::{Display, Error as StdError, From};
use tokio::sync::RwLock;
use tracerr::Traced;

use crate::{
    domain::{
        category, city, image,
        listing::{self, Position},
        tag, Category, City, Image, Listing, Tag,
    },
    infra::{
        content_store::{self, document::ListingDocument, Predicate},
        ContentStore,
    },
    read::listing::{
        list::{self, Field},
        PositionsPatch, Replacement,
    },
};

/// [`ContentStore`] keeping everything in memory.
///
/// Evaluates the same [`Predicate`]s, sorts and pagination a remote store
/// does, so it can stand in for one.
#[derive(Clone, Debug, Default)]
pub struct InMemory {
    /// Shared [`State`] of this [`InMemory`] store.
    state: Arc<RwLock<State>>,
}

/// Contents of an [`InMemory`] store.
#[derive(Debug, Default)]
struct State {
    /// Stored [`Listing`]s.
    listings: BTreeMap<listing::Id, Listing>,

    /// Known [`City`] relations.
    cities: HashMap<city::Id, City>,

    /// Known [`Category`] relations.
    categories: HashMap<category::Id, Category>,

    /// Known [`Tag`] relations.
    tags: HashMap<tag::Id, Tag>,

    /// Uploaded [`Image`]s.
    images: HashMap<image::Id, Image>,

    /// Last assigned [`listing::Id`].
    last_listing_id: u64,

    /// Last assigned [`image::Id`].
    last_image_id: u64,
}

impl InMemory {
    /// Creates a new [`InMemory`] store containing the provided
    /// [`Listing`]s.
    ///
    /// Relations of the provided [`Listing`]s become known to the store.
    #[must_use]
    pub fn new(listings: impl IntoIterator<Item = Listing>) -> Self {
        let mut state = State::default();
        for listing in listings {
            state.remember(&listing);
            drop(state.listings.insert(listing.id, listing));
        }
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Makes the provided [`City`] known to this store.
    pub async fn add_city(&self, city: City) {
        drop(self.state.write().await.cities.insert(city.id, city));
    }

    /// Makes the provided [`Category`] known to this store.
    pub async fn add_category(&self, category: Category) {
        let mut state = self.state.write().await;
        drop(state.categories.insert(category.id, category));
    }

    /// Makes the provided [`Tag`] known to this store.
    pub async fn add_tag(&self, tag: Tag) {
        drop(self.state.write().await.tags.insert(tag.id, tag));
    }

    /// Returns all the stored [`Listing`]s ordered by their IDs.
    pub async fn listings(&self) -> Vec<Listing> {
        self.state.read().await.listings.values().cloned().collect()
    }
}

impl State {
    /// Registers relations of the provided [`Listing`] and advances the ID
    /// counters past its IDs.
    fn remember(&mut self, listing: &Listing) {
        self.last_listing_id =
            self.last_listing_id.max(u64::from(listing.id));
        if let Some(city) = &listing.city {
            drop(self.cities.insert(city.id, city.clone()));
        }
        if let Some(category) = &listing.category {
            drop(self.categories.insert(category.id, category.clone()));
        }
        for tag in &listing.tags {
            drop(self.tags.insert(tag.id, tag.clone()));
        }
        for image in &listing.images {
            self.last_image_id = self.last_image_id.max(u64::from(image.id));
            drop(self.images.insert(image.id, image.clone()));
        }
    }

    /// Builds a [`Listing`] out of the provided [`listing::Draft`], resolving
    /// its relations.
    ///
    /// Absent title and slug are taken from the `base` [`Listing`], if any.
    fn materialize(
        &self,
        id: listing::Id,
        draft: listing::Draft,
        base: Option<&Listing>,
    ) -> Result<Listing, Error> {
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

        let now = DateTime::now();
        Ok(Listing {
            id,
            title: title
                .or_else(|| base.map(|l| l.title.clone()))
                .ok_or(Error::MissingAttribute("title"))?,
            slug: slug
                .or_else(|| base.map(|l| l.slug.clone()))
                .ok_or(Error::MissingAttribute("slug"))?,
            description,
            price,
            phone,
            email,
            address,
            city: city
                .map(|id| lookup(&self.cities, id, "City"))
                .transpose()?,
            category: category
                .map(|id| lookup(&self.categories, id, "Category"))
                .transpose()?,
            tags: tags
                .into_iter()
                .map(|id| lookup(&self.tags, id, "Tag"))
                .collect::<Result<_, _>>()?,
            images: images
                .into_iter()
                .map(|id| lookup(&self.images, id, "Image"))
                .collect::<Result<_, _>>()?,
            featured,
            status,
            owner,
            homepage_position: base.and_then(|l| l.homepage_position),
            category_position: base.and_then(|l| l.category_position),
            created_at: base.map_or_else(|| now.coerce(), |l| l.created_at),
            updated_at: base.map(|_| now.coerce()),
        })
    }
}

/// Looks up a relation with the provided ID.
fn lookup<Id, T>(
    catalog: &HashMap<Id, T>,
    id: Id,
    kind: &'static str,
) -> Result<T, Error>
where
    Id: Copy + Eq + std::hash::Hash + Into<u64>,
    T: Clone,
{
    catalog.get(&id).cloned().ok_or_else(|| Error::UnknownRelation {
        kind,
        id: id.into(),
    })
}

/// Compares the provided [`Listing`]s according to the provided
/// [`list::Sort`].
///
/// Absent positions go after the present ones in either direction. Equal
/// [`Listing`]s are ordered by their IDs.
fn compare(sort: list::Sort, a: &Listing, b: &Listing) -> Ordering {
    sort.keys()
        .iter()
        .map(|(field, order)| match field {
            Field::CreatedAt => order.apply(a.created_at.cmp(&b.created_at)),
            Field::HomepagePosition => {
                positioned(*order, a.homepage_position, b.homepage_position)
            }
            Field::CategoryPosition => {
                positioned(*order, a.category_position, b.category_position)
            }
        })
        .find(|o| o.is_ne())
        .unwrap_or_else(|| a.id.cmp(&b.id))
}

/// Compares the provided optional [`Position`]s, placing absent ones last.
fn positioned(
    order: Order,
    a: Option<Position>,
    b: Option<Position>,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => order.apply(a.cmp(&b)),
        (a, b) => a.is_none().cmp(&b.is_none()),
    }
}

impl ContentStore<Select<By<list::Page, list::Selector>>> for InMemory {
    type Ok = list::Page;
    type Err = Traced<content_store::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let list::Selector {
            arguments,
            filter,
            sort,
        } = by.into_inner();
        let predicate = Predicate::from(&filter);

        let state = self.state.read().await;
        let mut matched = Vec::new();
        for listing in state.listings.values() {
            let document =
                serde_json::to_value(ListingDocument::from(listing.clone()))
                    .map_err(tracerr::from_and_wrap!(=> Error))
                    .map_err(tracerr::map_from)?;
            if predicate.matches(&document) {
                matched.push(listing.clone());
            }
        }
        drop(state);

        matched.sort_by(|a, b| compare(sort, a, b));

        let total = matched.len();
        Ok(list::Page::new(
            matched
                .into_iter()
                .skip(arguments.offset())
                .take(arguments.page_size()),
            PageInfo {
                page: arguments.page(),
                page_size: arguments.page_size(),
                total,
                page_count: total.div_ceil(arguments.page_size()),
            },
        ))
    }
}

impl ContentStore<Select<By<Option<Listing>, listing::Id>>> for InMemory {
    type Ok = Option<Listing>;
    type Err = Traced<content_store::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.state.read().await.listings.get(&id).cloned())
    }
}

impl ContentStore<Update<PositionsPatch>> for InMemory {
    type Ok = Option<Listing>;
    type Err = Traced<content_store::Error>;

    async fn execute(
        &self,
        Update(patch): Update<PositionsPatch>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state.write().await;
        Ok(state.listings.get_mut(&patch.id).map(|listing| {
            patch.apply(listing);
            listing.updated_at = Some(DateTime::now().coerce());
            listing.clone()
        }))
    }
}

impl ContentStore<Update<Replacement>> for InMemory {
    type Ok = Option<Listing>;
    type Err = Traced<content_store::Error>;

    async fn execute(
        &self,
        Update(replacement): Update<Replacement>,
    ) -> Result<Self::Ok, Self::Err> {
        let Replacement { id, draft } = replacement;

        let mut state = self.state.write().await;
        let Some(existing) = state.listings.get(&id) else {
            return Ok(None);
        };
        let listing = state
            .materialize(id, draft, Some(existing))
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        drop(state.listings.insert(id, listing.clone()));
        Ok(Some(listing))
    }
}

impl ContentStore<Insert<listing::Draft>> for InMemory {
    type Ok = Listing;
    type Err = Traced<content_store::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<listing::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state.write().await;
        let id = listing::Id::from(state.last_listing_id + 1);
        let listing = state
            .materialize(id, draft, None)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        state.last_listing_id += 1;
        drop(state.listings.insert(id, listing.clone()));
        Ok(listing)
    }
}

impl ContentStore<Delete<listing::Id>> for InMemory {
    /// Indicator whether the [`Listing`] existed.
    type Ok = bool;
    type Err = Traced<content_store::Error>;

    async fn execute(
        &self,
        Delete(id): Delete<listing::Id>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.state.write().await.listings.remove(&id).is_some())
    }
}

impl ContentStore<Upload<Vec<image::File>>> for InMemory {
    type Ok = Vec<Image>;
    type Err = Traced<content_store::Error>;

    async fn execute(
        &self,
        Upload(files): Upload<Vec<image::File>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state.write().await;
        let images = files
            .into_iter()
            .map(|file| {
                state.last_image_id += 1;
                Image {
                    id: state.last_image_id.into(),
                    url: image::Url::new(format!("/uploads/{}", file.name)),
                    name: Some(file.name),
                    alternative_text: None,
                    mime: file.mime,
                    width: None,
                    height: None,
                }
            })
            .collect::<Vec<_>>();

        for image in &images {
            drop(state.images.insert(image.id, image.clone()));
        }
        Ok(images)
    }
}

/// [`InMemory`] store error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Listing`] cannot be encoded for matching.
    #[display("`Listing` cannot be encoded: {_0}")]
    #[from]
    Encode(serde_json::Error),

    /// Required attribute is absent.
    #[display("`{_0}` attribute is required")]
    MissingAttribute(#[error(not(source))] &'static str),

    /// Referenced relation is not known to the store.
    #[display("`{kind}(id: {id})` does not exist")]
    UnknownRelation {
        /// Kind of the relation.
        kind: &'static str,

        /// ID of the relation.
        id: u64,
    },
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Delete, Insert, Select, Update, Upload},
        DateTime,
    };

    use crate::{
        domain::{
            category, city, image,
            listing::{self, mock, Position, PositionChange},
            tag, Category, City, Listing, Slug, Tag,
        },
        infra::{content_store, ContentStore},
        read::listing::{
            list::{Arguments, Filter, Selector, Sort},
            PositionsPatch, Replacement,
        },
    };

    use super::{Error, InMemory};

    fn paris() -> City {
        City {
            id: city::Id::from(1),
            name: city::Name::new("Paris").unwrap(),
            slug: Slug::new("paris").unwrap(),
        }
    }

    fn plumbers() -> Category {
        Category {
            id: category::Id::from(2),
            name: category::Name::new("Plumbers").unwrap(),
            slug: Slug::new("plumbers").unwrap(),
        }
    }

    fn selector(page: i32, page_size: i32, filter: Filter) -> Selector {
        Selector {
            arguments: Arguments::new(Some(page), Some(page_size), 10),
            filter,
            sort: Sort::Newest,
        }
    }

    fn ids(listings: &[Listing]) -> Vec<u64> {
        listings.iter().map(|l| u64::from(l.id)).collect()
    }

    fn store() -> InMemory {
        InMemory::new((1..=5).map(|id| {
            let mut listing = mock::listing(id, &format!("l-{id}"), id * 10);
            if id % 2 == 1 {
                listing.city = Some(paris());
            }
            listing
        }))
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let page = store()
            .execute(Select(By::new(selector(1, 10, Filter::default()))))
            .await
            .unwrap();

        assert_eq!(ids(&page.items), [5, 4, 3, 2, 1]);
        assert_eq!(page.info.total, 5);
        assert_eq!(page.info.page_count, 1);
    }

    #[tokio::test]
    async fn paginates_filtered_listings() {
        let filter = Filter {
            city: Some(Slug::new("paris").unwrap()),
            ..Filter::default()
        };
        let store = store();

        let first = store
            .execute(Select(By::new(selector(1, 2, filter.clone()))))
            .await
            .unwrap();
        let second = store
            .execute(Select(By::new(selector(2, 2, filter.clone()))))
            .await
            .unwrap();
        let beyond = store
            .execute(Select(By::new(selector(3, 2, filter))))
            .await
            .unwrap();

        assert_eq!(ids(&first.items), [5, 3]);
        assert_eq!(ids(&second.items), [1]);
        assert!(beyond.is_empty());
        for page in [&first, &second, &beyond] {
            assert_eq!(page.info.total, 3);
            assert_eq!(page.info.page_count, 2);
        }
    }

    #[tokio::test]
    async fn sorts_curation_with_unpositioned_last() {
        let mut listings: Vec<_> = (1..=4)
            .map(|id| mock::listing(id, &format!("l-{id}"), id * 10))
            .collect();
        listings[0].homepage_position = Position::new(2);
        listings[2].homepage_position = Position::new(0);
        let store = InMemory::new(listings);

        let page = store
            .execute(Select(By::new(Selector {
                arguments: Arguments::first(100),
                filter: Filter::default(),
                sort: Sort::HomepageCuration,
            })))
            .await
            .unwrap();

        assert_eq!(ids(&page.items), [3, 1, 4, 2]);
    }

    #[tokio::test]
    async fn selects_by_id() {
        let store = store();

        let found = store
            .execute(Select(By::<Option<Listing>, _>::new(
                listing::Id::from(3),
            )))
            .await
            .unwrap();
        let missing = store
            .execute(Select(By::<Option<Listing>, _>::new(
                listing::Id::from(42),
            )))
            .await
            .unwrap();

        assert_eq!(found.map(|l| u64::from(l.id)), Some(3));
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn patches_positions() {
        let store = store();

        let updated = store
            .execute(Update(PositionsPatch {
                id: listing::Id::from(2),
                homepage: None,
                category: Some(PositionChange::from(Position::new(5))),
            }))
            .await
            .unwrap()
            .unwrap();
        let missing = store
            .execute(Update(PositionsPatch {
                id: listing::Id::from(42),
                homepage: Some(PositionChange::Clear),
                category: None,
            }))
            .await
            .unwrap();

        assert_eq!(updated.category_position, Position::new(5));
        assert_eq!(updated.homepage_position, None);
        assert!(updated.updated_at.is_some());
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn inserts_with_resolved_relations() {
        let store = InMemory::default();
        store.add_city(paris()).await;
        store.add_category(plumbers()).await;
        store
            .add_tag(Tag {
                id: tag::Id::from(3),
                name: tag::Name::new("Cheap").unwrap(),
                slug: Slug::new("cheap").unwrap(),
            })
            .await;
        let images = store
            .execute(Upload(vec![image::File {
                name: "front.jpg".into(),
                mime: None,
                bytes: vec![1, 2, 3],
            }]))
            .await
            .unwrap();

        let before = DateTime::now();
        let listing = store
            .execute(Insert(listing::Draft {
                title: listing::Title::new("Acme Plumbing"),
                slug: Slug::new("acme-plumbing"),
                city: Some(city::Id::from(1)),
                category: Some(category::Id::from(2)),
                tags: vec![tag::Id::from(3)],
                images: images.iter().map(|i| i.id).collect(),
                ..listing::Draft::default()
            }))
            .await
            .unwrap();

        assert_eq!(u64::from(listing.id), 1);
        assert!(listing.is_placed_in(
            &Slug::new("paris").unwrap(),
            &Slug::new("plumbers").unwrap(),
        ));
        assert_eq!(listing.tags.len(), 1);
        assert_eq!(listing.images, images);
        assert!(listing.created_at >= before.coerce());
        assert_eq!(store.listings().await, [listing]);
    }

    #[tokio::test]
    async fn rejects_unknown_relation() {
        let err = InMemory::default()
            .execute(Insert(listing::Draft {
                title: listing::Title::new("Acme"),
                slug: Slug::new("acme"),
                city: Some(city::Id::from(9)),
                ..listing::Draft::default()
            }))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            content_store::Error::Memory(Error::UnknownRelation {
                kind: "City",
                id: 9,
            }),
        ));
    }

    #[tokio::test]
    async fn replaces_keeping_positions() {
        let mut original = mock::listing(1, "acme", 10);
        original.homepage_position = Position::new(1);
        let store = InMemory::new([original.clone()]);

        let replaced = store
            .execute(Update(Replacement {
                id: original.id,
                draft: listing::Draft {
                    title: listing::Title::new("Acme Renamed"),
                    featured: true,
                    ..listing::Draft::default()
                },
            }))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(replaced.title.to_string(), "Acme Renamed");
        assert_eq!(replaced.slug, original.slug);
        assert!(replaced.featured);
        assert_eq!(replaced.homepage_position, Position::new(1));
        assert_eq!(replaced.created_at, original.created_at);
    }

    #[tokio::test]
    async fn deletes_once() {
        let store = store();

        assert!(store.execute(Delete(listing::Id::from(1))).await.unwrap());
        assert!(!store.execute(Delete(listing::Id::from(1))).await.unwrap());
        assert_eq!(store.listings().await.len(), 4);
    }
}
