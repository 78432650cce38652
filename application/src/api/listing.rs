//! [`Listing`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar};
use service::{domain, read};

use crate::{
    api::{self, scalar},
    Context,
};

/// A listing of the directory.
#[derive(AsRef, Clone, Debug, From, Into)]
pub struct Listing(domain::Listing);

/// A listing of the directory.
#[graphql_object(context = Context)]
impl Listing {
    /// Unique identifier of this `Listing`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Title of this `Listing`.
    pub fn title(&self) -> Title {
        self.0.title.clone().into()
    }

    /// Slug of this `Listing`, unique across the directory.
    pub fn slug(&self) -> scalar::Slug {
        self.0.slug.clone().into()
    }

    /// Description of this `Listing`.
    pub fn description(&self) -> Description {
        self.0.description.clone().into()
    }

    /// Price of this `Listing`, if any.
    pub fn price(&self) -> Option<Price> {
        self.0.price.map(Into::into)
    }

    /// Contact phone of this `Listing`, if any.
    pub fn phone(&self) -> Option<Phone> {
        self.0.phone.clone().map(Into::into)
    }

    /// Contact email of this `Listing`, if any.
    pub fn email(&self) -> Option<Email> {
        self.0.email.clone().map(Into::into)
    }

    /// Address of this `Listing`, if any.
    pub fn address(&self) -> Option<Address> {
        self.0.address.clone().map(Into::into)
    }

    /// `City` this `Listing` is located in, if any.
    pub fn city(&self) -> Option<api::City> {
        self.0.city.clone().map(Into::into)
    }

    /// `Category` this `Listing` belongs to, if any.
    pub fn category(&self) -> Option<api::Category> {
        self.0.category.clone().map(Into::into)
    }

    /// `Tag`s of this `Listing`.
    pub fn tags(&self) -> Vec<api::Tag> {
        self.0.tags.iter().cloned().map(Into::into).collect()
    }

    /// `Image`s of this `Listing`.
    pub fn images(&self) -> Vec<api::Image> {
        self.0.images.iter().cloned().map(Into::into).collect()
    }

    /// Indicator whether this `Listing` is promoted.
    pub fn featured(&self) -> bool {
        self.0.featured
    }

    /// Lifecycle status of this `Listing`.
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// ID of the user owning this `Listing`, if any.
    pub fn owner(&self) -> Option<api::UserId> {
        self.0.owner.map(Into::into)
    }

    /// Manual position of this `Listing` on the homepage.
    ///
    /// `null` means the `Listing` is ordered chronologically.
    pub fn homepage_position(&self) -> Option<i32> {
        self.0.homepage_position.map(Into::into)
    }

    /// Manual position of this `Listing` inside its `Category`.
    ///
    /// `null` means the `Listing` is ordered chronologically.
    pub fn category_position(&self) -> Option<i32> {
        self.0.category_position.map(Into::into)
    }

    /// `DateTime` when this `Listing` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// `DateTime` when this `Listing` was last modified, if it was.
    pub fn updated_at(&self) -> Option<DateTime> {
        self.0.updated_at.map(|at| at.coerce())
    }
}

/// Unique identifier of a `Listing`.
#[derive(
    AsRef,
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    From,
    GraphQLScalar,
    Into,
    PartialEq,
)]
#[graphql(name = "ListingId", with = scalar::Via::<domain::listing::Id>)]
pub struct Id(domain::listing::Id);

/// Title of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingTitle",
    with = scalar::Via::<domain::listing::Title>,
)]
pub struct Title(domain::listing::Title);

/// Free-form description of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingDescription",
    with = scalar::Via::<domain::listing::Description>,
)]
pub struct Description(domain::listing::Description);

/// Non-negative decimal price of a `Listing`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingPrice",
    with = scalar::Via::<domain::listing::Price>,
)]
pub struct Price(domain::listing::Price);

/// Contact phone of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingPhone",
    with = scalar::Via::<domain::listing::Phone>,
)]
pub struct Phone(domain::listing::Phone);

/// Contact email of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingEmail",
    with = scalar::Via::<domain::listing::Email>,
)]
pub struct Email(domain::listing::Email);

/// Address of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingAddress",
    with = scalar::Via::<domain::listing::Address>,
)]
pub struct Address(domain::listing::Address);

/// Lifecycle status of a `Listing`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ListingStatus")]
pub enum Status {
    /// Awaiting moderation.
    Pending,

    /// Published and visible.
    Active,

    /// The offer is closed.
    Sold,

    /// The publication period is over.
    Expired,
}

impl From<domain::listing::Status> for Status {
    fn from(status: domain::listing::Status) -> Self {
        use domain::listing::Status as S;

        match status {
            S::Pending => Self::Pending,
            S::Active => Self::Active,
            S::Sold => Self::Sold,
            S::Expired => Self::Expired,
        }
    }
}

impl From<Status> for domain::listing::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Pending => Self::Pending,
            Status::Active => Self::Active,
            Status::Sold => Self::Sold,
            Status::Expired => Self::Expired,
        }
    }
}

/// Editable attributes of a `Listing`.
///
/// Omitted attributes are cleared, except `status`, which defaults to
/// `PENDING`, and `featured`, which defaults to `false`.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
#[graphql(name = "ListingInput")]
pub struct Input {
    /// Description of the `Listing`.
    pub description: Option<Description>,

    /// Price of the `Listing`.
    pub price: Option<Price>,

    /// Contact phone of the `Listing`.
    pub phone: Option<Phone>,

    /// Contact email of the `Listing`.
    pub email: Option<Email>,

    /// Address of the `Listing`.
    pub address: Option<Address>,

    /// ID of the `City` the `Listing` is located in.
    pub city: Option<api::city::Id>,

    /// ID of the `Category` the `Listing` belongs to.
    pub category: Option<api::category::Id>,

    /// IDs of the `Tag`s of the `Listing`.
    pub tags: Option<Vec<api::tag::Id>>,

    /// IDs of the already uploaded `Image`s of the `Listing`.
    pub images: Option<Vec<api::image::Id>>,

    /// Indicator whether the `Listing` is promoted.
    pub featured: Option<bool>,

    /// Lifecycle status of the `Listing`.
    pub status: Option<Status>,

    /// ID of the user owning the `Listing`.
    pub owner: Option<api::UserId>,
}

impl Input {
    /// Converts this [`Input`] into a [`domain::listing::Draft`] with the
    /// provided identity attributes.
    #[must_use]
    pub fn into_draft(
        self,
        title: Option<Title>,
        slug: Option<scalar::Slug>,
    ) -> domain::listing::Draft {
        let Self {
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
        } = self;

        domain::listing::Draft {
            title: title.map(Into::into),
            slug: slug.map(Into::into),
            description: description.map(Into::into).unwrap_or_default(),
            price: price.map(Into::into),
            phone: phone.map(Into::into),
            email: email.map(Into::into),
            address: address.map(Into::into),
            city: city.map(Into::into),
            category: category.map(Into::into),
            tags: tags.into_iter().flatten().map(Into::into).collect(),
            images: images.into_iter().flatten().map(Into::into).collect(),
            featured: featured.unwrap_or_default(),
            status: status.map(Into::into).unwrap_or_default(),
            owner: owner.map(Into::into),
        }
    }
}

/// Page of `Listing`s.
#[derive(Clone, Debug, From)]
pub struct Page(read::listing::list::Page);

/// Page of `Listing`s.
#[graphql_object(name = "ListingPage", context = Context)]
impl Page {
    /// `Listing`s of this page.
    pub fn items(&self) -> Vec<Listing> {
        self.0.items.iter().cloned().map(Into::into).collect()
    }

    /// Information about this page.
    pub fn page_info(&self) -> PageInfo {
        PageInfo(self.0.info)
    }
}

/// Information about a `ListingPage`.
#[derive(Clone, Copy, Debug)]
pub struct PageInfo(read::listing::list::PageInfo);

/// Information about a `ListingPage`.
#[graphql_object(name = "ListingPageInfo", context = Context)]
impl PageInfo {
    /// Number of the page, starting from `1`.
    pub fn page(&self) -> i32 {
        scalar::int(self.0.page)
    }

    /// Requested size of the page.
    pub fn page_size(&self) -> i32 {
        scalar::int(self.0.page_size)
    }

    /// Total number of `Listing`s matching the request.
    pub fn total(&self) -> i32 {
        scalar::int(self.0.total)
    }

    /// Total number of pages matching the request.
    pub fn page_count(&self) -> i32 {
        scalar::int(self.0.page_count)
    }

    /// Indicator whether there is a page after this one.
    pub fn has_next_page(&self) -> bool {
        self.0.has_next_page()
    }

    /// Indicator whether there is a page before this one.
    pub fn has_previous_page(&self) -> bool {
        self.0.has_previous_page()
    }
}

/// `Listing`s of the homepage.
///
/// Both lists are resolved independently, so one of them failing only nulls
/// its own field.
#[derive(Debug)]
pub struct Homepage {
    /// Newest featured `Listing`s.
    pub featured: Result<Vec<Listing>, crate::Error>,

    /// Newest `Listing`s in the homepage order.
    pub latest: Result<Vec<Listing>, crate::Error>,
}

/// `Listing`s of the homepage.
#[graphql_object(name = "HomepageListings", context = Context)]
impl Homepage {
    /// Newest featured `Listing`s.
    pub fn featured(&self) -> Result<Option<Vec<Listing>>, crate::Error> {
        self.featured.clone().map(Some)
    }

    /// Newest `Listing`s, manually positioned first.
    pub fn latest(&self) -> Result<Option<Vec<Listing>>, crate::Error> {
        self.latest.clone().map(Some)
    }
}
