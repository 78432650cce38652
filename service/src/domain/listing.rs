//! [`Listing`] definitions.

use std::sync::LazyLock;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{category, city, image, tag, user, Category, City, Image, Slug, Tag};

/// Classified listing of the directory.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// [`Title`] of this [`Listing`].
    pub title: Title,

    /// [`Slug`] of this [`Listing`] used for routing.
    pub slug: Slug,

    /// [`Description`] of this [`Listing`].
    pub description: Description,

    /// [`Price`] of this [`Listing`], if any.
    pub price: Option<Price>,

    /// Contact [`Phone`] of this [`Listing`], if any.
    pub phone: Option<Phone>,

    /// Contact [`Email`] of this [`Listing`], if any.
    pub email: Option<Email>,

    /// [`Address`] of this [`Listing`], if any.
    pub address: Option<Address>,

    /// [`City`] this [`Listing`] is located in, if any.
    pub city: Option<City>,

    /// [`Category`] this [`Listing`] belongs to, if any.
    pub category: Option<Category>,

    /// [`Tag`]s of this [`Listing`].
    pub tags: Vec<Tag>,

    /// [`Image`]s of this [`Listing`].
    pub images: Vec<Image>,

    /// Indicator whether this [`Listing`] is promoted.
    pub featured: bool,

    /// Lifecycle [`Status`] of this [`Listing`].
    pub status: Status,

    /// ID of the user owning this [`Listing`], if any.
    pub owner: Option<user::Id>,

    /// Manual [`Position`] of this [`Listing`] on the homepage.
    pub homepage_position: Option<Position>,

    /// Manual [`Position`] of this [`Listing`] inside its [`Category`].
    pub category_position: Option<Position>,

    /// [`DateTime`] when this [`Listing`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Listing`] was last modified, if it was.
    pub updated_at: Option<ModificationDateTime>,
}

impl Listing {
    /// Indicates whether this [`Listing`] is located in the [`City`] and
    /// belongs to the [`Category`] with the provided [`Slug`]s.
    #[must_use]
    pub fn is_placed_in(&self, city: &Slug, category: &Slug) -> bool {
        self.city.as_ref().is_some_and(|c| &c.slug == city)
            && self.category.as_ref().is_some_and(|c| &c.slug == category)
    }
}

/// ID of a [`Listing`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(u64);

/// Title of a [`Listing`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 255
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Free-form description of a [`Listing`].
///
/// May be empty.
#[derive(
    AsRef,
    Clone,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    PartialEq,
    Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        (text.len() <= 65_535).then_some(Self(text))
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("`Description` is too long")
    }
}

/// Price of a [`Listing`].
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Creates a new [`Price`] if the given `amount` is not negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (!amount.is_sign_negative()).then_some(Self(amount))
    }
}

impl FromStr for Price {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse()
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Price`")
    }
}

/// Contact phone number of a [`Listing`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[+]?\d[\d\s().-]{4,23}\d$").expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// Contact email address of a [`Listing`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
        });

        let address = address.as_ref();
        address.len() <= 320 && REGEX.is_match(address)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Postal address of a [`Listing`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Address`].
    fn check(address: impl AsRef<str>) -> bool {
        let address = address.as_ref();
        address.trim() == address && !address.is_empty() && address.len() <= 512
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

define_kind! {
    #[doc = "Lifecycle status of a [`Listing`]."]
    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "lowercase")]
    #[strum(serialize_all = "lowercase")]
    enum Status {
        #[doc = "Awaiting moderation."]
        Pending,

        #[doc = "Published and visible."]
        Active,

        #[doc = "The offer is closed."]
        Sold,

        #[doc = "The publication period is over."]
        Expired,
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Pending
    }
}

/// Manual position of a [`Listing`] overriding its chronological order.
///
/// Lower values are displayed earlier.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Position(i32);

impl Position {
    /// Creates a new [`Position`] if the given `value` is not negative.
    #[must_use]
    pub fn new(value: i32) -> Option<Self> {
        (value >= 0).then_some(Self(value))
    }
}

/// Change of a [`Position`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PositionChange {
    /// Assigns the [`Position`].
    Set(Position),

    /// Removes the [`Position`], returning to the chronological order.
    Clear,
}

impl PositionChange {
    /// Returns the [`Position`] resulting from this [`PositionChange`].
    #[must_use]
    pub fn into_position(self) -> Option<Position> {
        match self {
            Self::Set(pos) => Some(pos),
            Self::Clear => None,
        }
    }
}

impl From<Option<Position>> for PositionChange {
    fn from(pos: Option<Position>) -> Self {
        pos.map_or(Self::Clear, Self::Set)
    }
}

/// Editable attributes of a [`Listing`] submitted to create or replace it.
///
/// Manual [`Position`]s are not a part of it and stay untouched.
#[derive(Clone, Debug, Default)]
pub struct Draft {
    /// [`Title`] of the [`Listing`].
    pub title: Option<Title>,

    /// [`Slug`] of the [`Listing`].
    pub slug: Option<Slug>,

    /// [`Description`] of the [`Listing`].
    pub description: Description,

    /// [`Price`] of the [`Listing`].
    pub price: Option<Price>,

    /// Contact [`Phone`] of the [`Listing`].
    pub phone: Option<Phone>,

    /// Contact [`Email`] of the [`Listing`].
    pub email: Option<Email>,

    /// [`Address`] of the [`Listing`].
    pub address: Option<Address>,

    /// ID of the [`City`] of the [`Listing`].
    pub city: Option<city::Id>,

    /// ID of the [`Category`] of the [`Listing`].
    pub category: Option<category::Id>,

    /// IDs of the [`Tag`]s of the [`Listing`].
    pub tags: Vec<tag::Id>,

    /// IDs of the already uploaded [`Image`]s of the [`Listing`].
    pub images: Vec<image::Id>,

    /// Indicator whether the [`Listing`] is promoted.
    pub featured: bool,

    /// Lifecycle [`Status`] of the [`Listing`].
    pub status: Status,

    /// ID of the user owning the [`Listing`].
    pub owner: Option<user::Id>,
}

/// [`DateTime`] when a [`Listing`] was created.
pub type CreationDateTime = DateTimeOf<(Listing, unit::Creation)>;

/// [`DateTime`] when a [`Listing`] was modified.
pub type ModificationDateTime = DateTimeOf<(Listing, unit::Modification)>;

#[cfg(test)]
pub(crate) mod mock {
    //! [`Listing`] fixtures.

    use std::time::Duration;

    use common::DateTime;

    use crate::domain::Slug;

    use super::{Description, Listing, Status, Title};

    /// Creates a minimal active [`Listing`] created `created_at` seconds
    /// after the Unix epoch.
    pub(crate) fn listing(id: u64, slug: &str, created_at: u64) -> Listing {
        Listing {
            id: id.into(),
            title: Title::new(format!("Listing {id}")).unwrap(),
            slug: Slug::new(slug).unwrap(),
            description: Description::default(),
            price: None,
            phone: None,
            email: None,
            address: None,
            city: None,
            category: None,
            tags: vec![],
            images: vec![],
            featured: false,
            status: Status::Active,
            owner: None,
            homepage_position: None,
            category_position: None,
            created_at: (DateTime::UNIX_EPOCH
                + Duration::from_secs(created_at))
            .coerce(),
            updated_at: None,
        }
    }
}
