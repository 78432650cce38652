//! [`Listing`] list definitions.

use common::{define_pagination, pagination::Order};

use crate::domain::{listing::Status, user, Listing, Slug};

define_pagination!(Listing, Filter, Sort);

/// Filter for [`Selector`].
///
/// Every present criterion narrows the result, so the criteria are combined
/// with a logical AND. [`Filter::tags`] match when any of them is attached to
/// a [`Listing`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Filter {
    /// [`Slug`] of the [`City`] a [`Listing`] is located in.
    ///
    /// [`City`]: crate::domain::City
    pub city: Option<Slug>,

    /// [`Slug`] of the [`Category`] a [`Listing`] belongs to.
    ///
    /// [`Category`]: crate::domain::Category
    pub category: Option<Slug>,

    /// [`Slug`]s of the [`Tag`]s, any of which a [`Listing`] has.
    ///
    /// Empty means no filtering by [`Tag`]s.
    ///
    /// [`Tag`]: crate::domain::Tag
    pub tags: Vec<Slug>,

    /// Indicator whether a [`Listing`] is featured.
    pub featured: Option<bool>,

    /// Lifecycle [`Status`] of a [`Listing`].
    pub status: Option<Status>,

    /// Exact [`Slug`] of a [`Listing`].
    pub slug: Option<Slug>,

    /// Case-sensitive prefix of a [`Listing`] [`Slug`].
    pub slug_prefix: Option<String>,

    /// ID of the user owning a [`Listing`].
    pub owner: Option<user::Id>,
}

impl Filter {
    /// Indicates whether this [`Filter`] narrows nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let Self {
            city,
            category,
            tags,
            featured,
            status,
            slug,
            slug_prefix,
            owner,
        } = self;

        city.is_none()
            && category.is_none()
            && tags.is_empty()
            && featured.is_none()
            && status.is_none()
            && slug.is_none()
            && slug_prefix.is_none()
            && owner.is_none()
    }
}

/// Sort of [`Selector`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Sort {
    /// Newest [`Listing`]s first.
    #[default]
    Newest,

    /// Manually positioned on the homepage first, then newest.
    HomepageCuration,

    /// Manually positioned inside a category first, then newest.
    CategoryCuration,

    /// Manually positioned inside a category first, then oldest.
    CategoryDisplay,
}

impl Sort {
    /// Returns the [`Field`]s to sort by along with their [`Order`], most
    /// significant first.
    #[must_use]
    pub const fn keys(self) -> &'static [(Field, Order)] {
        match self {
            Self::Newest => &[(Field::CreatedAt, Order::Descending)],
            Self::HomepageCuration => &[
                (Field::HomepagePosition, Order::Ascending),
                (Field::CreatedAt, Order::Descending),
            ],
            Self::CategoryCuration => &[
                (Field::CategoryPosition, Order::Ascending),
                (Field::CreatedAt, Order::Descending),
            ],
            Self::CategoryDisplay => &[
                (Field::CategoryPosition, Order::Ascending),
                (Field::CreatedAt, Order::Ascending),
            ],
        }
    }
}

/// [`Listing`] field a list may be sorted by.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Field {
    /// [`Listing::created_at`].
    CreatedAt,

    /// [`Listing::homepage_position`].
    HomepagePosition,

    /// [`Listing::category_position`].
    CategoryPosition,
}
