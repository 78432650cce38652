//! [`Listing`]-related read definitions.

pub mod list;
pub mod order;

use crate::domain::{
    listing::{self, PositionChange},
    Listing,
};

/// Result of looking up a [`Listing`] by its [`Slug`].
///
/// [`Slug`]: crate::domain::Slug
#[derive(Clone, Debug, PartialEq)]
pub enum SlugLookup {
    /// No [`Listing`] has the requested [`Slug`].
    ///
    /// [`Slug`]: crate::domain::Slug
    Absent,

    /// Exactly one [`Listing`] has the requested [`Slug`].
    ///
    /// [`Slug`]: crate::domain::Slug
    Found(Box<Listing>),

    /// Several [`Listing`]s share the requested [`Slug`], which violates its
    /// uniqueness. They are reported in the order returned by the store.
    ///
    /// [`Slug`]: crate::domain::Slug
    Ambiguous(Vec<Listing>),
}

impl SlugLookup {
    /// Classifies the provided [`Listing`]s matching a [`Slug`].
    ///
    /// [`Slug`]: crate::domain::Slug
    #[must_use]
    pub fn from_matches(mut matches: Vec<Listing>) -> Self {
        match matches.len() {
            0 => Self::Absent,
            1 => matches.pop().map_or(Self::Absent, |l| Self::Found(l.into())),
            _ => Self::Ambiguous(matches),
        }
    }

    /// Classifies the provided [`list::Page`] of [`Listing`]s matching a
    /// [`Slug`].
    ///
    /// The reported [`list::PageInfo::total`] is trusted over the number of
    /// the items, so a match beyond the [`list::Page`] is still detected.
    ///
    /// [`Slug`]: crate::domain::Slug
    #[must_use]
    pub fn from_page(page: list::Page) -> Self {
        if page.info.total > 1 {
            Self::Ambiguous(page.items)
        } else {
            Self::from_matches(page.items)
        }
    }

    /// Returns the single found [`Listing`], if any.
    #[must_use]
    pub fn found(self) -> Option<Listing> {
        match self {
            Self::Found(listing) => Some(*listing),
            Self::Absent | Self::Ambiguous(_) => None,
        }
    }
}

/// Partial update of the manual [`Position`]s of a [`Listing`].
///
/// [`None`] leaves the respective [`Position`] unchanged.
///
/// [`Position`]: listing::Position
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PositionsPatch {
    /// ID of the [`Listing`] to update.
    pub id: listing::Id,

    /// Change of the [`Listing::homepage_position`].
    pub homepage: Option<PositionChange>,

    /// Change of the [`Listing::category_position`].
    pub category: Option<PositionChange>,
}

impl PositionsPatch {
    /// Indicates whether this [`PositionsPatch`] changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.homepage.is_none() && self.category.is_none()
    }

    /// Applies this [`PositionsPatch`] to the provided [`Listing`].
    pub fn apply(&self, listing: &mut Listing) {
        if let Some(change) = self.homepage {
            listing.homepage_position = change.into_position();
        }
        if let Some(change) = self.category {
            listing.category_position = change.into_position();
        }
    }
}

/// Replacement of the editable attributes of an existing [`Listing`].
#[derive(Clone, Debug)]
pub struct Replacement {
    /// ID of the [`Listing`] to replace.
    pub id: listing::Id,

    /// New attributes of the [`Listing`].
    pub draft: listing::Draft,
}
