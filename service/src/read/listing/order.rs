//! Display order of [`Listing`]s.

use std::cmp::Ordering;

use common::pagination::Order;

use crate::{
    domain::{listing::Position, Listing},
    read::listing::list::Sort,
};

/// Context [`Listing`]s are displayed in, defining their order.
///
/// Manually positioned [`Listing`]s always go first, by ascending
/// [`Position`]. The rest follow by their creation time: newest first on the
/// homepage, oldest first inside a category.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Context {
    /// Homepage, ordered by [`Listing::homepage_position`].
    Homepage,

    /// Category page, ordered by [`Listing::category_position`].
    Category,
}

impl Context {
    /// Returns the manual [`Position`] of the provided [`Listing`] in this
    /// [`Context`].
    #[must_use]
    pub fn position(self, listing: &Listing) -> Option<Position> {
        match self {
            Self::Homepage => listing.homepage_position,
            Self::Category => listing.category_position,
        }
    }

    /// Returns the chronological [`Order`] of not positioned [`Listing`]s in
    /// this [`Context`].
    #[must_use]
    pub const fn fallback(self) -> Order {
        match self {
            Self::Homepage => Order::Descending,
            Self::Category => Order::Ascending,
        }
    }

    /// Returns the [`Sort`] requesting [`Listing`]s from a store in this
    /// [`Context`] order, so every page is a window of it.
    #[must_use]
    pub const fn sort(self) -> Sort {
        match self {
            Self::Homepage => Sort::HomepageCuration,
            Self::Category => Sort::CategoryDisplay,
        }
    }

    /// Compares the provided [`Listing`]s in this [`Context`].
    ///
    /// [`Ordering::Equal`] means the [`Listing`]s keep their relative order.
    #[must_use]
    pub fn compare(self, a: &Listing, b: &Listing) -> Ordering {
        match (self.position(a), self.position(b)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => {
                self.fallback().apply(a.created_at.cmp(&b.created_at))
            }
        }
    }

    /// Arranges the provided [`Listing`]s for displaying in this [`Context`].
    ///
    /// The order is stable, so the equal [`Listing`]s keep their incoming
    /// relative order.
    #[must_use]
    pub fn arrange(self, listings: &[Listing]) -> Vec<Listing> {
        let mut arranged = listings.to_vec();
        arranged.sort_by(|a, b| self.compare(a, b));
        arranged
    }
}
