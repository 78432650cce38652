//! Abstractions for page-based pagination.

/// Number of the first [`Page`].
pub const FIRST_PAGE: usize = 1;

/// A page of items, as returned by a paginated source.
#[derive(Clone, Debug)]
pub struct Page<I> {
    /// Items on this [`Page`].
    pub items: Vec<I>,

    /// [`PageInfo`] reported by the source of this [`Page`].
    pub info: PageInfo,
}

impl<I> Page<I> {
    /// Creates a new [`Page`] from the provided items and [`PageInfo`].
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = I>, info: PageInfo) -> Self {
        Self {
            items: items.into_iter().collect(),
            info,
        }
    }

    /// Creates a new empty [`Page`] for the provided [`Arguments`].
    #[must_use]
    pub fn empty(args: Arguments) -> Self {
        Self {
            items: Vec::new(),
            info: PageInfo {
                page: args.page(),
                page_size: args.page_size(),
                total: 0,
                page_count: 0,
            },
        }
    }

    /// Indicates whether this [`Page`] contains no items.
    ///
    /// A page requested beyond the [`PageInfo::page_count`] is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maps items of this [`Page`] keeping its [`PageInfo`] untouched.
    #[must_use]
    pub fn map<J>(self, f: impl FnMut(I) -> J) -> Page<J> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            info: self.info,
        }
    }
}

/// Information about a [`Page`].
///
/// `total` and `page_count` are computed by the source of the [`Page`] and
/// are never recomputed locally.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PageInfo {
    /// Number of this page, starting from [`FIRST_PAGE`].
    pub page: usize,

    /// Requested size of this page.
    pub page_size: usize,

    /// Total number of items matching the request.
    pub total: usize,

    /// Total number of pages matching the request.
    pub page_count: usize,
}

impl PageInfo {
    /// Indicates whether there is a page after this one.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.page < self.page_count
    }

    /// Indicates whether there is a page before this one.
    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.page > FIRST_PAGE
    }
}

/// Pagination arguments.
///
/// Both the page number and the page size are always at least `1`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Arguments {
    /// Requested page number.
    page: usize,

    /// Requested page size.
    page_size: usize,
}

impl Arguments {
    /// Creates new [`Arguments`] normalizing the provided values:
    /// - absent `page` means [`FIRST_PAGE`];
    /// - absent `page_size` means `default_page_size`;
    /// - any value below `1` (or not representable as [`usize`]) is clamped
    ///   to `1`.
    ///
    /// Out-of-range values are never rejected.
    #[must_use]
    pub fn new<Num>(
        page: Option<Num>,
        page_size: Option<Num>,
        default_page_size: Num,
    ) -> Self
    where
        Num: TryInto<usize>,
    {
        Self {
            page: page.map_or(FIRST_PAGE, clamp),
            page_size: clamp(page_size.unwrap_or(default_page_size)),
        }
    }

    /// Creates new [`Arguments`] requesting the [`FIRST_PAGE`] of the
    /// provided size.
    #[must_use]
    pub fn first<Num>(page_size: Num) -> Self
    where
        Num: TryInto<usize>,
    {
        Self::new(None, None, page_size)
    }

    /// Returns the requested page number.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the requested page size.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the number of items preceding the requested page.
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// Clamps the provided value to be at least `1`.
fn clamp<Num: TryInto<usize>>(num: Num) -> usize {
    num.try_into().map_or(1, |n| n.max(1))
}

/// Pagination selector.
#[derive(Clone, Debug)]
pub struct Selector<F, S = ()> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Filter being applied to the result.
    pub filter: F,

    /// Sort being applied to the result.
    pub sort: S,
}

/// Order of sorting.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Order {
    /// Ascending order.
    Ascending,

    /// Descending order.
    Descending,
}

impl Order {
    /// Returns the short notation of this [`Order`] (`asc` or `desc`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// Applies this [`Order`] to the provided ascending [`Ordering`].
    ///
    /// [`Ordering`]: std::cmp::Ordering
    #[must_use]
    pub fn apply(&self, ord: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Self::Ascending => ord,
            Self::Descending => ord.reverse(),
        }
    }
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty, $sort:ty) => {
        #[doc = "A [`Page`] of nodes."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "An information about a [`Page`]."]
        pub type PageInfo = $crate::pagination::PageInfo;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter, $sort>;
    };
}
