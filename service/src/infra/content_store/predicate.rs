//! Store-agnostic [`Predicate`] over listing documents.

use serde_json::Value;

use crate::read::listing::list::Filter;
#[cfg(doc)]
use crate::{domain::Listing, infra::content_store::document::ListingDocument};

/// Conjunction of [`Condition`]s a [`Listing`] must satisfy.
///
/// An empty [`Predicate`] matches everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Predicate(Vec<Condition>);

impl Predicate {
    /// Creates a new [`Predicate`] out of the provided [`Condition`]s.
    #[must_use]
    pub fn new(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self(conditions.into_iter().collect())
    }

    /// Returns [`Condition`]s of this [`Predicate`].
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.0
    }

    /// Indicates whether this [`Predicate`] matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks whether the provided serialized [`ListingDocument`] satisfies
    /// this [`Predicate`].
    #[must_use]
    pub fn matches(&self, document: &Value) -> bool {
        self.0.iter().all(|c| c.matches(document))
    }
}

impl From<&Filter> for Predicate {
    fn from(filter: &Filter) -> Self {
        use Operator as Op;

        let Filter {
            city,
            category,
            tags,
            featured,
            status,
            slug,
            slug_prefix,
            owner,
        } = filter;

        let mut conditions = Vec::new();
        if let Some(city) = city {
            conditions.push(Condition::new(
                Path::CITY_SLUG,
                Op::Eq(city.as_str().into()),
            ));
        }
        if let Some(category) = category {
            conditions.push(Condition::new(
                Path::CATEGORY_SLUG,
                Op::Eq(category.as_str().into()),
            ));
        }
        if !tags.is_empty() {
            conditions.push(Condition::new(
                Path::TAG_SLUG,
                Op::In(tags.iter().map(|t| t.as_str().into()).collect()),
            ));
        }
        if let Some(featured) = featured {
            conditions.push(Condition::new(
                Path::FEATURED,
                Op::Eq((*featured).into()),
            ));
        }
        if let Some(status) = status {
            conditions.push(Condition::new(
                Path::STATUS,
                Op::Eq(status.as_str().into()),
            ));
        }
        if let Some(slug) = slug {
            conditions
                .push(Condition::new(Path::SLUG, Op::Eq(slug.as_str().into())));
        }
        if let Some(prefix) = slug_prefix {
            conditions.push(Condition::new(
                Path::SLUG,
                Op::StartsWith(prefix.clone()),
            ));
        }
        if let Some(owner) = owner {
            conditions.push(Condition::new(
                Path::OWNER_ID,
                Op::Eq(u64::from(*owner).into()),
            ));
        }

        Self(conditions)
    }
}

/// Single condition of a [`Predicate`].
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    /// [`Path`] to the checked value inside a document.
    pub path: Path,

    /// [`Operator`] checking the value.
    pub operator: Operator,
}

impl Condition {
    /// Creates a new [`Condition`].
    #[must_use]
    pub fn new(path: Path, operator: Operator) -> Self {
        Self { path, operator }
    }

    /// Checks whether the provided document satisfies this [`Condition`].
    ///
    /// Values reached through a to-many relation satisfy it when any of them
    /// does. Missing values never do.
    #[must_use]
    pub fn matches(&self, document: &Value) -> bool {
        let mut values = Vec::new();
        resolve(document, self.path.segments(), &mut values);
        values.into_iter().any(|v| self.operator.accepts(v))
    }
}

/// Collects the values reachable by the provided `path` segments.
fn resolve<'v>(value: &'v Value, path: &[&str], out: &mut Vec<&'v Value>) {
    match (value, path.split_first()) {
        (Value::Array(items), _) => {
            for item in items {
                resolve(item, path, out);
            }
        }
        (_, None) => out.push(value),
        (Value::Object(fields), Some((head, rest))) => {
            if let Some(field) = fields.get(*head) {
                resolve(field, rest, out);
            }
        }
        (
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_),
            Some(_),
        ) => {}
    }
}

/// Path to a value inside a listing document, as a sequence of field names.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Path(&'static [&'static str]);

impl Path {
    /// Slug of the related city.
    pub const CITY_SLUG: Self = Self(&["city", "slug"]);

    /// Slug of the related category.
    pub const CATEGORY_SLUG: Self = Self(&["category", "slug"]);

    /// Slugs of the related tags.
    pub const TAG_SLUG: Self = Self(&["tags", "slug"]);

    /// Featured flag.
    pub const FEATURED: Self = Self(&["featured"]);

    /// Lifecycle status.
    pub const STATUS: Self = Self(&["status"]);

    /// Slug of the listing itself.
    pub const SLUG: Self = Self(&["slug"]);

    /// ID of the owning user.
    pub const OWNER_ID: Self = Self(&["owner", "id"]);

    /// Returns the field names of this [`Path`].
    #[must_use]
    pub fn segments(&self) -> &'static [&'static str] {
        self.0
    }
}

/// Operator of a [`Condition`].
#[derive(Clone, Debug, PartialEq)]
pub enum Operator {
    /// Value equals the given one.
    Eq(Value),

    /// String value starts with the given prefix, case-sensitively.
    StartsWith(String),

    /// Value equals any of the given ones.
    In(Vec<Value>),
}

impl Operator {
    /// Checks whether the provided value satisfies this [`Operator`].
    fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Eq(expected) => value == expected,
            Self::StartsWith(prefix) => {
                value.as_str().is_some_and(|s| s.starts_with(prefix.as_str()))
            }
            Self::In(expected) => expected.contains(value),
        }
    }
}
