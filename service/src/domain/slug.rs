//! [`Slug`] definitions.

use std::{str::FromStr, sync::LazyLock};

use derive_more::{AsRef, Display};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// URL-safe identifier of a [`Listing`], [`City`], [`Category`] or [`Tag`].
///
/// [`Category`]: super::Category
/// [`City`]: super::City
/// [`Listing`]: super::Listing
/// [`Tag`]: super::Tag
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Creates a new [`Slug`] if the given `slug` is valid.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Option<Self> {
        let slug = slug.into();
        Self::check(&slug).then_some(Self(slug))
    }

    /// Returns this [`Slug`] as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether the given `slug` is a valid [`Slug`].
    fn check(slug: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Slug`] format:
        /// - Must not be empty;
        /// - Must contain only ASCII alphanumerics, `-` and `_`;
        /// - Must not start/end with a separator.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[A-Za-z0-9]+(?:[-_]+[A-Za-z0-9]+)*$")
                .expect("valid regex")
        });

        let slug = slug.as_ref();
        slug.len() <= 255 && REGEX.is_match(slug)
    }
}

impl FromStr for Slug {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Slug`")
    }
}

#[cfg(test)]
mod spec {
    use super::Slug;

    #[test]
    fn accepts_url_safe_values() {
        for slug in ["acme", "new-york", "flat_42", "A1-b2"] {
            assert!(Slug::new(slug).is_some(), "{slug}");
        }
    }

    #[test]
    fn rejects_malformed_values() {
        for slug in ["", "-acme", "acme-", "new york", "caf\u{e9}", "a/b"] {
            assert!(Slug::new(slug).is_none(), "{slug}");
        }
    }
}
