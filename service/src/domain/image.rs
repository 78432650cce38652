//! [`Image`] definitions.

use derive_more::{AsRef, Debug, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

/// Image attached to a [`Listing`].
///
/// [`Listing`]: super::Listing
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// ID of this [`Image`].
    pub id: Id,

    /// [`Url`] this [`Image`] is served from.
    pub url: Url,

    /// Original file name of this [`Image`].
    #[serde(default)]
    pub name: Option<String>,

    /// Alternative text of this [`Image`].
    #[serde(default)]
    pub alternative_text: Option<String>,

    /// MIME type of this [`Image`].
    #[serde(default)]
    pub mime: Option<String>,

    /// Width of this [`Image`] in pixels.
    #[serde(default)]
    pub width: Option<u32>,

    /// Height of this [`Image`] in pixels.
    #[serde(default)]
    pub height: Option<u32>,
}

/// ID of an [`Image`].
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
    PartialEq,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(u64);

/// URL of an [`Image`], either absolute or relative to the content store.
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Url(String);

impl Url {
    /// Creates a new [`Url`].
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }
}

/// Binary file to be uploaded as an [`Image`].
#[derive(Clone, Debug)]
pub struct File {
    /// Name of this [`File`].
    pub name: String,

    /// MIME type of this [`File`], if known.
    pub mime: Option<String>,

    /// Contents of this [`File`].
    #[debug("{} bytes", bytes.len())]
    pub bytes: Vec<u8>,
}
