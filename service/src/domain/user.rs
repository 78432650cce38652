//! User definitions.
//!
//! Users are managed by the content store itself, so only their identity is
//! modeled here.

use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

/// ID of a user owning a [`Listing`].
///
/// [`Listing`]: super::Listing
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
