//! [`Command`] for updating manual [`Position`]s of a [`Listing`].
//!
//! [`Position`]: listing::Position

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        listing::{self, PositionChange},
        Listing,
    },
    infra::{content_store, ContentStore},
    read::listing::PositionsPatch,
    Service,
};

use super::Command;

/// [`Command`] for updating manual [`Position`]s of a [`Listing`].
///
/// Nothing but the [`Position`]s is touched. Concurrent updates of the same
/// [`Listing`] are not guarded, so the last one wins.
///
/// [`Position`]: listing::Position
#[derive(Clone, Copy, Debug)]
pub struct UpdateListingPositions {
    /// ID of the [`Listing`] to be updated.
    pub listing_id: listing::Id,

    /// Change of the [`Listing::homepage_position`], if any.
    pub homepage: Option<PositionChange>,

    /// Change of the [`Listing::category_position`], if any.
    pub category: Option<PositionChange>,
}

impl<S> Command<UpdateListingPositions> for Service<S>
where
    S: ContentStore<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<content_store::Error>,
        > + ContentStore<
            Update<PositionsPatch>,
            Ok = Option<Listing>,
            Err = Traced<content_store::Error>,
        >,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateListingPositions,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateListingPositions {
            listing_id,
            homepage,
            category,
        } = cmd;

        let patch = PositionsPatch {
            id: listing_id,
            homepage,
            category,
        };
        let listing = if patch.is_empty() {
            self.store()
                .execute(Select(By::<Option<Listing>, _>::new(listing_id)))
                .await
        } else {
            self.store().execute(Update(patch)).await
        };

        listing
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(listing_id))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`UpdateListingPositions`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Listing`] with the provided ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// [`ContentStore`] error.
    #[display("`ContentStore` operation failed: {_0}")]
    #[from]
    Store(content_store::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::listing::{mock, Position, PositionChange},
        infra::InMemory,
        Command as _, Config, Service,
    };

    use super::{ExecutionError, UpdateListingPositions};

    fn service() -> Service<InMemory> {
        let mut listing = mock::listing(1, "acme", 10);
        listing.category_position = Position::new(4);
        Service::new(Config::default(), InMemory::new([listing]))
    }

    #[tokio::test]
    async fn changes_only_requested_position() {
        let svc = service();
        let before = svc.store().listings().await.remove(0);

        let updated = svc
            .execute(UpdateListingPositions {
                listing_id: 1.into(),
                homepage: Some(PositionChange::from(Position::new(3))),
                category: None,
            })
            .await
            .unwrap();
        let stored = svc.store().listings().await.remove(0);

        assert_eq!(updated, stored);
        assert_eq!(stored.homepage_position, Position::new(3));
        assert_eq!(stored.category_position, Position::new(4));
        assert_eq!(stored.title, before.title);
        assert_eq!(stored.slug, before.slug);
        assert_eq!(stored.featured, before.featured);
        assert_eq!(stored.created_at, before.created_at);
    }

    #[tokio::test]
    async fn clears_position() {
        let svc = service();

        let updated = svc
            .execute(UpdateListingPositions {
                listing_id: 1.into(),
                homepage: None,
                category: Some(PositionChange::Clear),
            })
            .await
            .unwrap();

        assert_eq!(updated.category_position, None);
    }

    #[tokio::test]
    async fn repeated_update_is_idempotent_in_effect() {
        let svc = service();
        let cmd = UpdateListingPositions {
            listing_id: 1.into(),
            homepage: Some(PositionChange::from(Position::new(2))),
            category: Some(PositionChange::from(Position::new(0))),
        };

        let first = svc.execute(cmd).await.unwrap();
        let second = svc.execute(cmd).await.unwrap();

        assert_eq!(first.homepage_position, second.homepage_position);
        assert_eq!(first.category_position, second.category_position);
    }

    #[tokio::test]
    async fn empty_update_writes_nothing() {
        let svc = service();

        let listing = svc
            .execute(UpdateListingPositions {
                listing_id: 1.into(),
                homepage: None,
                category: None,
            })
            .await
            .unwrap();

        assert_eq!(listing.updated_at, None);
        assert_eq!(listing.category_position, Position::new(4));
    }

    #[tokio::test]
    async fn fails_on_missing_listing() {
        let svc = service();

        for homepage in [None, Some(PositionChange::Clear)] {
            let err = svc
                .execute(UpdateListingPositions {
                    listing_id: 2.into(),
                    homepage,
                    category: None,
                })
                .await
                .unwrap_err();

            assert!(matches!(
                err.as_ref(),
                ExecutionError::ListingNotExists(id) if u64::from(*id) == 2,
            ));
        }
    }
}
