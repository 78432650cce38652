//! [`Command`] for deleting a [`Listing`].

use common::operations::Delete;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Listing;
use crate::{
    domain::listing,
    infra::{content_store, ContentStore},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Listing`].
#[derive(Clone, Copy, Debug)]
pub struct DeleteListing {
    /// ID of the [`Listing`] to be deleted.
    pub listing_id: listing::Id,
}

impl<S> Command<DeleteListing> for Service<S>
where
    S: ContentStore<
        Delete<listing::Id>,
        Ok = bool,
        Err = Traced<content_store::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteListing) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let existed = self
            .store()
            .execute(Delete(cmd.listing_id))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !existed {
            return Err(tracerr::new!(E::ListingNotExists(cmd.listing_id)));
        }

        Ok(())
    }
}

/// Error of [`DeleteListing`] [`Command`] execution.
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
        domain::listing::mock, infra::InMemory, Command as _, Config, Service,
    };

    use super::{DeleteListing, ExecutionError};

    #[tokio::test]
    async fn deletes_existing_listing_once() {
        let svc = Service::new(
            Config::default(),
            InMemory::new([mock::listing(1, "acme", 10)]),
        );
        let cmd = DeleteListing {
            listing_id: 1.into(),
        };

        svc.execute(cmd).await.unwrap();
        let err = svc.execute(cmd).await.unwrap_err();

        assert!(svc.store().listings().await.is_empty());
        assert!(matches!(
            err.as_ref(),
            ExecutionError::ListingNotExists(_),
        ));
    }
}
