//! [`Command`] for updating attributes of a [`Listing`].

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{listing, Listing},
    infra::{content_store, ContentStore},
    read::listing::Replacement,
    Service,
};

use super::Command;

/// [`Command`] for updating editable attributes of a [`Listing`].
///
/// Manual [`Position`]s of the [`Listing`] stay untouched.
///
/// [`Position`]: listing::Position
#[derive(Clone, Debug)]
pub struct UpdateListing {
    /// ID of the [`Listing`] to be updated.
    pub listing_id: listing::Id,

    /// New attributes of the [`Listing`].
    ///
    /// [`listing::Draft::images`] refer to the already uploaded [`Image`]s.
    ///
    /// [`Image`]: crate::domain::Image
    pub draft: listing::Draft,
}

impl<S> Command<UpdateListing> for Service<S>
where
    S: ContentStore<
        Update<Replacement>,
        Ok = Option<Listing>,
        Err = Traced<content_store::Error>,
    >,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateListing) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateListing { listing_id, draft } = cmd;

        self.store()
            .execute(Update(Replacement {
                id: listing_id,
                draft,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(listing_id))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`UpdateListing`] [`Command`] execution.
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
        command::UploadImages,
        domain::{
            image,
            listing::{self, mock, Position},
        },
        infra::InMemory,
        Command as _, Config, Service,
    };

    use super::{ExecutionError, UpdateListing};

    fn service() -> Service<InMemory> {
        let mut listing = mock::listing(1, "acme", 10);
        listing.homepage_position = Position::new(2);
        Service::new(Config::default(), InMemory::new([listing]))
    }

    #[tokio::test]
    async fn replaces_attributes_keeping_positions() {
        let svc = service();
        let uploaded = svc
            .execute(UploadImages {
                files: vec![image::File {
                    name: "side.webp".into(),
                    mime: None,
                    bytes: vec![1; 4],
                }],
            })
            .await
            .unwrap();

        let updated = svc
            .execute(UpdateListing {
                listing_id: 1.into(),
                draft: listing::Draft {
                    description: listing::Description::new("Open 24/7")
                        .unwrap(),
                    images: uploaded.iter().map(|i| i.id).collect(),
                    featured: true,
                    status: listing::Status::Sold,
                    ..listing::Draft::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(updated.slug.as_str(), "acme");
        assert_eq!(updated.description.to_string(), "Open 24/7");
        assert!(updated.featured);
        assert_eq!(updated.status, listing::Status::Sold);
        assert_eq!(updated.images, uploaded);
        assert_eq!(updated.homepage_position, Position::new(2));
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn fails_on_missing_listing() {
        let svc = service();

        let err = svc
            .execute(UpdateListing {
                listing_id: 9.into(),
                draft: listing::Draft::default(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::ListingNotExists(id) if u64::from(*id) == 9,
        ));
        assert_eq!(svc.store().listings().await.len(), 1);
    }
}
