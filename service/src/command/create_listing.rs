//! [`Command`] for creating a new [`Listing`].

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::{listing, Listing},
    infra::{content_store, ContentStore},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Listing`].
///
/// [`listing::Draft::images`] refer to the [`Image`]s uploaded beforehand
/// with an [`UploadImages`] [`Command`].
///
/// [`Image`]: crate::domain::Image
/// [`UploadImages`]: super::UploadImages
#[derive(Clone, Debug)]
pub struct CreateListing {
    /// Attributes of a new [`Listing`].
    pub draft: listing::Draft,
}

impl<S> Command<CreateListing> for Service<S>
where
    S: ContentStore<
        Insert<listing::Draft>,
        Ok = Listing,
        Err = Traced<content_store::Error>,
    >,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateListing) -> Result<Self::Ok, Self::Err> {
        self.store()
            .execute(Insert(cmd.draft))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`CreateListing`] [`Command`] execution.
pub type ExecutionError = content_store::Error;

#[cfg(test)]
mod spec {
    use crate::{
        command::UploadImages,
        domain::{image, listing, Slug},
        infra::{content_store, InMemory},
        Command as _, Config, Service,
    };

    use super::CreateListing;

    fn draft(slug: &str) -> listing::Draft {
        listing::Draft {
            title: listing::Title::new("Acme Plumbing"),
            slug: Slug::new(slug),
            status: listing::Status::Active,
            ..listing::Draft::default()
        }
    }

    #[tokio::test]
    async fn refers_uploaded_images() {
        let svc = Service::new(Config::default(), InMemory::default());
        let uploaded = svc
            .execute(UploadImages {
                files: vec![image::File {
                    name: "front.png".into(),
                    mime: Some("image/png".into()),
                    bytes: vec![0x89, 0x50],
                }],
            })
            .await
            .unwrap();

        let listing = svc
            .execute(CreateListing {
                draft: listing::Draft {
                    images: uploaded.iter().map(|i| i.id).collect(),
                    ..draft("acme")
                },
            })
            .await
            .unwrap();

        assert_eq!(listing.images.len(), 1);
        assert_eq!(listing.images[0].name.as_deref(), Some("front.png"));
        assert_eq!(listing.status, listing::Status::Active);
        assert_eq!(svc.store().listings().await, [listing]);
    }

    #[tokio::test]
    async fn requires_title() {
        let svc = Service::new(Config::default(), InMemory::default());

        let err = svc
            .execute(CreateListing {
                draft: listing::Draft {
                    title: None,
                    ..draft("acme")
                },
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), content_store::Error::Memory(_)));
        assert!(svc.store().listings().await.is_empty());
    }
}
