//! [`Command`] for uploading [`Image`]s.

use common::operations::Upload;
use tracerr::Traced;

use crate::{
    domain::{image, Image},
    infra::{content_store, ContentStore},
    Service,
};

use super::Command;

/// [`Command`] for uploading [`Image`]s to be attached to [`Listing`]s.
///
/// [`Listing`]: crate::domain::Listing
#[derive(Clone, Debug, Default)]
pub struct UploadImages {
    /// [`image::File`]s to be uploaded.
    pub files: Vec<image::File>,
}

impl<S> Command<UploadImages> for Service<S>
where
    S: ContentStore<
        Upload<Vec<image::File>>,
        Ok = Vec<Image>,
        Err = Traced<content_store::Error>,
    >,
{
    type Ok = Vec<Image>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UploadImages) -> Result<Self::Ok, Self::Err> {
        if cmd.files.is_empty() {
            return Ok(Vec::new());
        }

        self.store()
            .execute(Upload(cmd.files))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`UploadImages`] [`Command`] execution.
pub type ExecutionError = content_store::Error;
