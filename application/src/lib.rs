//! Application provides API for interacting with the [`Service`].

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod api;
pub mod args;
pub mod config;
mod context;
pub mod error;

use std::sync::Arc;

use axum::{
    extract::Multipart,
    response::{IntoResponse, Response},
    Extension, Json,
};
use derive_more::Debug;
use juniper::{http::GraphQLBatchResponse, DefaultScalarValue, ScalarValue};
use juniper_axum::extract::JuniperRequest;
use service::{command, domain, Command as _};
use tracing as log;
// Used in binary.
use tokio as _;
use tower_http as _;
use tracing_subscriber as _;

pub use self::{
    args::Args,
    config::Config,
    context::Context,
    error::{AsError, Error},
};

/// [`Service`] with filled infrastructure dependencies.
///
/// [`Service`]: service::Service
pub type Service = service::Service<service::infra::Strapi>;

/// [`juniper`] GraphQL response.
#[derive(Debug)]
pub struct JuniperResponse<S = DefaultScalarValue>
where
    S: ScalarValue,
{
    /// Status code of the response.
    pub status_code: http::StatusCode,

    /// Underlying GraphQL response.
    #[debug(skip)]
    pub response: GraphQLBatchResponse<S>,
}

impl<S> IntoResponse for JuniperResponse<S>
where
    S: ScalarValue,
{
    fn into_response(self) -> Response {
        let Self {
            status_code,
            response,
        } = self;

        if response.is_ok() {
            Json(response).into_response()
        } else {
            (status_code, Json(response)).into_response()
        }
    }
}

/// GraphQL API handler.
pub async fn graphql(
    Extension(schema): Extension<Arc<api::Schema>>,
    context: Context,
    JuniperRequest(gql_request): JuniperRequest,
) -> JuniperResponse {
    JuniperResponse {
        status_code: context.error_status_code(),
        response: gql_request.execute(&*schema, &context).await,
    }
}

/// Image upload handler.
///
/// Every file field of the `multipart/form-data` body is uploaded as a
/// separate [`domain::Image`], in the order of appearance. Fields without a
/// file name are ignored.
///
/// # Errors
///
/// If the body is malformed, or the content store fails to store the files.
#[tracing::instrument(skip_all, fields(otel.name = "Upload images"))]
pub async fn upload(
    Extension(service): Extension<Service>,
    mut multipart: Multipart,
) -> Result<Json<Vec<domain::Image>>, Error> {
    let mut files = Vec::new();
    while let Some(field) =
        multipart.next_field().await.map_err(AsError::into_error)?
    {
        let Some(name) = field.file_name().map(ToOwned::to_owned) else {
            continue;
        };
        let mime = field.content_type().map(ToOwned::to_owned);
        let bytes = field.bytes().await.map_err(AsError::into_error)?;
        files.push(domain::image::File {
            name,
            mime,
            bytes: bytes.into(),
        });
    }
    log::debug!("uploading {} file(s)", files.len());

    service
        .execute(command::UploadImages { files })
        .await
        .map(Json)
        .map_err(AsError::into_error)
}
