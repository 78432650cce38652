//! [`ContentStore`] implementations of [`Strapi`].

use common::{
    operations::{By, Delete, Insert, Select, Update, Upload},
    pagination::PageInfo,
};
use reqwest::multipart;
use serde_json::{json, Map, Value};
use tracerr::Traced;

use crate::{
    domain::{image, listing, Image, Listing},
    infra::{
        content_store::{
            self,
            document::{DraftDocument, ListingDocument},
        },
        ContentStore,
    },
    read::listing::{list, PositionsPatch, Replacement},
};

use super::{params, Collection, Error, Single, Strapi, LISTINGS, UPLOAD};

impl ContentStore<Select<By<list::Page, list::Selector>>> for Strapi {
    type Ok = list::Page;
    type Err = Traced<content_store::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();

        let url = self
            .endpoint(LISTINGS)
            .map_err(tracerr::map_from_and_wrap!(=> content_store::Error))?;
        let page: Collection<ListingDocument> = self
            .send(self.client.get(url).query(&params::list(&selector)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> content_store::Error))?;

        let pagination = page.meta.pagination;
        Ok(list::Page::new(
            page.data.into_iter().map(Listing::from),
            PageInfo {
                page: pagination.page,
                page_size: pagination.page_size,
                total: pagination.total,
                page_count: pagination.page_count,
            },
        ))
    }
}

impl ContentStore<Select<By<Option<Listing>, listing::Id>>> for Strapi {
    type Ok = Option<Listing>;
    type Err = Traced<content_store::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let url = self
            .endpoint(&format!("{LISTINGS}/{id}"))
            .map_err(tracerr::map_from_and_wrap!(=> content_store::Error))?;
        let request = self
            .client
            .get(url)
            .query(&params::populate().collect::<Vec<_>>());
        found(self.send::<Single<ListingDocument>>(request).await)
    }
}

impl ContentStore<Update<PositionsPatch>> for Strapi {
    type Ok = Option<Listing>;
    type Err = Traced<content_store::Error>;

    async fn execute(
        &self,
        Update(patch): Update<PositionsPatch>,
    ) -> Result<Self::Ok, Self::Err> {
        let PositionsPatch {
            id,
            homepage,
            category,
        } = patch;

        let mut data = Map::new();
        for (field, change) in
            [("homepagePosition", homepage), ("categoryPosition", category)]
        {
            if let Some(change) = change {
                drop(data.insert(
                    field.to_owned(),
                    change
                        .into_position()
                        .map_or(Value::Null, |p| i32::from(p).into()),
                ));
            }
        }

        self.put(id, Value::Object(data)).await
    }
}

impl ContentStore<Update<Replacement>> for Strapi {
    type Ok = Option<Listing>;
    type Err = Traced<content_store::Error>;

    async fn execute(
        &self,
        Update(replacement): Update<Replacement>,
    ) -> Result<Self::Ok, Self::Err> {
        let Replacement { id, draft } = replacement;

        let data = serde_json::to_value(DraftDocument::from(draft))
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        self.put(id, data).await
    }
}

impl ContentStore<Insert<listing::Draft>> for Strapi {
    type Ok = Listing;
    type Err = Traced<content_store::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<listing::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = self
            .endpoint(LISTINGS)
            .map_err(tracerr::map_from_and_wrap!(=> content_store::Error))?;
        let request = self
            .client
            .post(url)
            .query(&params::populate().collect::<Vec<_>>())
            .json(&json!({ "data": DraftDocument::from(draft) }));

        self.send::<Single<ListingDocument>>(request)
            .await
            .map(|single| single.data.into())
            .map_err(tracerr::map_from_and_wrap!(=> content_store::Error))
    }
}

impl ContentStore<Delete<listing::Id>> for Strapi {
    /// Indicator whether the [`Listing`] existed.
    type Ok = bool;
    type Err = Traced<content_store::Error>;

    async fn execute(
        &self,
        Delete(id): Delete<listing::Id>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = self
            .endpoint(&format!("{LISTINGS}/{id}"))
            .map_err(tracerr::map_from_and_wrap!(=> content_store::Error))?;
        match self.send_raw(self.client.delete(url)).await {
            Ok(_) => Ok(true),
            Err(e) if e.as_ref().is_not_found() => Ok(false),
            Err(e) => Err(e)
                .map_err(tracerr::map_from_and_wrap!(=> content_store::Error)),
        }
    }
}

impl ContentStore<Upload<Vec<image::File>>> for Strapi {
    type Ok = Vec<Image>;
    type Err = Traced<content_store::Error>;

    async fn execute(
        &self,
        Upload(files): Upload<Vec<image::File>>,
    ) -> Result<Self::Ok, Self::Err> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let mut form = multipart::Form::new();
        for image::File { name, mime, bytes } in files {
            let mut part = multipart::Part::bytes(bytes).file_name(name);
            if let Some(mime) = mime {
                part = part
                    .mime_str(&mime)
                    .map_err(tracerr::from_and_wrap!(=> Error))
                    .map_err(tracerr::map_from)?;
            }
            form = form.part("files", part);
        }

        let url = self
            .endpoint(UPLOAD)
            .map_err(tracerr::map_from_and_wrap!(=> content_store::Error))?;
        self.send(self.client.post(url).multipart(form))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> content_store::Error))
    }
}

impl Strapi {
    /// Submits the provided `data` replacing the attributes of the
    /// [`Listing`] with the provided ID.
    ///
    /// [`None`] is returned if the [`Listing`] doesn't exist.
    async fn put(
        &self,
        id: listing::Id,
        data: Value,
    ) -> Result<Option<Listing>, Traced<content_store::Error>> {
        let url = self
            .endpoint(&format!("{LISTINGS}/{id}"))
            .map_err(tracerr::map_from_and_wrap!(=> content_store::Error))?;
        let request = self
            .client
            .put(url)
            .query(&params::populate().collect::<Vec<_>>())
            .json(&json!({ "data": data }));
        found(self.send::<Single<ListingDocument>>(request).await)
    }
}

/// Converts a single [`Listing`] response into an [`Option`], treating a
/// missing one as [`None`].
fn found(
    res: Result<Single<ListingDocument>, Traced<Error>>,
) -> Result<Option<Listing>, Traced<content_store::Error>> {
    match res {
        Ok(single) => Ok(Some(single.data.into())),
        Err(e) if e.as_ref().is_not_found() => Ok(None),
        Err(e) => {
            Err(e).map_err(tracerr::map_from_and_wrap!(=> content_store::Error))
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::operations::{By, Delete, Select, Update, Upload};
    use httpmock::{
        Method::{DELETE, GET, POST, PUT},
        MockServer,
    };
    use serde_json::json;

    use crate::{
        domain::{
            image,
            listing::{self, Position, PositionChange},
            Listing, Slug,
        },
        infra::{
            content_store::{self, strapi},
            ContentStore, Strapi,
        },
        read::listing::{
            list::{Arguments, Filter, Selector, Sort},
            PositionsPatch,
        },
    };

    fn store(server: &MockServer) -> Strapi {
        Strapi::new(&strapi::Config {
            base_url: server.base_url(),
            api_token: Some("token".to_owned().into()),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn document(id: u64, slug: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("Listing {id}"),
            "slug": slug,
            "description": "Best in town",
            "featured": true,
            "status": "active",
            "city": {"id": 1, "name": "Paris", "slug": "paris"},
            "category": {"id": 2, "name": "Plumbers", "slug": "plumbers"},
            "tags": [],
            "images": null,
            "homepagePosition": null,
            "categoryPosition": 4,
            "createdAt": "2024-05-01T09:00:00.000Z",
            "updatedAt": "2024-05-02T09:00:00.000Z",
        })
    }

    fn newest(page_size: i32) -> Selector {
        Selector {
            arguments: Arguments::first(page_size),
            filter: Filter::default(),
            sort: Sort::Newest,
        }
    }

    #[tokio::test]
    async fn lists_listings_passing_pagination_through() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                _ = when
                    .method(GET)
                    .path("/api/listings")
                    .header("authorization", "Bearer token")
                    .query_param("filters[city][slug][$eq]", "paris")
                    .query_param("filters[featured][$eq]", "true")
                    .query_param("pagination[page]", "3")
                    .query_param("pagination[pageSize]", "6")
                    .query_param("sort[0]", "createdAt:desc")
                    .query_param("populate[0]", "images");
                _ = then.status(200).json_body(json!({
                    "data": [document(1, "acme")],
                    "meta": {"pagination": {
                        "page": 3,
                        "pageSize": 6,
                        "pageCount": 4,
                        "total": 19,
                    }},
                }));
            })
            .await;

        let page = store(&server)
            .execute(Select(By::new(Selector {
                arguments: Arguments::new(Some(3), Some(6), 10),
                filter: Filter {
                    city: Some(Slug::new("paris").unwrap()),
                    featured: Some(true),
                    ..Filter::default()
                },
                sort: Sort::Newest,
            })))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].slug.as_str(), "acme");
        assert_eq!(page.items[0].category_position, Position::new(4));
        assert!(page.items[0].images.is_empty());
        assert_eq!(page.info.page, 3);
        assert_eq!(page.info.total, 19);
        assert_eq!(page.info.page_count, 4);
        assert!(page.info.has_next_page());
    }

    #[tokio::test]
    async fn reports_unsuccessful_status() {
        let server = MockServer::start_async().await;
        _ = server
            .mock_async(|when, then| {
                _ = when.method(GET).path("/api/listings");
                _ = then.status(500).json_body(json!({
                    "data": null,
                    "error": {
                        "status": 500,
                        "name": "InternalServerError",
                        "message": "Internal Server Error",
                    },
                }));
            })
            .await;

        let err = store(&server)
            .execute(Select(By::new(newest(10))))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            content_store::Error::Strapi(strapi::Error::Status {
                status,
                message,
            }) if status.as_u16() == 500 && message == "Internal Server Error",
        ));
    }

    #[tokio::test]
    async fn reports_malformed_body() {
        let server = MockServer::start_async().await;
        _ = server
            .mock_async(|when, then| {
                _ = when.method(GET).path("/api/listings");
                _ = then.status(200).body("<html>oops</html>");
            })
            .await;

        let err = store(&server)
            .execute(Select(By::new(newest(10))))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            content_store::Error::Strapi(strapi::Error::Decode(_)),
        ));
    }

    #[tokio::test]
    async fn reports_unreachable_store() {
        let store = Strapi::new(&strapi::Config {
            base_url: "http://127.0.0.1:1".to_owned(),
            ..strapi::Config::default()
        })
        .unwrap();

        let err = store
            .execute(Select(By::new(newest(10))))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            content_store::Error::Strapi(strapi::Error::Request(_)),
        ));
    }

    #[tokio::test]
    async fn missing_listing_is_absent() {
        let server = MockServer::start_async().await;
        _ = server
            .mock_async(|when, then| {
                _ = when.method(GET).path("/api/listings/404");
                _ = then.status(404).json_body(json!({
                    "data": null,
                    "error": {"status": 404, "message": "Not Found"},
                }));
            })
            .await;

        let found = store(&server)
            .execute(Select(By::<Option<Listing>, _>::new(
                listing::Id::from(404),
            )))
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn patches_only_changed_positions() {
        let server = MockServer::start_async().await;
        let mut updated = document(7, "acme");
        updated["homepagePosition"] = json!(3);
        let mock = server
            .mock_async(|when, then| {
                _ = when
                    .method(PUT)
                    .path("/api/listings/7")
                    .json_body(json!({"data": {"homepagePosition": 3}}));
                _ = then.status(200).json_body(json!({"data": updated}));
            })
            .await;

        let listing = store(&server)
            .execute(Update(PositionsPatch {
                id: listing::Id::from(7),
                homepage: Some(PositionChange::from(Position::new(3))),
                category: None,
            }))
            .await
            .unwrap()
            .unwrap();

        mock.assert_async().await;
        assert_eq!(listing.homepage_position, Position::new(3));
        assert_eq!(listing.category_position, Position::new(4));
    }

    #[tokio::test]
    async fn clears_position_with_null() {
        let server = MockServer::start_async().await;
        let mut updated = document(7, "acme");
        updated["categoryPosition"] = json!(null);
        let mock = server
            .mock_async(|when, then| {
                _ = when
                    .method(PUT)
                    .path("/api/listings/7")
                    .json_body(json!({"data": {"categoryPosition": null}}));
                _ = then.status(200).json_body(json!({"data": updated}));
            })
            .await;

        let listing = store(&server)
            .execute(Update(PositionsPatch {
                id: listing::Id::from(7),
                homepage: None,
                category: Some(PositionChange::Clear),
            }))
            .await
            .unwrap()
            .unwrap();

        mock.assert_async().await;
        assert_eq!(listing.category_position, None);
    }

    #[tokio::test]
    async fn deletes_listing() {
        let server = MockServer::start_async().await;
        _ = server
            .mock_async(|when, then| {
                _ = when.method(DELETE).path("/api/listings/7");
                _ = then.status(204);
            })
            .await;
        _ = server
            .mock_async(|when, then| {
                _ = when.method(DELETE).path("/api/listings/8");
                _ = then.status(404);
            })
            .await;
        let store = store(&server);

        assert!(store
            .execute(Delete(listing::Id::from(7)))
            .await
            .unwrap());
        assert!(!store
            .execute(Delete(listing::Id::from(8)))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn reports_failed_deletion() {
        let server = MockServer::start_async().await;
        _ = server
            .mock_async(|when, then| {
                _ = when.method(DELETE).path("/api/listings/9");
                _ = then.status(500);
            })
            .await;

        let err = store(&server)
            .execute(Delete(listing::Id::from(9)))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            content_store::Error::Strapi(strapi::Error::Status { status, .. })
                if status.as_u16() == 500,
        ));
    }

    #[tokio::test]
    async fn uploads_files_as_multipart() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                _ = when
                    .method(POST)
                    .path("/api/upload")
                    .body_contains("name=\"files\"")
                    .body_contains("filename=\"front.jpg\"");
                _ = then.status(200).json_body(json!([{
                    "id": 11,
                    "name": "front.jpg",
                    "url": "/uploads/front.jpg",
                    "alternativeText": null,
                    "mime": "image/jpeg",
                    "width": 800,
                    "height": 600,
                    "size": 12.5,
                }]));
            })
            .await;

        let images = store(&server)
            .execute(Upload(vec![image::File {
                name: "front.jpg".into(),
                mime: Some("image/jpeg".into()),
                bytes: vec![0xFF, 0xD8, 0xFF],
            }]))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(images.len(), 1);
        assert_eq!(u64::from(images[0].id), 11);
        assert_eq!(images[0].url.to_string(), "/uploads/front.jpg");
        assert_eq!(images[0].width, Some(800));
    }
}
