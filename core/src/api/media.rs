//! Media routes.

use crate::client::{Page, WpClient};
use crate::context::Context;
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest};
use crate::query::{Paging, Query};
use crate::types::{AnyMedia, Deleted, MediaEdit, MediaInput, MediaType};

const MEDIA: &str = "wp/v2/media";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListMediaArgs {
    pub paging: Paging,
    pub search: Option<String>,
    pub media_type: Option<MediaType>,
    pub mime_type: Option<String>,
    /// Only attachments of these parent posts.
    pub parent: Vec<u64>,
}

/// A file to upload as a new attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl WpClient {
    pub fn build_list_media(&self, context: Context, args: &ListMediaArgs) -> HttpRequest {
        let mut query = Query::with_context(context);
        args.paging.apply(&mut query);
        query
            .push_opt("search", args.search.as_deref())
            .push_opt(
                "media_type",
                args.media_type.map(|t| match t {
                    MediaType::Image => "image",
                    MediaType::File => "file",
                }),
            )
            .push_opt("mime_type", args.mime_type.as_deref())
            .push_list("parent", &args.parent);
        self.build_request(HttpMethod::Get, MEDIA, &query)
    }

    pub fn build_get_media(&self, id: u64, context: Context) -> HttpRequest {
        self.build_request(
            HttpMethod::Get,
            &format!("{MEDIA}/{id}"),
            &Query::with_context(context),
        )
    }

    /// Raw-body upload: the file bytes are the request body and the name
    /// travels in `Content-Disposition`.
    pub fn build_upload_media(&self, upload: &Upload) -> HttpRequest {
        let filename: String = upload
            .filename
            .chars()
            .filter(|c| !matches!(c, '"' | '\\' | '\r' | '\n'))
            .collect();
        let mut request =
            self.build_request(HttpMethod::Post, MEDIA, &Query::with_context(Context::Edit));
        request.set_header("content-type", upload.content_type.as_str());
        request.set_header(
            "content-disposition",
            format!("attachment; filename=\"{filename}\""),
        );
        request.body = Some(upload.bytes.clone());
        request
    }

    pub fn build_update_media(&self, id: u64, input: &MediaInput) -> Result<HttpRequest> {
        self.build_json_request(
            HttpMethod::Post,
            &format!("{MEDIA}/{id}"),
            &Query::with_context(Context::Edit),
            input,
        )
    }

    /// Attachments do not support trashing, so deletion is always forced.
    pub fn build_delete_media(&self, id: u64) -> HttpRequest {
        let mut query = Query::with_context(Context::Edit);
        query.push("force", true);
        self.build_request(HttpMethod::Delete, &format!("{MEDIA}/{id}"), &query)
    }

    pub fn list_media<T: AnyMedia>(&self, args: &ListMediaArgs) -> Result<Page<T>> {
        self.fetch_page(self.build_list_media(T::CONTEXT, args))
    }

    pub fn get_media<T: AnyMedia>(&self, id: u64) -> Result<T> {
        self.fetch(self.build_get_media(id, T::CONTEXT))
    }

    pub fn upload_media(&self, upload: &Upload) -> Result<MediaEdit> {
        self.fetch(self.build_upload_media(upload))
    }

    pub fn update_media(&self, id: u64, input: &MediaInput) -> Result<MediaEdit> {
        self.fetch(self.build_update_media(id, input)?)
    }

    pub fn delete_media(&self, id: u64) -> Result<Deleted<MediaEdit>> {
        self.fetch(self.build_delete_media(id))
    }
}
