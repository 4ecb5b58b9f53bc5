//! Post routes.

use crate::client::{Page, WpClient};
use crate::context::Context;
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest};
use crate::query::{Order, Paging, Query};
use crate::types::{AnyPost, Deleted, PostEdit, PostInput, PostStatus};

const POSTS: &str = "wp/v2/posts";

/// Filters for listing posts. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPostsArgs {
    pub paging: Paging,
    pub search: Option<String>,
    pub status: Vec<PostStatus>,
    pub categories: Vec<u64>,
    pub tags: Vec<u64>,
    pub author: Vec<u64>,
    pub order: Option<Order>,
    /// Field to sort by, e.g. `date`, `title` or `modified`.
    pub orderby: Option<String>,
}

impl WpClient {
    pub fn build_list_posts(&self, context: Context, args: &ListPostsArgs) -> HttpRequest {
        let mut query = Query::with_context(context);
        args.paging.apply(&mut query);
        query
            .push_opt("search", args.search.as_deref())
            .push_list("status", &args.status)
            .push_list("categories", &args.categories)
            .push_list("tags", &args.tags)
            .push_list("author", &args.author)
            .push_opt("order", args.order)
            .push_opt("orderby", args.orderby.as_deref());
        self.build_request(HttpMethod::Get, POSTS, &query)
    }

    pub fn build_get_post(&self, id: u64, context: Context) -> HttpRequest {
        self.build_request(
            HttpMethod::Get,
            &format!("{POSTS}/{id}"),
            &Query::with_context(context),
        )
    }

    pub fn build_create_post(&self, input: &PostInput) -> Result<HttpRequest> {
        self.build_json_request(
            HttpMethod::Post,
            POSTS,
            &Query::with_context(Context::Edit),
            input,
        )
    }

    pub fn build_update_post(&self, id: u64, input: &PostInput) -> Result<HttpRequest> {
        self.build_json_request(
            HttpMethod::Post,
            &format!("{POSTS}/{id}"),
            &Query::with_context(Context::Edit),
            input,
        )
    }

    /// Without `force` the post is moved to the trash.
    pub fn build_delete_post(&self, id: u64, force: bool) -> HttpRequest {
        let mut query = Query::with_context(Context::Edit);
        if force {
            query.push("force", true);
        }
        self.build_request(HttpMethod::Delete, &format!("{POSTS}/{id}"), &query)
    }

    pub fn list_posts<T: AnyPost>(&self, args: &ListPostsArgs) -> Result<Page<T>> {
        self.fetch_page(self.build_list_posts(T::CONTEXT, args))
    }

    pub fn get_post<T: AnyPost>(&self, id: u64) -> Result<T> {
        self.fetch(self.build_get_post(id, T::CONTEXT))
    }

    pub fn create_post(&self, input: &PostInput) -> Result<PostEdit> {
        self.fetch(self.build_create_post(input)?)
    }

    pub fn update_post(&self, id: u64, input: &PostInput) -> Result<PostEdit> {
        self.fetch(self.build_update_post(id, input)?)
    }

    /// Move a post to the trash and return it with status `trash`.
    pub fn trash_post(&self, id: u64) -> Result<PostEdit> {
        self.fetch(self.build_delete_post(id, false))
    }

    /// Delete a post permanently.
    pub fn delete_post(&self, id: u64) -> Result<Deleted<PostEdit>> {
        self.fetch(self.build_delete_post(id, true))
    }
}
