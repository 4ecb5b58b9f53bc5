//! Term routes for categories, tags and custom taxonomies.

use crate::client::{Page, WpClient};
use crate::context::Context;
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest};
use crate::query::{path_segment, Order, Paging, Query};
use crate::types::{AnyTerm, Deleted, TermEdit, TermInput, TermKind};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListTermsArgs {
    pub paging: Paging,
    pub search: Option<String>,
    pub hide_empty: Option<bool>,
    /// Only children of this term (hierarchical taxonomies).
    pub parent: Option<u64>,
    /// Only terms assigned to this post.
    pub post: Option<u64>,
    pub order: Option<Order>,
    pub orderby: Option<String>,
}

fn route(kind: &TermKind) -> String {
    format!("wp/v2/{}", path_segment(kind.rest_base()))
}

impl WpClient {
    pub fn build_list_terms(
        &self,
        kind: &TermKind,
        context: Context,
        args: &ListTermsArgs,
    ) -> HttpRequest {
        let mut query = Query::with_context(context);
        args.paging.apply(&mut query);
        query
            .push_opt("search", args.search.as_deref())
            .push_opt("hide_empty", args.hide_empty)
            .push_opt("parent", args.parent)
            .push_opt("post", args.post)
            .push_opt("order", args.order)
            .push_opt("orderby", args.orderby.as_deref());
        self.build_request(HttpMethod::Get, &route(kind), &query)
    }

    pub fn build_get_term(&self, kind: &TermKind, id: u64, context: Context) -> HttpRequest {
        self.build_request(
            HttpMethod::Get,
            &format!("{}/{id}", route(kind)),
            &Query::with_context(context),
        )
    }

    pub fn build_create_term(&self, kind: &TermKind, input: &TermInput) -> Result<HttpRequest> {
        self.build_json_request(
            HttpMethod::Post,
            &route(kind),
            &Query::with_context(Context::Edit),
            input,
        )
    }

    /// Terms cannot be trashed, so deletion is always forced.
    pub fn build_delete_term(&self, kind: &TermKind, id: u64) -> HttpRequest {
        let mut query = Query::with_context(Context::Edit);
        query.push("force", true);
        self.build_request(HttpMethod::Delete, &format!("{}/{id}", route(kind)), &query)
    }

    pub fn list_terms<T: AnyTerm>(&self, kind: &TermKind, args: &ListTermsArgs) -> Result<Page<T>> {
        self.fetch_page(self.build_list_terms(kind, T::CONTEXT, args))
    }

    pub fn get_term<T: AnyTerm>(&self, kind: &TermKind, id: u64) -> Result<T> {
        self.fetch(self.build_get_term(kind, id, T::CONTEXT))
    }

    pub fn create_term(&self, kind: &TermKind, input: &TermInput) -> Result<TermEdit> {
        self.fetch(self.build_create_term(kind, input)?)
    }

    pub fn delete_term(&self, kind: &TermKind, id: u64) -> Result<Deleted<TermEdit>> {
        self.fetch(self.build_delete_term(kind, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::transport::NoTransport;

    fn client() -> WpClient {
        WpClient::new(
            ClientConfig::builder("http://wp.test")
                .transport(NoTransport)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn category_routes_use_rest_base() {
        let c = client();
        let args = ListTermsArgs {
            hide_empty: Some(true),
            parent: Some(0),
            ..ListTermsArgs::default()
        };
        assert_eq!(
            c.build_list_terms(&TermKind::Categories, Context::View, &args).url,
            "http://wp.test/wp-json/wp/v2/categories?context=view&hide_empty=true&parent=0"
        );
        assert_eq!(
            c.build_get_term(&TermKind::Custom("genres".to_string()), 8, Context::Embed).url,
            "http://wp.test/wp-json/wp/v2/genres/8?context=embed"
        );
    }

    #[test]
    fn custom_rest_base_is_one_path_segment() {
        let kind = TermKind::Custom("genre?x=1#top".to_string());
        assert_eq!(
            client().build_get_term(&kind, 3, Context::View).url,
            "http://wp.test/wp-json/wp/v2/genre%3Fx%3D1%23top/3?context=view"
        );
    }

    #[test]
    fn create_term_sends_only_set_fields() {
        let input = TermInput {
            name: "Rust".to_string(),
            ..TermInput::default()
        };
        let req = client().build_create_term(&TermKind::Tags, &input).unwrap();
        let body: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Rust"}));
    }
}
