//! Taxonomy routes.

use std::collections::BTreeMap;

use crate::client::WpClient;
use crate::context::Context;
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest};
use crate::query::{path_segment, Query};
use crate::schema::Schema;
use crate::types::AnyTaxonomy;

const TAXONOMIES: &str = "wp/v2/taxonomies";

impl WpClient {
    /// `post_type` limits the result to taxonomies registered for that type.
    pub fn build_list_taxonomies(&self, context: Context, post_type: Option<&str>) -> HttpRequest {
        let mut query = Query::with_context(context);
        query.push_opt("type", post_type);
        self.build_request(HttpMethod::Get, TAXONOMIES, &query)
    }

    pub fn build_get_taxonomy(&self, slug: &str, context: Context) -> HttpRequest {
        self.build_request(
            HttpMethod::Get,
            &format!("{TAXONOMIES}/{}", path_segment(slug)),
            &Query::with_context(context),
        )
    }

    /// Taxonomies keyed by slug; WordPress returns an object, not an array.
    pub fn list_taxonomies<T: AnyTaxonomy>(
        &self,
        post_type: Option<&str>,
    ) -> Result<BTreeMap<String, T>> {
        let schema = Schema::record(T::schema());
        self.fetch_as(&schema, self.build_list_taxonomies(T::CONTEXT, post_type))
    }

    pub fn get_taxonomy<T: AnyTaxonomy>(&self, slug: &str) -> Result<T> {
        self.fetch(self.build_get_taxonomy(slug, T::CONTEXT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::http::HttpResponse;
    use crate::types::TaxonomyEmbed;

    #[test]
    fn list_taxonomies_decodes_record() {
        let config = ClientConfig::builder("http://wp.test")
            .transport(|req: HttpRequest| -> Result<HttpResponse> {
                assert_eq!(
                    req.url,
                    "http://wp.test/wp-json/wp/v2/taxonomies?context=embed&type=post"
                );
                Ok(HttpResponse::new(
                    200,
                    r#"{
                        "category": {"name": "Categories", "slug": "category", "rest_base": "categories", "rest_namespace": "wp/v2"},
                        "post_tag": {"name": "Tags", "slug": "post_tag", "rest_base": "tags", "rest_namespace": "wp/v2"}
                    }"#,
                ))
            })
            .build()
            .unwrap();
        let client = WpClient::new(config);
        let taxonomies = client.list_taxonomies::<TaxonomyEmbed>(Some("post")).unwrap();
        assert_eq!(taxonomies.len(), 2);
        assert_eq!(taxonomies["post_tag"].rest_base, "tags");
    }

    #[test]
    fn taxonomy_slug_is_escaped() {
        let config = ClientConfig::builder("http://wp.test")
            .transport(crate::transport::NoTransport)
            .build()
            .unwrap();
        let client = WpClient::new(config);
        assert_eq!(
            client.build_get_taxonomy("post_tag", Context::Edit).url,
            "http://wp.test/wp-json/wp/v2/taxonomies/post_tag?context=edit"
        );
        assert_eq!(
            client.build_get_taxonomy("odd?slug#x", Context::View).url,
            "http://wp.test/wp-json/wp/v2/taxonomies/odd%3Fslug%23x?context=view"
        );
    }
}
