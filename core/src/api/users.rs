//! User routes.

use crate::client::{Page, WpClient};
use crate::context::Context;
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest};
use crate::query::{Order, Paging, Query};
use crate::types::{AnyUser, UserEdit, UserInput, UserRef};

const USERS: &str = "wp/v2/users";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListUsersArgs {
    pub paging: Paging,
    pub search: Option<String>,
    pub roles: Vec<String>,
    /// Only users who authored at least one post.
    pub has_published_posts: Option<bool>,
    pub order: Option<Order>,
    pub orderby: Option<String>,
}

impl WpClient {
    pub fn build_list_users(&self, context: Context, args: &ListUsersArgs) -> HttpRequest {
        let mut query = Query::with_context(context);
        args.paging.apply(&mut query);
        query
            .push_opt("search", args.search.as_deref())
            .push_list("roles", &args.roles)
            .push_opt("has_published_posts", args.has_published_posts)
            .push_opt("order", args.order)
            .push_opt("orderby", args.orderby.as_deref());
        self.build_request(HttpMethod::Get, USERS, &query)
    }

    pub fn build_get_user(&self, user: UserRef, context: Context) -> HttpRequest {
        self.build_request(
            HttpMethod::Get,
            &format!("{USERS}/{user}"),
            &Query::with_context(context),
        )
    }

    pub fn build_create_user(&self, input: &UserInput) -> Result<HttpRequest> {
        self.build_json_request(
            HttpMethod::Post,
            USERS,
            &Query::with_context(Context::Edit),
            input,
        )
    }

    pub fn list_users<T: AnyUser>(&self, args: &ListUsersArgs) -> Result<Page<T>> {
        self.fetch_page(self.build_list_users(T::CONTEXT, args))
    }

    pub fn get_user<T: AnyUser>(&self, id: u64) -> Result<T> {
        self.fetch(self.build_get_user(UserRef::Id(id), T::CONTEXT))
    }

    /// The authenticated user.
    pub fn me<T: AnyUser>(&self) -> Result<T> {
        self.fetch(self.build_get_user(UserRef::Me, T::CONTEXT))
    }

    pub fn create_user(&self, input: &UserInput) -> Result<UserEdit> {
        self.fetch(self.build_create_user(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::transport::NoTransport;

    #[test]
    fn me_route_uses_literal_me() {
        let client = WpClient::new(
            ClientConfig::builder("http://wp.test")
                .transport(NoTransport)
                .build()
                .unwrap(),
        );
        assert_eq!(
            client.build_get_user(UserRef::Me, Context::Edit).url,
            "http://wp.test/wp-json/wp/v2/users/me?context=edit"
        );
        let args = ListUsersArgs {
            roles: vec!["author".to_string(), "editor".to_string()],
            ..ListUsersArgs::default()
        };
        assert_eq!(
            client.build_list_users(Context::View, &args).url,
            "http://wp.test/wp-json/wp/v2/users?context=view&roles=author%2Ceditor"
        );
    }
}
