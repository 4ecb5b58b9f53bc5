//! Application password routes.

use uuid::Uuid;

use crate::client::WpClient;
use crate::context::{Context, Resource};
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest};
use crate::query::Query;
use crate::schema::Schema;
use crate::types::{ApplicationPassword, ApplicationPasswordInput, Deleted, UserRef};

fn route(user: UserRef) -> String {
    format!("wp/v2/users/{user}/application-passwords")
}

impl WpClient {
    pub fn build_list_application_passwords(&self, user: UserRef) -> HttpRequest {
        self.build_request(
            HttpMethod::Get,
            &route(user),
            &Query::with_context(Context::Edit),
        )
    }

    pub fn build_create_application_password(
        &self,
        user: UserRef,
        input: &ApplicationPasswordInput,
    ) -> Result<HttpRequest> {
        self.build_json_request(
            HttpMethod::Post,
            &route(user),
            &Query::with_context(Context::Edit),
            input,
        )
    }

    pub fn build_delete_application_password(&self, user: UserRef, uuid: Uuid) -> HttpRequest {
        self.build_request(
            HttpMethod::Delete,
            &format!("{}/{uuid}", route(user)),
            &Query::with_context(Context::Edit),
        )
    }

    pub fn list_application_passwords(&self, user: UserRef) -> Result<Vec<ApplicationPassword>> {
        let schema = Schema::array(ApplicationPassword::schema());
        self.fetch_as(&schema, self.build_list_application_passwords(user))
    }

    /// The returned value carries the plaintext password. WordPress never
    /// reveals it again.
    pub fn create_application_password(
        &self,
        user: UserRef,
        input: &ApplicationPasswordInput,
    ) -> Result<ApplicationPassword> {
        self.fetch(self.build_create_application_password(user, input)?)
    }

    pub fn delete_application_password(
        &self,
        user: UserRef,
        uuid: Uuid,
    ) -> Result<Deleted<ApplicationPassword>> {
        self.fetch(self.build_delete_application_password(user, uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::transport::NoTransport;

    #[test]
    fn routes_are_nested_under_the_user() {
        let client = WpClient::new(
            ClientConfig::builder("http://wp.test")
                .transport(NoTransport)
                .build()
                .unwrap(),
        );
        assert_eq!(
            client.build_list_application_passwords(UserRef::Id(3)).url,
            "http://wp.test/wp-json/wp/v2/users/3/application-passwords?context=edit"
        );
        let uuid = Uuid::nil();
        let req = client.build_delete_application_password(UserRef::Me, uuid);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(
            req.url,
            "http://wp.test/wp-json/wp/v2/users/me/application-passwords/\
             00000000-0000-0000-0000-000000000000?context=edit"
        );
    }
}
