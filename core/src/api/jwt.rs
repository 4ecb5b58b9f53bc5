//! JWT authentication plugin routes.
//!
//! The plugin answers failures with the usual error envelope (for example
//! `[jwt_auth] incorrect_password` with status 403), so those surface as
//! `ApiError::RemoteApi` like any other route.

use crate::client::WpClient;
use crate::config::Auth;
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest};
use crate::query::Query;
use crate::types::{JwtCredentials, JwtToken, JwtValidation};

const TOKEN: &str = "jwt-auth/v1/token";
const VALIDATE: &str = "jwt-auth/v1/token/validate";

impl WpClient {
    pub fn build_issue_jwt_token(&self, username: &str, password: &str) -> Result<HttpRequest> {
        let credentials = JwtCredentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let mut request =
            self.build_json_request(HttpMethod::Post, TOKEN, &Query::new(), &credentials)?;
        request
            .headers
            .retain(|(name, _)| !name.eq_ignore_ascii_case("authorization"));
        Ok(request)
    }

    pub fn build_validate_jwt_token(&self, token: &str) -> HttpRequest {
        let mut request = self.build_request(HttpMethod::Post, VALIDATE, &Query::new());
        if let Some(value) = Auth::bearer(token).header_value() {
            request.set_header("authorization", value);
        }
        request
    }

    /// Exchange a username and password for a token. Use the token with
    /// [`Auth::Bearer`] for subsequent calls.
    pub fn issue_jwt_token(&self, username: &str, password: &str) -> Result<JwtToken> {
        self.fetch_as(&JwtToken::schema(), self.build_issue_jwt_token(username, password)?)
    }

    pub fn validate_jwt_token(&self, token: &str) -> Result<JwtValidation> {
        self.fetch_as(&JwtValidation::schema(), self.build_validate_jwt_token(token))
    }
}
