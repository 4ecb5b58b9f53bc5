//! Site settings routes.

use crate::client::WpClient;
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest};
use crate::query::Query;
use crate::types::{Settings, SettingsUpdate};

const SETTINGS: &str = "wp/v2/settings";

impl WpClient {
    pub fn build_get_settings(&self) -> HttpRequest {
        self.build_request(HttpMethod::Get, SETTINGS, &Query::new())
    }

    pub fn build_update_settings(&self, update: &SettingsUpdate) -> Result<HttpRequest> {
        self.build_json_request(HttpMethod::Post, SETTINGS, &Query::new(), update)
    }

    /// Requires the `manage_options` capability.
    pub fn get_settings(&self) -> Result<Settings> {
        self.fetch(self.build_get_settings())
    }

    pub fn update_settings(&self, update: &SettingsUpdate) -> Result<Settings> {
        self.fetch(self.build_update_settings(update)?)
    }
}
