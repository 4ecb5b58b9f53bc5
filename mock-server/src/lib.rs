//! In-memory imitation of the WordPress REST routes the client talks to.
//!
//! Credentials: the application password `admin` / `secret`, or the JWT
//! issued by `jwt-auth/v1/token` for the same pair.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";
/// `Basic` credentials for `admin:secret`.
pub const BASIC_AUTH: &str = "Basic YWRtaW46c2VjcmV0";
pub const JWT_TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.eyJ1c2VyIjoxfQ.mock";

/// Number of items served by `/wp-json/test/large`, about 12 MB of JSON.
pub const LARGE_LIST_ITEMS: usize = 1_500_000;

const DATE: &str = "2024-03-01T10:00:00";
const DATE_GMT: &str = "2024-03-01T09:00:00";

#[derive(Clone, Debug)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub slug: String,
    pub status: String,
    pub author: u64,
    pub password: String,
    pub sticky: bool,
    pub format: String,
    pub categories: Vec<u64>,
    pub tags: Vec<u64>,
}

#[derive(Deserialize, Default)]
pub struct PostInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub slug: Option<String>,
    pub status: Option<String>,
    pub password: Option<String>,
    pub sticky: Option<bool>,
    pub format: Option<String>,
    pub categories: Option<Vec<u64>>,
    pub tags: Option<Vec<u64>>,
}

#[derive(Clone, Debug)]
pub struct AppPassword {
    pub uuid: Uuid,
    pub app_id: String,
    pub name: String,
}

#[derive(Deserialize)]
pub struct AppPasswordInput {
    pub name: String,
    pub app_id: Option<String>,
}

#[derive(Deserialize)]
pub struct JwtCredentials {
    pub username: String,
    pub password: String,
}

pub struct Site {
    pub posts: BTreeMap<u64, Post>,
    pub next_post_id: u64,
    pub settings: Value,
    pub app_passwords: Vec<AppPassword>,
}

impl Default for Site {
    fn default() -> Self {
        let hello = Post {
            id: 1,
            title: "Hello world!".to_string(),
            content: "Welcome to WordPress.".to_string(),
            excerpt: "Welcome".to_string(),
            slug: "hello-world".to_string(),
            status: "publish".to_string(),
            author: 1,
            password: String::new(),
            sticky: false,
            format: "standard".to_string(),
            categories: vec![1],
            tags: Vec::new(),
        };
        Self {
            posts: BTreeMap::from([(1, hello)]),
            next_post_id: 2,
            settings: json!({
                "title": "Mock Site",
                "description": "Just another WordPress site",
                "url": "http://localhost",
                "email": "admin@example.com",
                "timezone": "",
                "date_format": "F j, Y",
                "time_format": "g:i a",
                "start_of_week": 1,
                "language": "en_US",
                "use_smilies": true,
                "default_category": 1,
                "default_post_format": "0",
                "posts_per_page": 10,
                "show_on_front": "posts",
                "page_on_front": 0,
                "page_for_posts": 0,
                "default_ping_status": "open",
                "default_comment_status": "open",
                "site_logo": null,
                "site_icon": 0
            }),
            app_passwords: Vec::new(),
        }
    }
}

pub type Db = Arc<RwLock<Site>>;

type Params = Query<HashMap<String, String>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Site::default()));
    Router::new()
        .route("/", get(home))
        .route("/bare", get(bare_home))
        .route("/wp-json/wp/v2/posts", get(list_posts).post(create_post))
        .route(
            "/wp-json/wp/v2/posts/{id}",
            get(get_post).post(update_post).delete(delete_post),
        )
        .route("/wp-json/wp/v2/taxonomies", get(list_taxonomies))
        .route("/wp-json/wp/v2/users/{user}", get(get_user))
        .route(
            "/wp-json/wp/v2/users/{user}/application-passwords",
            get(list_app_passwords).post(create_app_password),
        )
        .route(
            "/wp-json/wp/v2/users/{user}/application-passwords/{uuid}",
            delete(delete_app_password),
        )
        .route("/wp-json/wp/v2/settings", get(get_settings).post(update_settings))
        .route("/wp-json/jwt-auth/v1/token", post(issue_token))
        .route("/wp-json/jwt-auth/v1/token/validate", post(validate_token))
        .route("/wp-json/test/php-warning", get(php_warning))
        .route("/wp-json/test/broken", get(broken))
        .route("/wp-json/test/latin1", get(latin1_warning))
        .route("/wp-json/test/large", get(large_list))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// WordPress error envelope.
pub fn wp_error(status: StatusCode, code: &str, message: &str) -> Response {
    let body = json!({
        "code": code,
        "message": message,
        "data": {"status": status.as_u16()}
    });
    (status, Json(body)).into_response()
}

fn base_url(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{host}")
}

fn authenticated(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return false;
    };
    value == BASIC_AUTH || value == format!("Bearer {JWT_TOKEN}")
}

fn context(params: &HashMap<String, String>) -> Result<&str, Response> {
    match params.get("context").map(String::as_str) {
        None => Ok("view"),
        Some(c @ ("view" | "embed" | "edit")) => Ok(c),
        Some(_) => Err(wp_error(
            StatusCode::BAD_REQUEST,
            "rest_invalid_param",
            "Invalid parameter(s): context",
        )),
    }
}

/// Resolve the context and refuse `edit` to anonymous callers.
fn checked_context<'a>(
    params: &'a HashMap<String, String>,
    headers: &HeaderMap,
) -> Result<&'a str, Response> {
    let context = context(params)?;
    if context == "edit" && !authenticated(headers) {
        return Err(wp_error(
            StatusCode::UNAUTHORIZED,
            "rest_forbidden_context",
            "Sorry, you are not allowed to edit posts in this post type.",
        ));
    }
    Ok(context)
}

// --- discovery ---

async fn home(headers: HeaderMap) -> Response {
    let link = format!("<{}/wp-json/>; rel=\"https://api.w.org/\"", base_url(&headers));
    (
        [
            (header::CONTENT_TYPE, "text/html; charset=UTF-8".to_string()),
            (header::LINK, link),
        ],
        "<!doctype html><title>Mock Site</title>",
    )
        .into_response()
}

async fn bare_home() -> Response {
    (
        [(header::CONTENT_TYPE, "text/html; charset=UTF-8")],
        "<!doctype html><title>Not WordPress</title>",
    )
        .into_response()
}

// --- posts ---

pub fn render_post(post: &Post, context: &str, base: &str) -> Value {
    let link = format!("{base}/?p={}", post.id);
    let protected = !post.password.is_empty();
    let rendered_content = format!("<p>{}</p>\n", post.content);
    let rendered_excerpt = format!("<p>{}</p>\n", post.excerpt);
    let mut body = json!({
        "id": post.id,
        "date": DATE,
        "slug": post.slug,
        "type": "post",
        "link": link,
        "title": {"rendered": post.title},
        "author": post.author,
        "excerpt": {"rendered": rendered_excerpt, "protected": protected},
        "featured_media": 0,
    });
    if context == "embed" {
        return body;
    }
    let extra = json!({
        "date_gmt": DATE_GMT,
        "guid": {"rendered": link},
        "modified": DATE,
        "modified_gmt": DATE_GMT,
        "status": post.status,
        "content": {"rendered": rendered_content, "protected": protected},
        "comment_status": "open",
        "ping_status": "open",
        "sticky": post.sticky,
        "template": "",
        "format": post.format,
        "meta": [],
        "categories": post.categories,
        "tags": post.tags,
    });
    merge(&mut body, extra);
    if context == "edit" {
        let edit = json!({
            "guid": {"raw": link, "rendered": link},
            "title": {"raw": post.title, "rendered": post.title},
            "content": {
                "raw": post.content,
                "rendered": rendered_content,
                "protected": protected,
                "block_version": 0
            },
            "excerpt": {"raw": post.excerpt, "rendered": rendered_excerpt, "protected": protected},
            "password": post.password,
            "generated_slug": post.slug,
            "permalink_template": format!("{base}/?p={}", post.id),
        });
        merge(&mut body, edit);
    }
    body
}

fn merge(target: &mut Value, extra: Value) {
    if let (Some(target), Value::Object(extra)) = (target.as_object_mut(), extra) {
        target.extend(extra);
    }
}

fn post_not_found() -> Response {
    wp_error(StatusCode::NOT_FOUND, "rest_post_invalid_id", "Invalid post ID.")
}

async fn list_posts(State(db): State<Db>, headers: HeaderMap, Query(params): Params) -> Response {
    let context = match checked_context(&params, &headers) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let statuses: Vec<&str> = params
        .get("status")
        .map(|s| s.split(',').collect())
        .unwrap_or_else(|| vec!["publish"]);
    if statuses.iter().any(|s| *s != "publish") && !authenticated(&headers) {
        return wp_error(
            StatusCode::BAD_REQUEST,
            "rest_invalid_param",
            "Invalid parameter(s): status",
        );
    }
    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1).max(1);
    let per_page: usize = params
        .get("per_page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(10)
        .clamp(1, 100);
    let search = params.get("search").map(|s| s.to_lowercase());

    let site = db.read().await;
    let matching: Vec<&Post> = site
        .posts
        .values()
        .rev()
        .filter(|p| statuses.contains(&p.status.as_str()))
        .filter(|p| {
            search
                .as_ref()
                .map_or(true, |s| p.title.to_lowercase().contains(s))
        })
        .collect();
    let total = matching.len();
    let total_pages = total.div_ceil(per_page);
    if page > 1 && page > total_pages {
        return wp_error(
            StatusCode::BAD_REQUEST,
            "rest_post_invalid_page_number",
            "The page number requested is larger than the number of pages available.",
        );
    }
    let base = base_url(&headers);
    let items: Vec<Value> = matching
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .map(|p| render_post(p, context, &base))
        .collect();
    (
        [
            ("x-wp-total", total.to_string()),
            ("x-wp-totalpages", total_pages.to_string()),
        ],
        Json(items),
    )
        .into_response()
}

async fn get_post(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Query(params): Params,
) -> Response {
    let context = match checked_context(&params, &headers) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let site = db.read().await;
    match site.posts.get(&id) {
        Some(post) if post.status == "publish" || authenticated(&headers) => {
            Json(render_post(post, context, &base_url(&headers))).into_response()
        }
        _ => post_not_found(),
    }
}

fn apply(post: &mut Post, input: PostInput) {
    if let Some(title) = input.title {
        post.title = title;
    }
    if let Some(content) = input.content {
        post.content = content;
    }
    if let Some(excerpt) = input.excerpt {
        post.excerpt = excerpt;
    }
    if let Some(slug) = input.slug {
        post.slug = slug;
    }
    if let Some(status) = input.status {
        post.status = status;
    }
    if let Some(password) = input.password {
        post.password = password;
    }
    if let Some(sticky) = input.sticky {
        post.sticky = sticky;
    }
    if let Some(format) = input.format {
        post.format = format;
    }
    if let Some(categories) = input.categories {
        post.categories = categories;
    }
    if let Some(tags) = input.tags {
        post.tags = tags;
    }
}

async fn create_post(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<PostInput>,
) -> Response {
    if !authenticated(&headers) {
        return wp_error(
            StatusCode::UNAUTHORIZED,
            "rest_cannot_create",
            "Sorry, you are not allowed to create posts as this user.",
        );
    }
    let mut site = db.write().await;
    let id = site.next_post_id;
    site.next_post_id += 1;
    let mut post = Post {
        id,
        title: String::new(),
        content: String::new(),
        excerpt: String::new(),
        slug: String::new(),
        status: "draft".to_string(),
        author: 1,
        password: String::new(),
        sticky: false,
        format: "standard".to_string(),
        categories: vec![1],
        tags: Vec::new(),
    };
    apply(&mut post, input);
    if post.slug.is_empty() {
        post.slug = post.title.to_lowercase().replace(' ', "-");
    }
    let body = render_post(&post, "edit", &base_url(&headers));
    site.posts.insert(id, post);
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update_post(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(input): Json<PostInput>,
) -> Response {
    if !authenticated(&headers) {
        return wp_error(
            StatusCode::UNAUTHORIZED,
            "rest_cannot_edit",
            "Sorry, you are not allowed to edit this post.",
        );
    }
    let mut site = db.write().await;
    let Some(post) = site.posts.get_mut(&id) else {
        return post_not_found();
    };
    apply(post, input);
    Json(render_post(post, "edit", &base_url(&headers))).into_response()
}

async fn delete_post(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Query(params): Params,
) -> Response {
    if !authenticated(&headers) {
        return wp_error(
            StatusCode::UNAUTHORIZED,
            "rest_cannot_delete",
            "Sorry, you are not allowed to delete this post.",
        );
    }
    let force = params.get("force").is_some_and(|f| f == "true" || f == "1");
    let base = base_url(&headers);
    let mut site = db.write().await;
    if force {
        return match site.posts.remove(&id) {
            Some(post) => Json(json!({
                "deleted": true,
                "previous": render_post(&post, "edit", &base)
            }))
            .into_response(),
            None => post_not_found(),
        };
    }
    let Some(post) = site.posts.get_mut(&id) else {
        return post_not_found();
    };
    if post.status == "trash" {
        return wp_error(
            StatusCode::GONE,
            "rest_already_trashed",
            "The post has already been deleted.",
        );
    }
    post.status = "trash".to_string();
    Json(render_post(post, "edit", &base)).into_response()
}

// --- taxonomies ---

fn taxonomy(name: &str, slug: &str, rest_base: &str, hierarchical: bool) -> Value {
    json!({
        "name": name,
        "slug": slug,
        "description": "",
        "types": ["post"],
        "hierarchical": hierarchical,
        "rest_base": rest_base,
        "rest_namespace": "wp/v2",
        "capabilities": {
            "manage_terms": "manage_categories",
            "edit_terms": "manage_categories",
            "delete_terms": "manage_categories",
            "assign_terms": "edit_posts"
        },
        "labels": {"name": name, "parent_item": null},
        "show_cloud": !hierarchical,
        "visibility": {"public": true, "show_ui": true}
    })
}

async fn list_taxonomies(headers: HeaderMap, Query(params): Params) -> Response {
    if let Err(resp) = checked_context(&params, &headers) {
        return resp;
    }
    Json(json!({
        "category": taxonomy("Categories", "category", "categories", true),
        "post_tag": taxonomy("Tags", "post_tag", "tags", false),
    }))
    .into_response()
}

// --- users ---

fn render_admin(base: &str) -> Value {
    json!({
        "id": 1,
        "username": USERNAME,
        "name": "Admin",
        "first_name": "",
        "last_name": "",
        "email": "admin@example.com",
        "url": base,
        "description": "",
        "link": format!("{base}/author/admin/"),
        "locale": "en_US",
        "nickname": USERNAME,
        "slug": USERNAME,
        "registered_date": "2024-01-01T00:00:00+00:00",
        "roles": ["administrator"],
        "capabilities": {"administrator": true, "manage_options": true},
        "extra_capabilities": {"administrator": true},
        "avatar_urls": {"24": "http://gravatar.invalid/24", "48": "http://gravatar.invalid/48"},
        "meta": []
    })
}

async fn get_user(
    headers: HeaderMap,
    Path(user): Path<String>,
    Query(params): Params,
) -> Response {
    let context = match checked_context(&params, &headers) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    if user == "me" && !authenticated(&headers) {
        return wp_error(
            StatusCode::UNAUTHORIZED,
            "rest_not_logged_in",
            "You are not currently logged in.",
        );
    }
    if user != "me" && user != "1" {
        return wp_error(StatusCode::NOT_FOUND, "rest_user_invalid_id", "Invalid user ID.");
    }
    let mut body = render_admin(&base_url(&headers));
    if context != "edit" {
        if let Some(fields) = body.as_object_mut() {
            fields.retain(|key, _| {
                matches!(
                    key.as_str(),
                    "id" | "name" | "url" | "description" | "link" | "slug" | "avatar_urls" | "meta"
                )
            });
            if context == "embed" {
                fields.remove("meta");
            }
        }
    }
    Json(body).into_response()
}

// --- application passwords ---

fn render_app_password(password: &AppPassword) -> Value {
    json!({
        "uuid": password.uuid,
        "app_id": password.app_id,
        "name": password.name,
        "created": DATE,
        "last_used": null,
        "last_ip": null
    })
}

fn require_auth(headers: &HeaderMap) -> Result<(), Response> {
    if authenticated(headers) {
        Ok(())
    } else {
        Err(wp_error(
            StatusCode::UNAUTHORIZED,
            "rest_cannot_manage_application_passwords",
            "Sorry, you are not allowed to manage application passwords for this user.",
        ))
    }
}

async fn list_app_passwords(State(db): State<Db>, headers: HeaderMap) -> Response {
    if let Err(resp) = require_auth(&headers) {
        return resp;
    }
    let site = db.read().await;
    let items: Vec<Value> = site.app_passwords.iter().map(render_app_password).collect();
    Json(items).into_response()
}

async fn create_app_password(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<AppPasswordInput>,
) -> Response {
    if let Err(resp) = require_auth(&headers) {
        return resp;
    }
    let password = AppPassword {
        uuid: Uuid::new_v4(),
        app_id: input.app_id.unwrap_or_default(),
        name: input.name,
    };
    let mut body = render_app_password(&password);
    merge(&mut body, json!({"password": "abcd efgh ijkl mnop qrst uvwx"}));
    db.write().await.app_passwords.push(password);
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn delete_app_password(
    State(db): State<Db>,
    headers: HeaderMap,
    Path((_user, uuid)): Path<(String, Uuid)>,
) -> Response {
    if let Err(resp) = require_auth(&headers) {
        return resp;
    }
    let mut site = db.write().await;
    let Some(index) = site.app_passwords.iter().position(|p| p.uuid == uuid) else {
        return wp_error(
            StatusCode::NOT_FOUND,
            "application_password_not_found",
            "Application password not found.",
        );
    };
    let removed = site.app_passwords.remove(index);
    Json(json!({"deleted": true, "previous": render_app_password(&removed)})).into_response()
}

// --- settings ---

async fn get_settings(State(db): State<Db>, headers: HeaderMap) -> Response {
    if !authenticated(&headers) {
        return wp_error(
            StatusCode::UNAUTHORIZED,
            "rest_forbidden",
            "Sorry, you are not allowed to do that.",
        );
    }
    Json(db.read().await.settings.clone()).into_response()
}

async fn update_settings(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(update): Json<Value>,
) -> Response {
    if !authenticated(&headers) {
        return wp_error(
            StatusCode::UNAUTHORIZED,
            "rest_forbidden",
            "Sorry, you are not allowed to do that.",
        );
    }
    let mut site = db.write().await;
    merge(&mut site.settings, update);
    Json(site.settings.clone()).into_response()
}

// --- JWT ---

async fn issue_token(Json(credentials): Json<JwtCredentials>) -> Response {
    if credentials.username != USERNAME {
        return wp_error(
            StatusCode::FORBIDDEN,
            "[jwt_auth] invalid_username",
            "Unknown username. Check again or try your email address.",
        );
    }
    if credentials.password != PASSWORD {
        return wp_error(
            StatusCode::FORBIDDEN,
            "[jwt_auth] incorrect_password",
            "The password you entered for the username admin is incorrect.",
        );
    }
    Json(json!({
        "token": JWT_TOKEN,
        "user_email": "admin@example.com",
        "user_nicename": USERNAME,
        "user_display_name": "Admin"
    }))
    .into_response()
}

async fn validate_token(headers: HeaderMap) -> Response {
    let expected = format!("Bearer {JWT_TOKEN}");
    let valid = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|h| h == expected);
    if !valid {
        return wp_error(
            StatusCode::FORBIDDEN,
            "jwt_auth_invalid_token",
            "Signature verification failed",
        );
    }
    Json(json!({"code": "jwt_auth_valid_token", "data": {"status": 200}})).into_response()
}

// --- misbehaving routes ---

/// A PHP notice printed ahead of the JSON, as badly configured sites do.
async fn php_warning() -> Response {
    (
        [(header::CONTENT_TYPE, "application/json")],
        "<b>Warning</b>: Undefined variable $x in <b>plugin.php</b>\n{\"id\":1}",
    )
        .into_response()
}

/// The same kind of notice, emitted by a site still serving ISO-8859-1.
async fn latin1_warning() -> Response {
    (
        [(header::CONTENT_TYPE, "application/json")],
        &b"<b>Warning</b>: caf\xe9 not found in <b>plugin.php</b>\n{\"id\":1}"[..],
    )
        .into_response()
}

/// A collection larger than common client-side body caps.
async fn large_list() -> Response {
    let body = format!("[{}]", vec!["1234567"; LARGE_LIST_ITEMS].join(","));
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// A plugin that answers failures with its own JSON shape.
async fn broken() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": true, "message": "Error message"})),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Post {
        Site::default().posts[&1].clone()
    }

    #[test]
    fn embed_context_is_a_subset_of_view() {
        let post = sample();
        let embed = render_post(&post, "embed", "http://h");
        let view = render_post(&post, "view", "http://h");
        for key in embed.as_object().unwrap().keys() {
            assert!(view.get(key).is_some(), "{key} missing from view");
        }
        assert!(embed.get("content").is_none());
    }

    #[test]
    fn edit_context_adds_raw_fields() {
        let edit = render_post(&sample(), "edit", "http://h");
        assert_eq!(edit["title"]["raw"], "Hello world!");
        assert_eq!(edit["content"]["raw"], "Welcome to WordPress.");
        assert_eq!(edit["password"], "");
        assert_eq!(edit["meta"], json!([]));
    }

    #[test]
    fn post_input_fields_are_optional() {
        let input: PostInput = serde_json::from_str(r#"{"title":"T"}"#).unwrap();
        assert_eq!(input.title.as_deref(), Some("T"));
        assert!(input.status.is_none());
    }

    #[test]
    fn basic_auth_constant_matches_credentials() {
        // base64("admin:secret")
        assert_eq!(BASIC_AUTH, "Basic YWRtaW46c2VjcmV0");
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, BASIC_AUTH.parse().unwrap());
        assert!(authenticated(&headers));
    }
}
