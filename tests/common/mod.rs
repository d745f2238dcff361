//! Shared fixtures for handler integration tests.
//!
//! Handlers are exercised against in-memory repository implementations, so
//! these tests need no running database. The in-memory link store enforces
//! the same code-uniqueness rule as the real schema.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use axum::routing::get;
use axum::{Router, middleware};
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::sync::mpsc;
use tower::Layer;

use shortly::AppState;
use shortly::api::handlers::{health_handler, redirect_handler};
use shortly::api::middleware::auth;
use shortly::application::services::{AuthService, LinkService, StatsService};
use shortly::domain::click_event::ClickEvent;
use shortly::domain::entities::{Click, Link, LinkUpdate, NewClick, NewLink, NewUser, User};
use shortly::domain::repositories::{
    ClickRepository, LinkRepository, LinkWithClicks, UserRepository,
};
use shortly::error::AppError;

pub const BASE_URL: &str = "http://localhost:3000";
pub const JWT_SECRET: &str = "integration-test-secret";

#[derive(Default)]
struct StoreInner {
    links: Vec<Link>,
    clicks: Vec<Click>,
    users: Vec<User>,
    next_link_id: i64,
    next_click_id: i64,
    next_user_id: i64,
}

/// In-memory backing store shared by the three repository fakes.
#[derive(Default)]
pub struct Store {
    inner: Mutex<StoreInner>,
}

impl Store {
    /// Inserts a click event directly, bypassing the pipeline. Used to seed
    /// analytics fixtures with known timestamps.
    pub fn insert_click(
        &self,
        link_id: i64,
        clicked_at: DateTime<Utc>,
        device_type: &str,
        browser: &str,
        os: &str,
    ) {
        let mut inner = self.inner.lock().unwrap();
        inner.next_click_id += 1;
        let id = inner.next_click_id;
        inner.clicks.push(Click {
            id,
            link_id,
            clicked_at,
            ip_address: None,
            user_agent: None,
            device_type: device_type.to_string(),
            browser: browser.to_string(),
            os: os.to_string(),
        });
    }

    pub fn click_count(&self) -> usize {
        self.inner.lock().unwrap().clicks.len()
    }

    pub fn last_click(&self) -> Option<Click> {
        self.inner.lock().unwrap().clicks.last().cloned()
    }

    pub fn find_link_by_code(&self, code: &str) -> Option<Link> {
        self.inner
            .lock()
            .unwrap()
            .links
            .iter()
            .find(|l| l.code == code)
            .cloned()
    }
}

pub struct InMemoryLinkRepository {
    store: Arc<Store>,
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut inner = self.store.inner.lock().unwrap();

        if inner.links.iter().any(|l| l.code == new_link.code) {
            return Err(AppError::alias_taken(
                "Short code is already in use",
                json!({ "code": new_link.code }),
            ));
        }

        inner.next_link_id += 1;
        let link = Link::new(
            inner.next_link_id,
            new_link.code,
            new_link.original_url,
            new_link.owner_id,
            Utc::now(),
            new_link.expires_at,
        );
        inner.links.push(link.clone());
        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let inner = self.store.inner.lock().unwrap();
        Ok(inner.links.iter().find(|l| l.code == code).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let inner = self.store.inner.lock().unwrap();
        Ok(inner.links.iter().find(|l| l.id == id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        offset: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<Vec<LinkWithClicks>, AppError> {
        let inner = self.store.inner.lock().unwrap();

        let mut matches: Vec<&Link> = inner
            .links
            .iter()
            .filter(|l| l.owner_id == owner_id && matches_search(l, search.as_deref()))
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(matches
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|link| LinkWithClicks {
                link: link.clone(),
                total_clicks: inner.clicks.iter().filter(|c| c.link_id == link.id).count()
                    as i64,
            })
            .collect())
    }

    async fn count_by_owner(
        &self,
        owner_id: i64,
        search: Option<String>,
    ) -> Result<i64, AppError> {
        let inner = self.store.inner.lock().unwrap();
        Ok(inner
            .links
            .iter()
            .filter(|l| l.owner_id == owner_id && matches_search(l, search.as_deref()))
            .count() as i64)
    }

    async fn update(&self, id: i64, update: LinkUpdate) -> Result<Link, AppError> {
        let mut inner = self.store.inner.lock().unwrap();

        let link = inner
            .links
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))?;

        if let Some(url) = update.original_url {
            link.original_url = url;
        }
        if let Some(expires_at) = update.expires_at {
            link.expires_at = expires_at;
        }

        Ok(link.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut inner = self.store.inner.lock().unwrap();

        let before = inner.links.len();
        inner.links.retain(|l| l.id != id);
        let deleted = inner.links.len() < before;

        if deleted {
            // Cascade, mirroring the FK in the real schema.
            inner.clicks.retain(|c| c.link_id != id);
        }

        Ok(deleted)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

fn matches_search(link: &Link, search: Option<&str>) -> bool {
    match search {
        None => true,
        Some(needle) => {
            let needle = needle.to_lowercase();
            link.original_url.to_lowercase().contains(&needle)
                || link.code.to_lowercase().contains(&needle)
        }
    }
}

pub struct InMemoryClickRepository {
    store: Arc<Store>,
}

impl InMemoryClickRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ClickRepository for InMemoryClickRepository {
    async fn record(&self, new_click: NewClick) -> Result<Click, AppError> {
        let mut inner = self.store.inner.lock().unwrap();
        inner.next_click_id += 1;
        let click = Click {
            id: inner.next_click_id,
            link_id: new_click.link_id,
            clicked_at: Utc::now(),
            ip_address: new_click.ip_address,
            user_agent: new_click.user_agent,
            device_type: new_click.device_type,
            browser: new_click.browser,
            os: new_click.os,
        };
        inner.clicks.push(click.clone());
        Ok(click)
    }

    async fn list_for_link(&self, link_id: i64) -> Result<Vec<Click>, AppError> {
        let inner = self.store.inner.lock().unwrap();
        let mut clicks: Vec<Click> = inner
            .clicks
            .iter()
            .filter(|c| c.link_id == link_id)
            .cloned()
            .collect();
        clicks.sort_by(|a, b| a.clicked_at.cmp(&b.clicked_at).then(a.id.cmp(&b.id)));
        Ok(clicks)
    }
}

pub struct InMemoryUserRepository {
    store: Arc<Store>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut inner = self.store.inner.lock().unwrap();

        if inner.users.iter().any(|u| u.username == new_user.username) {
            return Err(AppError::bad_request(
                "Username is already taken",
                json!({ "field": "username" }),
            ));
        }
        if inner.users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::bad_request(
                "Email is already registered",
                json!({ "field": "email" }),
            ));
        }

        inner.next_user_id += 1;
        let user = User {
            id: inner.next_user_id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let inner = self.store.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let inner = self.store.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }
}

/// Everything a handler test needs: shared state, the click queue's receive
/// side, and a handle on the backing store for seeding and assertions.
pub struct TestContext {
    pub state: AppState,
    pub click_rx: mpsc::Receiver<ClickEvent>,
    pub store: Arc<Store>,
}

pub fn create_test_state() -> TestContext {
    create_test_state_with_capacity(64)
}

pub fn create_test_state_with_capacity(capacity: usize) -> TestContext {
    let store = Arc::new(Store::default());

    let links: Arc<dyn LinkRepository> = Arc::new(InMemoryLinkRepository {
        store: store.clone(),
    });
    let clicks: Arc<dyn ClickRepository> = Arc::new(InMemoryClickRepository::new(store.clone()));
    let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository {
        store: store.clone(),
    });

    let (click_tx, click_rx) = mpsc::channel(capacity);

    let state = AppState::new(
        Arc::new(AuthService::new(users, JWT_SECRET)),
        Arc::new(LinkService::new(links.clone())),
        Arc::new(StatsService::new(links, clicks)),
        click_tx,
        BASE_URL.to_string(),
    );

    TestContext {
        state,
        click_rx,
        store,
    }
}

/// Builds the full route tree (redirect, health, public and protected API)
/// without rate limiting, with a fixed peer address injected for
/// `ConnectInfo` extraction.
pub fn test_router(state: AppState) -> Router {
    let protected = shortly::api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let api = Router::new()
        .merge(shortly::api::routes::public_routes())
        .merge(protected);

    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api)
        .with_state(state)
        .layer(MockConnectInfoLayer)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(test_router(state)).unwrap()
}

/// Registers an account through the API and returns its bearer token.
pub async fn register_user(server: &TestServer, username: &str, email: &str) -> String {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": username,
            "email": email,
            "password": "hunter22!",
        }))
        .await;

    assert_eq!(response.status_code(), 201, "{}", response.text());
    response.json::<serde_json::Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
