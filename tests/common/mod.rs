#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Utc};

use social_api::app::build_router;
use social_api::config::Config;
use social_api::repos::{
    CommentRow, CommentStore, CredentialStore, NewUser, PostRow, PostStore, ProfileUpdate,
    RepoError, RepoResult, ResourceStore, UserRow,
};
use social_api::services::auth::TokenCodec;
use social_api::services::password::{PasswordHashError, PasswordHasher};
use social_api::state::{AppState, Stores, TokenLifetimes};

pub const SECRET: &str = "integration-test-secret";
pub const ACCESS_TTL: u64 = 900;
pub const REFRESH_TTL: u64 = 86_400;

/// Rows shared by the three in-memory stores, so FK-like rules hold across them.
#[derive(Default)]
pub struct Data {
    pub users: Vec<UserRow>,
    pub posts: Vec<PostRow>,
    pub comments: Vec<CommentRow>,
    next_id: i64,
}

impl Data {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Shared = Arc<Mutex<Data>>;

pub struct MemoryUsers(pub Shared);
pub struct MemoryPosts(pub Shared);
pub struct MemoryComments(pub Shared);

#[async_trait]
impl CredentialStore for MemoryUsers {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>> {
        let data = self.0.lock().unwrap();
        Ok(data.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRow>> {
        let data = self.0.lock().unwrap();
        Ok(data.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<UserRow>> {
        let data = self.0.lock().unwrap();
        Ok(data.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: &NewUser) -> RepoResult<UserRow> {
        let mut data = self.0.lock().unwrap();
        if data
            .users
            .iter()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            return Err(RepoError::Conflict);
        }
        let now = Utc::now();
        let row = UserRow {
            id: data.next_id(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: now,
            updated_at: now,
            last_login: None,
        };
        data.users.push(row.clone());
        Ok(row)
    }

    async fn update_profile(
        &self,
        id: i64,
        update: &ProfileUpdate,
    ) -> RepoResult<Option<UserRow>> {
        let mut data = self.0.lock().unwrap();
        if data.users.iter().any(|u| {
            u.id != id && (u.email == update.email || u.username == update.username)
        }) {
            return Err(RepoError::Conflict);
        }
        let Some(user) = data.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        user.first_name = update.first_name.clone();
        user.last_name = update.last_name.clone();
        user.username = update.username.clone();
        user.email = update.email.clone();
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn record_last_login(&self, id: i64, at: DateTime<Utc>) -> RepoResult<()> {
        let mut data = self.0.lock().unwrap();
        if let Some(user) = data.users.iter_mut().find(|u| u.id == id) {
            user.last_login = Some(at);
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceStore<PostRow> for MemoryPosts {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<PostRow>> {
        let data = self.0.lock().unwrap();
        Ok(data.posts.iter().find(|p| p.id == id).cloned())
    }
}

#[async_trait]
impl PostStore for MemoryPosts {
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<PostRow>> {
        let data = self.0.lock().unwrap();
        Ok(data
            .posts
            .iter()
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn create(&self, user_id: i64, content: &str) -> RepoResult<PostRow> {
        let mut data = self.0.lock().unwrap();
        if !data.users.iter().any(|u| u.id == user_id) {
            return Err(RepoError::MissingReference);
        }
        let now = Utc::now();
        let row = PostRow {
            id: data.next_id(),
            user_id,
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };
        data.posts.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, content: &str) -> RepoResult<Option<PostRow>> {
        let mut data = self.0.lock().unwrap();
        let Some(post) = data.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        post.content = content.to_string();
        post.updated_at = Utc::now();
        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut data = self.0.lock().unwrap();
        let before = data.posts.len();
        data.posts.retain(|p| p.id != id);
        data.comments.retain(|c| c.post_id != id);
        Ok(data.posts.len() < before)
    }
}

#[async_trait]
impl ResourceStore<CommentRow> for MemoryComments {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<CommentRow>> {
        let data = self.0.lock().unwrap();
        Ok(data.comments.iter().find(|c| c.id == id).cloned())
    }
}

#[async_trait]
impl CommentStore for MemoryComments {
    async fn list_by_post(
        &self,
        post_id: i64,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<CommentRow>> {
        let data = self.0.lock().unwrap();
        Ok(data
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn create(&self, post_id: i64, user_id: i64, content: &str) -> RepoResult<CommentRow> {
        let mut data = self.0.lock().unwrap();
        if !data.posts.iter().any(|p| p.id == post_id) {
            return Err(RepoError::MissingReference);
        }
        let now = Utc::now();
        let row = CommentRow {
            id: data.next_id(),
            post_id,
            user_id,
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };
        data.comments.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, content: &str) -> RepoResult<Option<CommentRow>> {
        let mut data = self.0.lock().unwrap();
        let Some(comment) = data.comments.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        comment.content = content.to_string();
        comment.updated_at = Utc::now();
        Ok(Some(comment.clone()))
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut data = self.0.lock().unwrap();
        let before = data.comments.len();
        data.comments.retain(|c| c.id != id);
        Ok(data.comments.len() < before)
    }
}

/// Fast deterministic stand-in for argon2 in HTTP-level tests.
pub struct FakeHasher;

impl PasswordHasher for FakeHasher {
    fn hash(&self, plain: &str) -> Result<String, PasswordHashError> {
        Ok(format!("fake${}", plain.chars().rev().collect::<String>()))
    }

    fn verify(&self, hash: &str, plain: &str) -> bool {
        self.hash(plain).map(|h| h == hash).unwrap_or(false)
    }
}

pub struct Harness {
    pub data: Shared,
    pub state: AppState,
}

impl Harness {
    pub fn new(hasher: Arc<dyn PasswordHasher>) -> Self {
        let data: Shared = Arc::default();
        let stores = Stores {
            users: Arc::new(MemoryUsers(data.clone())),
            posts: Arc::new(MemoryPosts(data.clone())),
            comments: Arc::new(MemoryComments(data.clone())),
        };
        let state = AppState::new(
            stores,
            hasher,
            Arc::new(codec()),
            TokenLifetimes {
                access_seconds: ACCESS_TTL,
                refresh_seconds: REFRESH_TTL,
            },
            false,
        );
        Self { data, state }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &test_config())
    }
}

pub fn codec() -> TokenCodec {
    TokenCodec::new(SECRET, "social-api", "social-api", 0).unwrap()
}

pub fn test_config() -> Config {
    Config::from_source(|key| match key {
        "DATABASE_URL" => Some("postgres://unused/test".to_string()),
        "JWT_SECRET" => Some(SECRET.to_string()),
        _ => None,
    })
    .unwrap()
}
