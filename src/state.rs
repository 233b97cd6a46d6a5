/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - ex: sessions: SessionService, posts: PostService, codec: TokenCodec など
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - store / hasher は trait object で受け取る (テストではインメモリ実装を差し込む)
 */
use std::sync::Arc;

use crate::repos::{CommentStore, CredentialStore, PostStore};
use crate::services::{
    auth::{SessionService, TokenCodec},
    comments::CommentService,
    password::PasswordHasher,
    posts::PostService,
    users::UserService,
};

#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn CredentialStore>,
    pub posts: Arc<dyn PostStore>,
    pub comments: Arc<dyn CommentStore>,
}

#[derive(Debug, Clone, Copy)]
pub struct TokenLifetimes {
    pub access_seconds: u64,
    pub refresh_seconds: u64,
}

/// Attributes for the session cookies.
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    pub secure: bool,
    pub access_max_age: u64,
    pub refresh_max_age: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<TokenCodec>,
    pub sessions: Arc<SessionService>,
    pub users: Arc<UserService>,
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
    pub cookies: CookiePolicy,
}

impl AppState {
    pub fn new(
        stores: Stores,
        hasher: Arc<dyn PasswordHasher>,
        codec: Arc<TokenCodec>,
        lifetimes: TokenLifetimes,
        secure_cookies: bool,
    ) -> Self {
        let sessions = SessionService::new(
            stores.users.clone(),
            hasher,
            codec.clone(),
            lifetimes.access_seconds,
            lifetimes.refresh_seconds,
        );

        Self {
            codec,
            sessions: Arc::new(sessions),
            users: Arc::new(UserService::new(stores.users)),
            posts: Arc::new(PostService::new(
                stores.posts.clone(),
                stores.comments.clone(),
            )),
            comments: Arc::new(CommentService::new(stores.posts, stores.comments)),
            cookies: CookiePolicy {
                secure: secure_cookies,
                access_max_age: lifetimes.access_seconds,
                refresh_max_age: lifetimes.refresh_seconds,
            },
        }
    }
}
