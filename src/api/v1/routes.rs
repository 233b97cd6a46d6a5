/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health と /auth/signup, login, refresh, logout は認証なし
 * - /users/me, /posts, /posts/{post_id}/comments は access token 必須 (route_layer で適用)
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::auth::access;
use crate::state::AppState;

use crate::api::v1::handlers::{
    auth::{login, logout, refresh, signup},
    comments::{create_comment, delete_comment, get_comment, list_comments, update_comment},
    health::health,
    posts::{create_post, delete_post, get_post, list_posts, update_post},
    users::{get_me, update_me},
};

pub fn routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout));

    let protected = Router::new()
        .route("/users/me", get(get_me).put(update_me))
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{post_id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route(
            "/posts/{post_id}/comments",
            get(list_comments).post(create_comment),
        )
        .route(
            "/posts/{post_id}/comments/{comment_id}",
            get(get_comment).put(update_comment).delete(delete_comment),
        );
    let protected = access::apply(protected, state.codec.clone());

    public.merge(protected)
}
