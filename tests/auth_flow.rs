mod common;

use std::sync::Arc;

use social_api::error::{AppError, DUPLICATE_ACCOUNT, INVALID_CREDENTIALS};
use social_api::middleware::auth::access::authenticate;
use social_api::repos::{CommentRow, PostRow};
use social_api::services::auth::{LoginCredentials, SignupCandidate};
use social_api::services::ownership::{PostScopedComments, ResourceKind, authorize};
use social_api::services::password::Argon2Hasher;

use common::{Harness, MemoryComments, MemoryPosts};

fn candidate(first: &str, username: &str, email: &str) -> SignupCandidate {
    SignupCandidate {
        first_name: first.to_string(),
        last_name: "Tester".to_string(),
        username: username.to_string(),
        email: email.to_string(),
        password: "correct-horse".to_string(),
    }
}

#[tokio::test]
async fn test_signup_login_and_ownership_end_to_end() {
    let h = Harness::new(Arc::new(Argon2Hasher));
    let state = &h.state;

    // signup A
    let a = state
        .sessions
        .signup(candidate("Alice", "alice", "a@x.com"))
        .await
        .unwrap();
    let stored = h.data.lock().unwrap().users[0].password_hash.clone();
    assert!(!stored.contains("correct-horse"));

    // login A
    let login = state
        .sessions
        .login(LoginCredentials {
            email: "a@x.com".to_string(),
            password: "correct-horse".to_string(),
        })
        .await
        .unwrap();
    assert!(!login.access_token.is_empty());
    assert!(!login.refresh_token.is_empty());

    // Authenticate(access) -> A
    let identity = authenticate(&state.codec, &login.access_token).unwrap();
    assert_eq!(identity.user_id, a.user.id);
    assert_eq!(identity.email, "a@x.com");

    // A creates a post
    let post = state
        .posts
        .create(identity.user_id, "hello world")
        .await
        .unwrap();

    let posts = MemoryPosts(h.data.clone());
    let allowed: PostRow = authorize(identity.user_id, &posts, post.id, ResourceKind::Post)
        .await
        .unwrap();
    assert_eq!(allowed.id, post.id);

    // signup B
    let b = state
        .sessions
        .signup(candidate("Bob", "bob", "b@x.com"))
        .await
        .unwrap();
    let b_identity = authenticate(&state.codec, &b.access_token).unwrap();

    assert_eq!(
        authorize::<PostRow, _>(b_identity.user_id, &posts, post.id, ResourceKind::Post)
            .await
            .unwrap_err(),
        AppError::forbidden("post")
    );
    assert_eq!(
        authorize::<PostRow, _>(identity.user_id, &posts, 999_999, ResourceKind::Post)
            .await
            .unwrap_err(),
        AppError::not_found("post")
    );
}

#[tokio::test]
async fn test_duplicate_signups_conflict() {
    let h = Harness::new(Arc::new(common::FakeHasher));
    let sessions = &h.state.sessions;
    sessions
        .signup(candidate("Alice", "alice", "a@x.com"))
        .await
        .unwrap();

    let same_email = sessions
        .signup(candidate("Alicia", "alicia", "a@x.com"))
        .await
        .unwrap_err();
    let same_username = sessions
        .signup(candidate("Alicia", "alice", "other@x.com"))
        .await
        .unwrap_err();

    assert_eq!(same_email, AppError::Conflict(DUPLICATE_ACCOUNT));
    assert_eq!(same_username, AppError::Conflict(DUPLICATE_ACCOUNT));
    assert_eq!(h.data.lock().unwrap().users.len(), 1);
}

#[tokio::test]
async fn test_login_does_not_reveal_which_part_was_wrong() {
    let h = Harness::new(Arc::new(Argon2Hasher));
    let sessions = &h.state.sessions;
    sessions
        .signup(candidate("Alice", "alice", "a@x.com"))
        .await
        .unwrap();

    let login = |email: &str, password: &str| LoginCredentials {
        email: email.to_string(),
        password: password.to_string(),
    };
    let wrong_password = sessions
        .login(login("a@x.com", "wrong-password"))
        .await
        .unwrap_err();
    let unknown = sessions
        .login(login("ghost@x.com", "correct-horse"))
        .await
        .unwrap_err();

    assert_eq!(wrong_password, AppError::Unauthorized(INVALID_CREDENTIALS));
    assert_eq!(wrong_password, unknown);
}

#[tokio::test]
async fn test_comment_ownership_is_scoped_to_parent_post() {
    let h = Harness::new(Arc::new(common::FakeHasher));
    let state = &h.state;
    let a = state
        .sessions
        .signup(candidate("Alice", "alice", "a@x.com"))
        .await
        .unwrap();
    let b = state
        .sessions
        .signup(candidate("Bob", "bob", "b@x.com"))
        .await
        .unwrap();

    let first = state.posts.create(a.user.id, "first").await.unwrap();
    let second = state.posts.create(a.user.id, "second").await.unwrap();
    let comment = state
        .comments
        .create(a.user.id, first.id, "nice")
        .await
        .unwrap();

    let comments = MemoryComments(h.data.clone());
    let under_first = PostScopedComments {
        post_id: first.id,
        comments: &comments,
    };
    let under_second = PostScopedComments {
        post_id: second.id,
        comments: &comments,
    };

    let ok: CommentRow = authorize(a.user.id, &under_first, comment.id, ResourceKind::Comment)
        .await
        .unwrap();
    assert_eq!(ok.id, comment.id);

    assert_eq!(
        authorize::<CommentRow, _>(b.user.id, &under_first, comment.id, ResourceKind::Comment)
            .await
            .unwrap_err(),
        AppError::forbidden("comment")
    );
    // Wrong parent reads as missing, even for the owner.
    assert_eq!(
        authorize::<CommentRow, _>(a.user.id, &under_second, comment.id, ResourceKind::Comment)
            .await
            .unwrap_err(),
        AppError::not_found("comment")
    );
}

#[tokio::test]
async fn test_post_service_mutations_go_through_ownership() {
    let h = Harness::new(Arc::new(common::FakeHasher));
    let state = &h.state;
    let a = state
        .sessions
        .signup(candidate("Alice", "alice", "a@x.com"))
        .await
        .unwrap();
    let b = state
        .sessions
        .signup(candidate("Bob", "bob", "b@x.com"))
        .await
        .unwrap();
    let post = state.posts.create(a.user.id, "original").await.unwrap();

    assert_eq!(
        state
            .posts
            .update(b.user.id, post.id, "hijacked")
            .await
            .unwrap_err(),
        AppError::forbidden("post")
    );
    assert_eq!(
        state.posts.delete(b.user.id, post.id).await.unwrap_err(),
        AppError::forbidden("post")
    );
    assert_eq!(
        state.posts.delete(b.user.id, 424_242).await.unwrap_err(),
        AppError::not_found("post")
    );

    let updated = state
        .posts
        .update(a.user.id, post.id, "edited")
        .await
        .unwrap();
    assert_eq!(updated.content, "edited");

    state.posts.delete(a.user.id, post.id).await.unwrap();
    assert_eq!(
        state.posts.get(post.id).await.unwrap_err(),
        AppError::not_found("post")
    );
}

#[tokio::test]
async fn test_comment_on_missing_post_is_not_found() {
    let h = Harness::new(Arc::new(common::FakeHasher));
    let a = h
        .state
        .sessions
        .signup(candidate("Alice", "alice", "a@x.com"))
        .await
        .unwrap();

    assert_eq!(
        h.state
            .comments
            .create(a.user.id, 31_337, "hello?")
            .await
            .unwrap_err(),
        AppError::not_found("post")
    );
}

#[tokio::test]
async fn test_profile_update_does_not_touch_issued_tokens() {
    let h = Harness::new(Arc::new(common::FakeHasher));
    let state = &h.state;
    let a = state
        .sessions
        .signup(candidate("Alice", "alice", "a@x.com"))
        .await
        .unwrap();

    let updated = state
        .users
        .update_profile(
            a.user.id,
            social_api::services::users::ProfileChanges {
                first_name: "Alicia".to_string(),
                last_name: "Tester".to_string(),
                username: "alice".to_string(),
                email: "a@x.com".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.first_name, "Alicia");

    // Refresh reissues from the snapshot in the refresh token.
    let refreshed = state.sessions.refresh(&a.refresh_token).unwrap();
    let identity = authenticate(&state.codec, &refreshed.access_token).unwrap();
    assert_eq!(identity.first_name, "Alice");
}
