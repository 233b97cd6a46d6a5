pub mod comment_repo;
pub mod error;
pub mod post_repo;
pub mod resource;
pub mod user_repo;

pub use comment_repo::{CommentRow, CommentStore, PgCommentRepo};
pub use error::{RepoError, RepoResult};
pub use post_repo::{PgPostRepo, PostRow, PostStore};
pub use resource::{Owned, ResourceStore};
pub use user_repo::{CredentialStore, NewUser, PgUserRepo, ProfileUpdate, UserRow};
