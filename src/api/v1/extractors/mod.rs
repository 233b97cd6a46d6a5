mod auth_ctx;
mod json_body;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use json_body::JsonBody;
