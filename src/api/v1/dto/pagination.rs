use serde::Deserialize;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// `?limit=&offset=` for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListQuery {
    /// (limit, offset) with limit in 1..=100 (missing or 0 -> 10) and offset >= 0.
    pub fn page(&self) -> (i64, i64) {
        let limit = match self.limit {
            None | Some(0) => DEFAULT_LIMIT,
            Some(n) => n.clamp(1, MAX_LIMIT),
        };
        (limit, self.offset.unwrap_or(0).max(0))
    }
}
