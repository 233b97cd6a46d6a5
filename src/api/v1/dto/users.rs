/*
 * Responsibility
 * - /users/me の request DTO (response は UserProfile をそのまま返す)
 */
use serde::Deserialize;

use crate::services::users::ProfileChanges;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            username: req.username.trim().to_string(),
            email: req.email.trim().to_string(),
        }
    }
}
