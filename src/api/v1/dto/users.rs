/*
 * Responsibility
 * - Users の request/response DTO
 * - 各 route の FieldRule (validation) もここで宣言する
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::UserRow;
use crate::services::auth::ownership::OWNER_PARAM;
use crate::services::validation::FieldRule;

pub const USER_ID_RULE: FieldRule = FieldRule::path(OWNER_PARAM, "User id cannot be empty");

pub const CREATE_USER_RULES: &[FieldRule] = &[
    FieldRule::body_email("email", "Invalid email address"),
    FieldRule::body("password", "Password cannot be empty"),
];

pub const USER_RULES: &[FieldRule] = &[USER_ID_RULE];

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
        }
    }
}
