use gatehouse_models::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Only `USER` and `ADMIN` are accepted.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateRoleRequest {
    pub role: Role,
}
