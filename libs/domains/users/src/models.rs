use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User record as exposed by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier, assigned by the database on creation
    pub id: i32,
    /// Given name
    pub firstname: String,
    /// Family name
    pub lastname: String,
}

/// DTO for creating a new user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct CreateUser {
    pub firstname: String,
    pub lastname: String,
}

/// DTO for partially updating an existing user
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct UpdateUser {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

impl UpdateUser {
    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.firstname.is_none() && self.lastname.is_none()
    }
}

impl User {
    /// Apply a partial update in place
    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(firstname) = update.firstname {
            self.firstname = firstname;
        }
        if let Some(lastname) = update.lastname {
            self.lastname = lastname;
        }
    }
}
