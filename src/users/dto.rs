use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::users::model::User;

/// Request body for creating a person.
#[derive(Debug, Deserialize)]
pub struct CreatePersonRequest {
    pub email: String,
    pub login: String,
    pub password: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub login: String,
    pub about_me: Option<String>,
    pub image: Option<String>,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            login: u.login,
            about_me: u.about_me,
            image: u.image,
        }
    }
}
