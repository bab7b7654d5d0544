use std::fmt;

use sqlx::FromRow;
use uuid::Uuid;

/// User record in the `persons` table.
#[derive(Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: Uuid,                 // assigned by the caller, never changes
    pub email: String,            // unique
    pub login: String,            // unique
    pub password_hash: String,    // Argon2 PHC string
    pub about_me: Option<String>,
    pub image: Option<String>,    // path or URL of the profile image
}

impl User {
    /// A user with no profile fields set.
    pub fn new(
        id: Uuid,
        email: impl Into<String>,
        login: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            login: login.into(),
            password_hash: password_hash.into(),
            about_me: None,
            image: None,
        }
    }
}

// password_hash stays out of logs.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("login", &self.login)
            .field("password_hash", &"<redacted>")
            .field("about_me", &self.about_me)
            .field("image", &self.image)
            .finish()
    }
}

/// Columns written on insert. Profile fields are left to the column defaults.
#[derive(Clone, Copy)]
pub struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub login: &'a str,
    pub password_hash: &'a str,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(u: &'a User) -> Self {
        Self {
            id: u.id,
            email: &u.email,
            login: &u.login,
            password_hash: &u.password_hash,
        }
    }
}

impl From<&NewUserRow<'_>> for User {
    fn from(r: &NewUserRow<'_>) -> Self {
        User::new(r.id, r.email, r.login, r.password_hash)
    }
}
