use serde::{Deserialize, Serialize};

/// Identity of the signed-in end user, passed explicitly to every user-side
/// operation. There is no token: the backend keys everything on the email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_email: String,
}

impl Session {
    pub fn new(user_email: impl Into<String>) -> Self {
        Self {
            user_email: user_email.into().trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}
