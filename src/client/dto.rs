//! Request and response bodies of the auth endpoints

use serde::{Deserialize, Serialize};

use crate::session::{Session, UserProfile};

/// POST /auth/login
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/register
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// PUT /auth/profile (email is immutable)
#[derive(Debug, Clone, Serialize)]
pub struct UpdateProfileRequest {
    pub full_name: String,
}

/// Response of login and register
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: UserProfile,
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Session {
            token: response.access_token,
            user: response.user,
        }
    }
}

/// `{"user": {...}}` wrapper of the profile endpoints
#[derive(Debug, Deserialize)]
pub(crate) struct ProfileEnvelope {
    pub user: UserProfile,
}
