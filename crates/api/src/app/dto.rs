use serde::{Deserialize, Serialize};

use crate::app::store::ClientRecord;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub secret: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub secret: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    pub username: String,
    pub secret: String,
    pub company_name: String,
    pub tax_id: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
}

impl LoginResponse {
    pub fn granted(token: String) -> Self {
        Self {
            success: true,
            message: "login successful".to_string(),
            token,
        }
    }

    /// Identical wording for unknown usernames and wrong secrets.
    pub fn denied() -> Self {
        Self {
            success: false,
            message: "invalid username or secret".to_string(),
            token: String::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClientLoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub tax_id: String,
}

impl ClientLoginResponse {
    pub fn granted(token: String, tax_id: String) -> Self {
        Self {
            success: true,
            message: "login successful".to_string(),
            token,
            tax_id,
        }
    }

    pub fn denied() -> Self {
        Self {
            success: false,
            message: "invalid username or secret".to_string(),
            token: String::new(),
            tax_id: String::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CreateClientResponse {
    pub success: bool,
    pub message: String,
}

/// Roster entry returned to accountants; never exposes the secret hash.
#[derive(Debug, Serialize)]
pub struct ClientSummary {
    pub username: String,
    pub company_name: String,
    pub tax_id: String,
}

impl From<ClientRecord> for ClientSummary {
    fn from(record: ClientRecord) -> Self {
        Self {
            username: record.username,
            company_name: record.company_name,
            tax_id: record.tax_id,
        }
    }
}
