use serde::Serialize;
use validator::Validate;

/// Registration payload. The service's wire format takes the plaintext
/// password under the `password_hash` key and performs the hashing itself;
/// the Rust field is named for what it actually is and renamed at the
/// serde boundary.
#[derive(Debug, Serialize, Validate)]
pub struct RegisterCitizenDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_telephone: Option<String>,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[serde(rename = "password_hash")]
    pub password: String,
}

/// Partial account update; only set fields are sent.
#[derive(Debug, Default, Serialize)]
pub struct UpdateCitizenDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_telephone: Option<String>,
    #[serde(rename = "password_hash", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UpdateCitizenDto {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.numero_telephone.is_none() && self.password.is_none()
    }
}
