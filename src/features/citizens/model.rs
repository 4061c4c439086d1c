use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::features::auth::session::Role;

/// A registered account as returned by the service. `role` and
/// `created_at` are absent from older service revisions, so both default
/// on deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct Citizen {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub numero_telephone: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
