use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which authority a signalement is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Categorie {
    Police,
    Hopital,
    Admin,
}

impl std::fmt::Display for Categorie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Categorie::Police => write!(f, "police"),
            Categorie::Hopital => write!(f, "hopital"),
            Categorie::Admin => write!(f, "admin"),
        }
    }
}

/// Severity classification of a signalement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Gravite {
    Mineur,
    Majeur,
    Urgent,
}

impl std::fmt::Display for Gravite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gravite::Mineur => write!(f, "mineur"),
            Gravite::Majeur => write!(f, "majeur"),
            Gravite::Urgent => write!(f, "urgent"),
        }
    }
}

/// Lifecycle status, assigned and advanced by the server. New signalements
/// start as `nouveau`; the client never picks a status on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Nouveau,
    #[value(name = "en_cours")]
    EnCours,
    // The service serializes the accented French form
    #[serde(rename = "résolu")]
    #[value(name = "resolu")]
    Resolu,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Nouveau => write!(f, "nouveau"),
            Status::EnCours => write!(f, "en_cours"),
            Status::Resolu => write!(f, "résolu"),
        }
    }
}

/// A citizen-submitted incident report as returned by the service. The
/// server owns `id`, `status` and both timestamps; the client only ever
/// holds a transient copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signalement {
    pub id: i64,
    pub citizen_id: i64,
    pub titre: String,
    pub localisation: String,
    pub ville: String,
    pub description: String,
    pub categorie: Categorie,
    pub gravite: Gravite,
    pub status: Status,
    #[serde(default)]
    pub commentaire: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
