use serde::Serialize;
use validator::Validate;

use super::model::{Categorie, Gravite, Status};

/// Form fields for a new signalement. `status` and timestamps are
/// server-assigned and deliberately absent from this payload.
#[derive(Debug, Serialize, Validate)]
pub struct CreateSignalementDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub titre: String,

    #[validate(length(min = 1, message = "Location is required"))]
    pub localisation: String,

    #[validate(length(min = 1, message = "City is required"))]
    pub ville: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub categorie: Categorie,
    pub gravite: Gravite,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentaire: Option<String>,
}

/// Creation payload as sent on the wire: the form fields plus the author,
/// taken from the session rather than from user input.
#[derive(Debug, Serialize)]
pub struct CreateSignalementRequest {
    pub citizen_id: i64,
    #[serde(flatten)]
    pub signalement: CreateSignalementDto,
}

/// Partial update; only set fields are sent.
#[derive(Debug, Default, Serialize)]
pub struct UpdateSignalementDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localisation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ville: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorie: Option<Categorie>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravite: Option<Gravite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentaire: Option<String>,
}

impl UpdateSignalementDto {
    pub fn is_empty(&self) -> bool {
        self.titre.is_none()
            && self.localisation.is_none()
            && self.ville.is_none()
            && self.description.is_none()
            && self.categorie.is_none()
            && self.gravite.is_none()
            && self.status.is_none()
            && self.commentaire.is_none()
    }
}

/// Search filters for the signalement collection. Values are collected as
/// raw form input; [`SignalementFilter::to_query_params`] performs the
/// cleaning the search endpoint expects.
#[derive(Debug, Default, Clone)]
pub struct SignalementFilter {
    pub titre: Option<String>,
    pub ville: Option<String>,
    pub categorie: Option<Categorie>,
    pub gravite: Option<Gravite>,
    pub status: Option<Status>,
    /// Raw user input; sent only when it parses as an integer id.
    pub citizen_id: Option<String>,
    pub description: Option<String>,
}

impl SignalementFilter {
    /// Build the query parameters for the search path. Empty or blank
    /// values are dropped rather than sent as literal empty-string
    /// parameters, and a non-numeric citizen id is dropped entirely.
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push_text(&mut params, "titre", self.titre.as_deref());
        push_text(&mut params, "ville", self.ville.as_deref());
        if let Some(categorie) = self.categorie {
            params.push(("categorie".to_string(), categorie.to_string()));
        }
        if let Some(gravite) = self.gravite {
            params.push(("gravite".to_string(), gravite.to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status".to_string(), status.to_string()));
        }
        if let Some(raw) = self.citizen_id.as_deref() {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                match trimmed.parse::<i64>() {
                    Ok(id) => params.push(("citizen_id".to_string(), id.to_string())),
                    Err(_) => {
                        tracing::warn!("Ignoring non-numeric citizen_id filter: {raw:?}")
                    }
                }
            }
        }
        push_text(&mut params, "description", self.description.as_deref());
        params
    }
}

fn push_text(params: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            params.push((key.to_string(), trimmed.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_filter_yields_exactly_one_param() {
        let filter = SignalementFilter {
            titre: Some("pont".to_string()),
            ..Default::default()
        };
        assert_eq!(
            filter.to_query_params(),
            vec![("titre".to_string(), "pont".to_string())]
        );
    }

    #[test]
    fn test_empty_and_blank_values_are_dropped() {
        let filter = SignalementFilter {
            titre: Some(String::new()),
            ville: Some("   ".to_string()),
            description: None,
            ..Default::default()
        };
        assert!(filter.to_query_params().is_empty());
    }

    #[test]
    fn test_non_numeric_citizen_id_is_dropped() {
        let filter = SignalementFilter {
            citizen_id: Some("abc".to_string()),
            ..Default::default()
        };
        assert!(filter.to_query_params().is_empty());

        let filter = SignalementFilter {
            citizen_id: Some(" 42 ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            filter.to_query_params(),
            vec![("citizen_id".to_string(), "42".to_string())]
        );
    }

    #[test]
    fn test_enum_filters_use_wire_names() {
        let filter = SignalementFilter {
            gravite: Some(Gravite::Urgent),
            status: Some(Status::Resolu),
            categorie: Some(Categorie::Hopital),
            ..Default::default()
        };
        let params = filter.to_query_params();
        assert!(params.contains(&("gravite".to_string(), "urgent".to_string())));
        assert!(params.contains(&("status".to_string(), "résolu".to_string())));
        assert!(params.contains(&("categorie".to_string(), "hopital".to_string())));
    }

    #[test]
    fn test_create_request_injects_author_and_omits_status() {
        let request = CreateSignalementRequest {
            citizen_id: 7,
            signalement: CreateSignalementDto {
                titre: "Nid de poule".to_string(),
                localisation: "Rue 12".to_string(),
                ville: "Rabat".to_string(),
                description: "Trou dangereux".to_string(),
                categorie: Categorie::Admin,
                gravite: Gravite::Urgent,
                commentaire: None,
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["citizen_id"], 7);
        assert_eq!(value["titre"], "Nid de poule");
        assert_eq!(value["gravite"], "urgent");
        assert!(value.get("status").is_none());
        assert!(value.get("commentaire").is_none());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_update_dto_serializes_only_set_fields() {
        let update = UpdateSignalementDto {
            status: Some(Status::EnCours),
            commentaire: Some("Pris en charge".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&update).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(value["status"], "en_cours");
        assert_eq!(value["commentaire"], "Pris en charge");
    }
}
