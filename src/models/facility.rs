use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub id: String,
    pub name: String,
    pub location: Option<String>,
}

/// Statically configured facility set. Immutable at runtime.
pub fn facilities() -> Vec<Facility> {
    vec![
        Facility {
            id: "gym-1".to_string(),
            name: "Colaiste Muire".to_string(),
            location: None,
        },
        Facility {
            id: "gym-2".to_string(),
            name: "Rushbrooke".to_string(),
            location: None,
        },
        Facility {
            id: "gym-3".to_string(),
            name: "Community centre".to_string(),
            location: None,
        },
    ]
}

pub fn facility_by_id(id: &str) -> Option<Facility> {
    facilities().into_iter().find(|f| f.id == id)
}

pub fn facility_name(id: &str) -> String {
    facility_by_id(id).map(|f| f.name).unwrap_or_else(|| id.to_string())
}
