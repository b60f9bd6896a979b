//! Recipe structure in its JSON export shape

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Step, StepSequence};

/// Preset brewing devices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrewerId {
    V60,
    Aeropress,
    Kalita,
    Chemex,
    Frenchpress,
    Espresso,
    Moka,
    Siphon,
}

impl BrewerId {
    /// User-facing device name
    pub fn label(&self) -> &'static str {
        match self {
            Self::V60 => "V60",
            Self::Aeropress => "AeroPress",
            Self::Kalita => "Kalita Wave",
            Self::Chemex => "Chemex",
            Self::Frenchpress => "French Press",
            Self::Espresso => "Espresso",
            Self::Moka => "Moka Pot",
            Self::Siphon => "Siphon",
        }
    }
}

/// One step as stored in a recipe file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeStep {
    pub step: u32,
    pub text: String,
    /// Seconds
    pub duration: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    /// Free-form device label; may differ from the preset name
    pub brewer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brewer_id: Option<BrewerId>,
    #[serde(default)]
    pub steps: Vec<RecipeStep>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub last_used_at: Option<DateTime<Utc>>,
}

impl Recipe {
    /// Build the timer sequence for this recipe, ordered as stored
    pub fn to_sequence(&self) -> StepSequence {
        let steps = self
            .steps
            .iter()
            .map(|s| Step::new(s.text.clone(), s.duration))
            .collect();
        StepSequence::new(self.id.clone(), steps)
    }

    pub fn total_duration(&self) -> u64 {
        self.steps.iter().map(|s| s.duration).fold(0, u64::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORTED: &str = r#"{
        "id": "b7c1",
        "title": "Morning V60",
        "brewer": "V60",
        "brewerId": "v60",
        "steps": [
            { "step": 1, "text": "Bloom", "duration": 45 },
            { "step": 3, "text": "Main pour", "duration": 90 }
        ],
        "createdAt": "2025-01-04T08:00:00Z",
        "updatedAt": "2025-01-04T08:00:00Z",
        "lastUsedAt": null
    }"#;

    #[test]
    fn parses_exported_recipe() {
        let recipe: Recipe = serde_json::from_str(EXPORTED).expect("valid recipe");
        assert_eq!(recipe.brewer_id, Some(BrewerId::V60));
        assert_eq!(recipe.total_duration(), 135);
        assert!(recipe.last_used_at.is_none());
    }

    #[test]
    fn sequence_renumbers_steps() {
        let recipe: Recipe = serde_json::from_str(EXPORTED).expect("valid recipe");
        let seq = recipe.to_sequence();

        assert_eq!(seq.id(), "b7c1");
        assert_eq!(seq.steps()[1].ordinal, 2);
        assert_eq!(seq.steps()[1].label, "Main pour");
        assert_eq!(seq.total_duration(), 135);
    }

    #[test]
    fn custom_brewer_without_preset() {
        let json = EXPORTED.replace(r#""brewerId": "v60","#, "").replace("\"V60\"", "\"Clever\"");
        let recipe: Recipe = serde_json::from_str(&json).expect("valid recipe");
        assert_eq!(recipe.brewer, "Clever");
        assert!(recipe.brewer_id.is_none());
        assert_eq!(BrewerId::Kalita.label(), "Kalita Wave");
    }

    #[test]
    fn oversized_total_saturates() {
        let json = EXPORTED.replace(r#""duration": 45"#, r#""duration": 18446744073709551615"#);
        let recipe: Recipe = serde_json::from_str(&json).expect("valid recipe");
        assert_eq!(recipe.total_duration(), u64::MAX);
    }
}
