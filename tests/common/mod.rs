#![allow(dead_code)]

use std::sync::Arc;

use brewlab::{
    recipes::{Recipe, RecipeBook},
    state::AppState,
    timer::ManualClock,
};

pub const RECIPES: &str = r#"[
    {
        "id": "v60-daily",
        "title": "Daily V60",
        "brewer": "V60",
        "brewerId": "v60",
        "steps": [
            { "step": 1, "text": "Bloom", "duration": 30 },
            { "step": 2, "text": "Main pour", "duration": 60 },
            { "step": 3, "text": "Drawdown", "duration": 45 }
        ],
        "createdAt": "2025-03-01T07:30:00Z",
        "updatedAt": "2025-03-01T07:30:00Z",
        "lastUsedAt": null
    },
    {
        "id": "quick",
        "title": "Quick test",
        "brewer": "Clever Dripper",
        "steps": [
            { "step": 1, "text": "Steep", "duration": 1 },
            { "step": 2, "text": "Release", "duration": 1 }
        ],
        "createdAt": "2025-03-02T07:30:00Z",
        "updatedAt": "2025-03-02T07:30:00Z",
        "lastUsedAt": null
    },
    {
        "id": "blank",
        "title": "Not written yet",
        "brewer": "Chemex",
        "brewerId": "chemex",
        "steps": [],
        "createdAt": "2025-03-03T07:30:00Z",
        "updatedAt": "2025-03-03T07:30:00Z",
        "lastUsedAt": null
    }
]"#;

pub fn recipes() -> Vec<Recipe> {
    serde_json::from_str(RECIPES).expect("fixture recipes parse")
}

/// App state on a manual clock starting at an arbitrary epoch instant
pub fn app_state() -> (ManualClock, Arc<AppState>) {
    let clock = ManualClock::new(1_700_000_000_000);
    let state = AppState::new(
        0,
        "127.0.0.1".to_string(),
        Arc::new(clock.clone()),
        RecipeBook::from_recipes(recipes()),
    );
    (clock, Arc::new(state))
}
