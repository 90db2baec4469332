use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvailabilityResult {
    pub is_available: bool,
    /// Display names of allowed subscription providers carrying the title, in catalog order
    pub matched_providers: Vec<String>,
}

impl AvailabilityResult {
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn from_matches(matched_providers: Vec<String>) -> Self {
        Self {
            is_available: !matched_providers.is_empty(),
            matched_providers,
        }
    }
}
