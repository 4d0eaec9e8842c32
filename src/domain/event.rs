use serde::Serialize;

use super::Intensity;

/// A single earthquake as shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Event {
    title: String,
    num_of_people: u64,
    /// Community Decimal Intensity label, empty when the feed has none
    perceived_strength: String,
}

impl Event {
    pub fn new(
        title: impl Into<String>,
        num_of_people: u64,
        perceived_strength: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            num_of_people,
            perceived_strength: perceived_strength.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of people who reported feeling the earthquake.
    pub fn num_of_people(&self) -> u64 {
        self.num_of_people
    }

    pub fn perceived_strength(&self) -> &str {
        &self.perceived_strength
    }

    pub fn intensity(&self) -> Option<Intensity> {
        Intensity::from_label(&self.perceived_strength)
    }

    /// True for the fallback value produced when nothing could be loaded.
    pub fn is_empty(&self) -> bool {
        *self == Event::default()
    }
}
