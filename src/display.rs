use serde::Serialize;

use crate::domain::{Event, Intensity};

const UNKNOWN_TITLE: &str = "Unknown event";
const NO_STRENGTH: &str = "--";

/// Output format for the rendered event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// The three display lines: title, felt count, perceived strength.
pub fn render_lines(event: &Event) -> [String; 3] {
    let title = if event.title().is_empty() {
        UNKNOWN_TITLE.to_string()
    } else {
        event.title().to_string()
    };

    let felt = format!("{} people felt it", event.num_of_people());

    let strength = match (event.perceived_strength(), event.intensity()) {
        ("", _) => format!("Perceived strength: {}", NO_STRENGTH),
        (label, Some(level)) => format!(
            "Perceived strength: {} ({} {})",
            label,
            level.roman(),
            level.shaking()
        ),
        (label, None) => format!("Perceived strength: {}", label),
    };

    [title, felt, strength]
}

pub fn render_text(event: &Event) -> String {
    render_lines(event).join("\n")
}

#[derive(Serialize)]
struct JsonView<'a> {
    #[serde(flatten)]
    event: &'a Event,
    intensity: Option<IntensityView>,
}

#[derive(Serialize)]
struct IntensityView {
    level: Intensity,
    roman: &'static str,
    shaking: &'static str,
}

pub fn render_json(event: &Event) -> serde_json::Result<String> {
    let view = JsonView {
        event,
        intensity: event.intensity().map(|level| IntensityView {
            level,
            roman: level.roman(),
            shaking: level.shaking(),
        }),
    };
    serde_json::to_string_pretty(&view)
}
