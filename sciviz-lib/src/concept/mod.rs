//! Concept data and the two-step exploration pipeline.

mod exploration;
mod generator;

pub use exploration::{ExploreError, Exploration};
pub use generator::ConceptGenerator;

use serde::{Deserialize, Serialize};

/// Title, diagram and explanation generated for one term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptData {
    pub title: String,
    /// Raw SVG markup, rendered verbatim by the front-end.
    #[serde(rename = "svgCode")]
    pub svg_code: String,
    pub explanation: String,
}

/// Progress of an exploration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingStage {
    #[default]
    Idle,
    GeneratingVisual,
    GeneratingAudio,
    Complete,
    Error,
}

impl LoadingStage {
    /// True while a service call is in flight.
    pub fn is_generating(&self) -> bool {
        matches!(self, Self::GeneratingVisual | Self::GeneratingAudio)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::GeneratingVisual => "generating visual",
            Self::GeneratingAudio => "generating audio",
            Self::Complete => "complete",
            Self::Error => "error",
        }
    }
}
