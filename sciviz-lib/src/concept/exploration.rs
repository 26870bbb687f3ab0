//! Sequencing of the concept and speech requests.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use log::{error, info};

use crate::asset::AudioAsset;
use crate::service::ServiceError;

use super::{ConceptData, ConceptGenerator, LoadingStage};

/// Reasons an exploration did not complete.
#[derive(Debug)]
pub enum ExploreError {
    EmptyPrompt,
    Busy,
    Service(ServiceError),
}

impl Display for ExploreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPrompt => write!(f, "prompt is empty"),
            Self::Busy => write!(f, "an exploration is already running"),
            Self::Service(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ExploreError {}

impl From<ServiceError> for ExploreError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

/// State of the current term: stage, results so far and the last error.
#[derive(Debug, Default)]
pub struct Exploration {
    stage: LoadingStage,
    concept: Option<ConceptData>,
    audio: Option<Arc<AudioAsset>>,
    error: Option<String>,
}

impl Exploration {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `prompt` may be submitted now.
    pub fn can_submit(&self, prompt: &str) -> bool {
        !prompt.trim().is_empty() && !self.stage.is_generating()
    }

    /// Generate the concept for `prompt`, then narrate its explanation.
    ///
    /// `on_stage` observes every stage transition. Previous results are
    /// cleared first. If narration fails the concept from the first step is
    /// kept so it can still be shown.
    pub fn run<G, F>(
        &mut self,
        prompt: &str,
        generator: &G,
        mut on_stage: F,
    ) -> Result<(), ExploreError>
    where
        G: ConceptGenerator + ?Sized,
        F: FnMut(LoadingStage),
    {
        if prompt.trim().is_empty() {
            return Err(ExploreError::EmptyPrompt);
        }
        if self.stage.is_generating() {
            return Err(ExploreError::Busy);
        }

        self.error = None;
        self.concept = None;
        self.audio = None;

        match self.generate(prompt, generator, &mut on_stage) {
            Ok(()) => {
                self.set_stage(LoadingStage::Complete, &mut on_stage);
                Ok(())
            }
            Err(err) => {
                error!("exploration failed: {}", err);
                self.error = Some(err.to_string());
                self.set_stage(LoadingStage::Error, &mut on_stage);
                Err(err.into())
            }
        }
    }

    fn generate<G, F>(
        &mut self,
        prompt: &str,
        generator: &G,
        on_stage: &mut F,
    ) -> Result<(), ServiceError>
    where
        G: ConceptGenerator + ?Sized,
        F: FnMut(LoadingStage),
    {
        self.set_stage(LoadingStage::GeneratingVisual, on_stage);
        let concept = generator.generate_concept(prompt.trim())?;
        info!("Generated concept \"{}\"", concept.title);
        let explanation = concept.explanation.clone();
        self.concept = Some(concept);

        self.set_stage(LoadingStage::GeneratingAudio, on_stage);
        let audio = generator.generate_speech(&explanation)?;
        info!("Generated {:.1}s of narration", audio.duration());
        self.audio = Some(Arc::new(audio));
        Ok(())
    }

    fn set_stage<F: FnMut(LoadingStage)>(&mut self, stage: LoadingStage, on_stage: &mut F) {
        self.stage = stage;
        on_stage(stage);
    }

    pub fn stage(&self) -> LoadingStage {
        self.stage
    }

    pub fn concept(&self) -> Option<&ConceptData> {
        self.concept.as_ref()
    }

    /// Narration for the current concept, shared with the playback tracker.
    pub fn audio(&self) -> Option<Arc<AudioAsset>> {
        self.audio.clone()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
