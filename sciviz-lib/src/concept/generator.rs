use crate::asset::AudioAsset;
use crate::service::ServiceError;

use super::ConceptData;

/// Source of generated concepts and narrated speech.
pub trait ConceptGenerator {
    /// Produce a title, diagram and explanation for `prompt`.
    fn generate_concept(&self, prompt: &str) -> Result<ConceptData, ServiceError>;

    /// Narrate `text` into a decoded audio asset.
    fn generate_speech(&self, text: &str) -> Result<AudioAsset, ServiceError>;
}
