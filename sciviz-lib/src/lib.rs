//! # SciViz Library
//!
//! Core pieces behind the SciViz explainer: decoding narrated speech into an
//! in-memory [`asset::AudioAsset`], a playback tracker that layers
//! pause/resume/restart over single-use output streams, and the concept
//! exploration pipeline that talks to the generation service.

pub mod asset;
pub mod concept;
pub mod constants;
pub mod pcm;
pub mod playback;
pub mod service;
