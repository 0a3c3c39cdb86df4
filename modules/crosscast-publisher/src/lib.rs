// Crosscast publish pipeline: media classification, per-platform publishers,
// and the orchestrator that sequences them (Facebook strictly before
// Instagram, because the Instagram image path consumes the Facebook upload).

pub mod error;
pub mod facebook;
pub mod instagram;
pub mod media;
pub mod pipeline;
pub mod traits;
pub mod youtube;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{PublishError, Result};
pub use instagram::PollConfig;
pub use pipeline::{PlatformFailure, PublishOutcome, PublishPipeline, PublishRequest};
pub use traits::GraphApi;
