pub mod compose;
pub mod dispatch;
pub mod error;
pub mod outcome;
pub mod pipeline;
pub mod resolve;

pub use error::PipelineError;
pub use outcome::PipelineOutcome;
pub use pipeline::NotifyPipeline;
