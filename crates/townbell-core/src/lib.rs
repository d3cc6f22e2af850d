pub mod config;
pub mod error;
pub mod trigger;

pub use config::TownbellConfig;
pub use error::{Result, TownbellError};
pub use trigger::{EventCreated, EventData};
