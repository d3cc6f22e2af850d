pub mod error;
pub mod fcm;
pub mod transport;
pub mod types;

pub use error::{PushError, Result};
pub use fcm::FcmTransport;
pub use transport::{PushTransport, MULTICAST_BATCH_MAX};
pub use types::{DispatchReport, MulticastMessage, Notification, TokenOutcome};
