pub mod document;
pub mod error;
pub mod firestore;
pub mod store;

pub use error::{Result, StoreError};
pub use firestore::FirestoreStore;
pub use store::{Business, RecordStore, User};
