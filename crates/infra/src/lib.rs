pub mod db;
pub mod error;
pub mod models;
pub mod pg;
pub mod store;

pub use error::StoreError;
pub use pg::PgStore;
pub use store::{BlogStore, FeedFilter, NewAuthor, NewDraft};
