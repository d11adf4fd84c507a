pub mod args;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod model;
pub mod mvu;
pub mod score;
pub mod storage;
pub mod view;

pub use error::CoreError;
pub use score::SyncEngine;
pub use storage::ChangeFeedStore;
