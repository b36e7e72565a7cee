pub mod db;
pub mod emails;
pub mod labels;
pub mod models;
pub mod schema;
pub mod sessions;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
