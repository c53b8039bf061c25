//! Command implementations.

pub mod config;
pub mod extract;
pub mod ingest;
pub mod verify;

pub use self::config::execute_config;
pub use self::extract::execute_extract;
pub use self::ingest::execute_ingest;
pub use self::verify::execute_verify;
