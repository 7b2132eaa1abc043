pub mod artifacts;
pub mod config;
pub mod discovery;
pub mod error;
pub mod generate;
pub mod leaf_csv;
pub mod schema;
pub mod split;
pub mod types;
