pub mod config;
pub mod helpers;
pub mod list;
pub mod validate;
