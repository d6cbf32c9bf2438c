pub mod check;
pub mod config;
pub mod logging;
pub mod parser;
pub mod version;
