pub mod config;
pub mod error;
pub mod lambda;
pub mod logging;
pub mod policy;
pub mod rds;
pub mod sweeper;
pub mod types;
