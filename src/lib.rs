pub mod auth;
pub mod challenges;
pub mod client;
pub mod command;
pub mod config;
pub mod duels;
pub mod error;
pub mod export;
pub mod feed;
pub mod format;
pub mod games;
pub mod maps;
pub mod model;
pub mod profiles;
pub mod prompt;
pub mod social;
pub mod stats;
pub mod subscriptions;
pub mod telemetry;
