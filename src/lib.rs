// Library exports for lingvox

pub mod cli;
pub mod config;
pub mod credentials;
pub mod directory;
pub mod error;
pub mod llm;
pub mod player;
pub mod session;
pub mod speech;
pub mod translation;
