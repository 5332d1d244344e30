pub mod app;
pub mod components;
pub mod config;
pub mod edit;
pub mod state;
