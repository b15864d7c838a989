pub mod auth;
pub mod chat;
pub mod cli;
pub mod database;
pub mod database_factory;
pub mod date_provider;
pub mod error;
pub mod game;
pub mod play_service;
pub mod profile;
pub mod profile_store;
pub mod report;
pub mod report_export;
pub mod terminal;
pub mod time_format;
