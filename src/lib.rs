pub mod ai;
pub mod app;
pub mod config;
pub mod controllers;
pub mod database;
pub mod domain;
pub mod error;
pub mod formatter;
