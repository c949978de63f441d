//! Kabarbot library
//!
//! This module exposes the bot's components for use in integration tests.

pub mod commands;
pub mod config;
pub mod data;
pub mod resolver;
pub mod server;
