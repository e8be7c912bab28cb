//! Folio Console
//!
//! Terminal host for the folio player core: loads configuration, owns the
//! runtime, spawns catalog fetches and feeds stdin commands into a
//! [`session::Session`].

pub mod command;
pub mod config;
pub mod demo;
pub mod error;
pub mod host;
pub mod output;
pub mod render;
pub mod session;

pub use error::{ConsoleError, Result};
