pub mod bouncer;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod resolver;
pub mod rules;
pub mod session;
pub mod template;
pub mod ui;

pub use error::{GitVersioningError, Result};
