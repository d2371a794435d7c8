pub mod boundary;
pub mod checks;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod metadata;
pub mod tools;
pub mod ui;

pub use error::{ReleaseError, Result};
