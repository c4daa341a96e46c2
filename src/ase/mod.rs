//! Core Aseprite reader module

pub mod filter;
pub mod format;
pub mod reader;
pub mod types;
pub mod utils;
pub mod visitor;

pub use reader::AseFile;
pub use types::error::{AseError, Result};
