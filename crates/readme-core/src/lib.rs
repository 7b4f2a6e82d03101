pub mod badge;
pub mod catalog;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod paths;
pub mod section;

pub use error::{ReadmeError, Result};
