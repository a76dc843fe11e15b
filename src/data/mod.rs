mod config;
mod layout;
mod manifest;

pub use config::*;
pub use layout::*;
pub use manifest::*;
