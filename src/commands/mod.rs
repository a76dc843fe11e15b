mod pack;
mod plan;

pub use pack::*;
pub use plan::*;
