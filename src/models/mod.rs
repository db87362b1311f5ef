mod benchmark;
mod repair;

pub use benchmark::*;
pub use repair::*;
