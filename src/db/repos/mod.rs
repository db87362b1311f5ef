mod benchmarks;
mod prompts;

pub use benchmarks::*;
pub use prompts::*;
