mod benchmarks;
mod common;
mod prompts;

pub use benchmarks::SqliteBenchmarkRepo;
pub use prompts::SqlitePromptRepo;
