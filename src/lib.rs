pub mod core;

// Re-export key items for easy importing in this crate
pub use core::types;

// Re-export key items for easy importing in other crates
pub use core::dotnet::{DotnetTool, SolutionTool};
pub use core::main_shared::run_main;
