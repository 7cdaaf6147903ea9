pub mod types;
pub mod file;

pub use types::{Module, ModuleResult};
pub use file::{FileModule, FileParams};
