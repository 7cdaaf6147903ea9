pub mod config;
pub mod error;
pub mod invocation;
pub mod logging;
pub mod modules;
pub mod paths;

pub use config::{SeedfileConfig, WriteMode};
pub use error::{ConfigError, InvocationError, MaterializeError};
pub use invocation::Invocation;
pub use logging::LoggingConfig;
pub use modules::{FileModule, FileParams, Module, ModuleResult};
