use std::path::PathBuf;

use seedfile_core::{FileModule, FileParams, Invocation, Module, ModuleResult, SeedfileConfig};
use tracing::warn;

/// Where the module arguments come from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    ArgsFile(PathBuf),
    Flags {
        path: Option<String>,
        content: Option<String>,
        check_mode: bool,
    },
}

/// Runs a single module invocation and reports the result on stdout.
pub struct AppHeadless {
    config_path: Option<PathBuf>,
    pretty: bool,
}

impl AppHeadless {
    pub fn new(config_path: Option<PathBuf>, pretty: bool) -> Self {
        Self { config_path, pretty }
    }

    fn load_config(&self) -> Result<SeedfileConfig, Box<dyn std::error::Error>> {
        let config = match &self.config_path {
            Some(path) => SeedfileConfig::load_from(path)?,
            None => SeedfileConfig::load_or_default()?,
        };
        Ok(config)
    }

    fn invocation(source: Source) -> Result<Invocation<FileParams>, Box<dyn std::error::Error>> {
        match source {
            Source::ArgsFile(path) => Ok(Invocation::from_file(&path)?),
            Source::Flags { path, content, check_mode } => {
                Ok(Invocation::new(FileParams { path, content }, check_mode))
            }
        }
    }

    /// Produce the result for `source` without printing it.
    pub fn execute(&self, source: Source) -> ModuleResult {
        let config = match self.load_config() {
            Ok(config) => config,
            Err(e) => {
                warn!(target: "seedfile::config", error = %e, "config rejected");
                return ModuleResult::error(e.to_string());
            }
        };

        match Self::invocation(source) {
            Ok(invocation) => invocation.run(&FileModule::new(&config)),
            Err(e) => {
                warn!(target: "seedfile::invocation", error = %e, "arguments rejected");
                ModuleResult::error(e.to_string())
            }
        }
    }

    /// Run and print; returns the process exit code.
    pub fn run(&self, source: Source) -> i32 {
        let result = self.execute(source);
        self.emit(&serde_json::to_value(&result).unwrap_or_default());
        exit_code(&result)
    }

    pub fn print_schema(&self) -> i32 {
        self.emit(&FileModule::default().parameters_schema());
        0
    }

    fn emit(&self, value: &serde_json::Value) {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        match rendered {
            Ok(text) => println!("{}", text),
            Err(e) => println!("{{\"failed\": true, \"msg\": \"{}\"}}", e),
        }
    }
}

pub fn exit_code(result: &ModuleResult) -> i32 {
    if result.failed { 1 } else { 0 }
}
