use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::InvocationError;
use crate::modules::{Module, ModuleResult};

/// Arguments handed over by the host: the module's own parameters plus the
/// host's control flags. Unknown host-private keys are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound = "P: DeserializeOwned")]
pub struct Invocation<P> {
    #[serde(flatten)]
    pub params: P,
    #[serde(default, alias = "_ansible_check_mode")]
    pub check_mode: bool,
}

impl<P: DeserializeOwned> Invocation<P> {
    pub fn new(params: P, check_mode: bool) -> Self {
        Self { params, check_mode }
    }

    pub fn from_json(raw: &str) -> Result<Self, InvocationError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, InvocationError> {
        let raw = fs::read_to_string(path).map_err(|source| InvocationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(target: "seedfile::invocation", path = %path.display(), "arguments file read");
        Self::from_json(&raw)
    }

    /// Dispatch to the module, honoring check mode, and echo the received
    /// parameters back in the result.
    pub fn run<M>(self, module: &M) -> ModuleResult
    where
        M: Module<Params = P>,
        P: serde::Serialize,
    {
        let module_args = serde_json::to_value(&self.params).unwrap_or_default();
        debug!(target: "seedfile::invocation", module = module.name(), check_mode = self.check_mode, %module_args, "invoking module");

        let result = if self.check_mode {
            module.check(self.params)
        } else {
            module.run(self.params)
        };
        result.with_module_args(module_args)
    }
}
