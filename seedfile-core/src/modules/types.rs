use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of one module invocation, serialized as the host-facing result.
///
/// `changed` and `failed` are never both true; both false means the target
/// was already converged (or the run was a dry-run).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleResult {
    pub changed: bool,
    pub failed: bool,
    #[serde(alias = "message")]
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub original_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invocation: Option<Value>,
}

impl ModuleResult {
    pub fn changed<S: Into<String>>(msg: S) -> Self {
        Self {
            changed: true,
            msg: msg.into(),
            ..Default::default()
        }
    }

    pub fn unchanged<S: Into<String>>(msg: S) -> Self {
        Self {
            msg: msg.into(),
            ..Default::default()
        }
    }

    pub fn error<S: Into<String>>(msg: S) -> Self {
        Self {
            failed: true,
            msg: msg.into(),
            ..Default::default()
        }
    }

    pub fn with_path<S: Into<String>>(mut self, path: S) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_original_message<S: Into<String>>(mut self, original: S) -> Self {
        self.original_message = original.into();
        self
    }

    pub fn with_module_args(mut self, args: Value) -> Self {
        self.invocation = Some(serde_json::json!({ "module_args": args }));
        self
    }

    pub fn is_success(&self) -> bool {
        !self.failed
    }
}

/// A declarative module the host can invoke.
///
/// `run` converges the target; `check` reports without touching anything.
pub trait Module {
    type Params: DeserializeOwned + Serialize + JsonSchema;

    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;

    fn run(&self, params: Self::Params) -> ModuleResult;

    fn check(&self, _params: Self::Params) -> ModuleResult {
        ModuleResult::default()
    }

    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or(Value::Null)
    }
}
