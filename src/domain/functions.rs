//! Function specs and direct-call dispatch
//!
//! Every callable function is a [`Function`] variant carrying its parameter contract as
//! static data. A call is validated against that contract before the tool provider is
//! invoked.

use serde_json::{Map, Value};
use tracing::info;

use crate::domain::reply::Reply;
use crate::errors::{DispatchError, ToolError};
use crate::tool_provider::ToolProvider;

pub const FUNCTION_KEY: &str = "function";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    GetCurrentTime,
    GetWebpageText,
    GetMetar,
    GetWeather,
}

/// Required and optional parameter keys for one function. The `function` key is
/// always allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSpec {
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

impl FunctionSpec {
    pub fn allows(&self, key: &str) -> bool {
        key == FUNCTION_KEY || self.required.contains(&key) || self.optional.contains(&key)
    }
}

impl Function {
    pub const ALL: [Function; 4] = [
        Function::GetCurrentTime,
        Function::GetWebpageText,
        Function::GetMetar,
        Function::GetWeather,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::GetCurrentTime => "get_current_time",
            Self::GetWebpageText => "get_webpage_text",
            Self::GetMetar => "get_metar",
            Self::GetWeather => "get_weather",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|function| function.name() == name)
    }

    pub fn spec(self) -> FunctionSpec {
        match self {
            Self::GetCurrentTime => FunctionSpec {
                required: &[],
                optional: &[],
            },
            Self::GetWebpageText => FunctionSpec {
                required: &["url"],
                optional: &[],
            },
            Self::GetMetar => FunctionSpec {
                required: &["icao"],
                optional: &[],
            },
            Self::GetWeather => FunctionSpec {
                required: &["city"],
                optional: &[],
            },
        }
    }
}

pub fn available_functions() -> String {
    Function::ALL
        .iter()
        .map(|function| function.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A fully validated call, ready to hand to a tool provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    CurrentTime,
    WebpageText { url: String },
    Metar { icao: String },
    Weather { city: String },
}

impl ToolCall {
    pub fn function(&self) -> Function {
        match self {
            Self::CurrentTime => Function::GetCurrentTime,
            Self::WebpageText { .. } => Function::GetWebpageText,
            Self::Metar { .. } => Function::GetMetar,
            Self::Weather { .. } => Function::GetWeather,
        }
    }

    /// Validates a direct-call field set.
    ///
    /// Checks run in a fixed order: unknown function, missing required parameter,
    /// unexpected parameters, then parameter types.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, DispatchError> {
        let function = fields
            .get(FUNCTION_KEY)
            .and_then(Value::as_str)
            .and_then(Function::from_name)
            .ok_or_else(|| DispatchError::UnknownFunction {
                available: available_functions(),
            })?;
        let spec = function.spec();

        if let Some(missing) = spec
            .required
            .iter()
            .find(|key| fields.get(**key).map_or(true, Value::is_null))
        {
            return Err(DispatchError::MissingParameter(*missing));
        }

        let unexpected: Vec<String> = fields
            .keys()
            .filter(|key| !spec.allows(key))
            .cloned()
            .collect();
        if !unexpected.is_empty() {
            return Err(DispatchError::UnexpectedParameters(unexpected));
        }

        Ok(match function {
            Function::GetCurrentTime => Self::CurrentTime,
            Function::GetWebpageText => Self::WebpageText {
                url: string_param(fields, "url")?,
            },
            Function::GetMetar => Self::Metar {
                icao: string_param(fields, "icao")?,
            },
            Function::GetWeather => Self::Weather {
                city: string_param(fields, "city")?,
            },
        })
    }

    pub async fn invoke(&self, provider: &dyn ToolProvider) -> Result<Value, ToolError> {
        match self {
            Self::CurrentTime => provider.current_time().await.map(Value::String),
            Self::WebpageText { url } => provider.webpage_text(url).await.map(Value::String),
            Self::Metar { icao } => provider.metar(icao).await.map(Value::String),
            Self::Weather { city } => {
                let report = provider.weather(city).await?;
                serde_json::to_value(report)
                    .map_err(|err| ToolError::upstream(format!("Failed to encode weather: {err}")))
            }
        }
    }
}

fn string_param(fields: &Map<String, Value>, key: &'static str) -> Result<String, DispatchError> {
    match fields.get(key) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(value @ (Value::Number(_) | Value::Bool(_))) => Ok(value.to_string()),
        Some(Value::Null) | None => Err(DispatchError::MissingParameter(key)),
        Some(Value::Array(_) | Value::Object(_)) => Err(DispatchError::InvalidParameterType(key)),
    }
}

/// Validates and runs a direct call, turning any failure into an error reply.
pub async fn dispatch_direct(provider: &dyn ToolProvider, fields: &Map<String, Value>) -> Reply {
    let (function, outcome) = match ToolCall::from_fields(fields) {
        Ok(call) => {
            let outcome = call.invoke(provider).await.map_err(DispatchError::from);
            (call.function().name().to_string(), outcome)
        }
        Err(err) => (requested_name(fields), Err(err)),
    };

    let reply = match outcome {
        Ok(result) => Reply::success(result),
        Err(err) => Reply::from(err),
    };

    info!(
        function = %function,
        status = reply.status.as_u16(),
        outcome = if reply.status.is_success() { "success" } else { "failure" },
        "function call handled"
    );

    reply
}

fn requested_name(fields: &Map<String, Value>) -> String {
    fields
        .get(FUNCTION_KEY)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
