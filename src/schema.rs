//! JSON Schema backed wrapper adding parse/construct/stringify helpers to a type

use jsonschema::Validator;
use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;

/// One schema violation found in an instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// JSON pointer to the offending value (empty for the root)
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to compile schema: {0}")]
    Compile(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data type: expected JSON text, object, array or null, got {0}")]
    InvalidDataType(&'static str),

    #[error("Validation failed: {}", join_issues(.issues))]
    Validation { issues: Vec<ValidationIssue> },

    /// `create` was called on a schema built without a factory
    #[error("No create callback provided for this schema")]
    MissingFactory,
}

impl SchemaError {
    /// True for programming mistakes, as opposed to bad data
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::MissingFactory)
    }

    /// Schema violations carried by a validation failure
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::Validation { issues } => issues.as_slice(),
            _ => &[],
        }
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Raw input accepted by the parse helpers: JSON text or an already decoded value
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    Text(String),
    Value(Value),
}

impl From<&str> for RawInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RawInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for RawInput {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            other => Self::Value(other),
        }
    }
}

impl From<&Value> for RawInput {
    fn from(value: &Value) -> Self {
        Self::from(value.clone())
    }
}

impl RawInput {
    fn into_value(self) -> Result<Value, SchemaError> {
        match self {
            Self::Text(text) | Self::Value(Value::String(text)) => Ok(serde_json::from_str(&text)?),
            Self::Value(value @ (Value::Object(_) | Value::Array(_) | Value::Null)) => Ok(value),
            Self::Value(Value::Bool(_)) => Err(SchemaError::InvalidDataType("boolean")),
            Self::Value(Value::Number(_)) => Err(SchemaError::InvalidDataType("number")),
        }
    }
}

/// Outcome of [`Schema::json_parse_safe`]
#[derive(Debug, Clone, PartialEq)]
pub enum SafeParse<T> {
    Success(T),
    Failure(Vec<ValidationIssue>),
}

impl<T> SafeParse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    pub fn into_result(self) -> Result<T, SchemaError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(issues) => Err(SchemaError::Validation { issues }),
        }
    }
}

type Factory<T> = Box<dyn Fn(&Schema<T>) -> T + Send + Sync>;

/// A type paired with its generated JSON Schema and a compiled validator.
///
/// The optional factory backs [`Schema::create`].
pub struct Schema<T> {
    document: Value,
    validator: Validator,
    factory: Option<Factory<T>>,
    _type: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("document", &self.document)
            .field("has_factory", &self.factory.is_some())
            .finish()
    }
}

impl<T> Schema<T>
where
    T: JsonSchema + Serialize + DeserializeOwned,
{
    /// Generate and compile the schema for `T`
    pub fn compile() -> Result<Self, SchemaError> {
        let document = serde_json::to_value(schemars::schema_for!(T))?;
        let validator = jsonschema::validator_for(&document)
            .map_err(|e| SchemaError::Compile(e.to_string()))?;

        Ok(Self {
            document,
            validator,
            factory: None,
            _type: PhantomData,
        })
    }

    /// Compile the schema and attach a factory for default instances
    pub fn with_factory<F>(factory: F) -> Result<Self, SchemaError>
    where
        F: Fn(&Schema<T>) -> T + Send + Sync + 'static,
    {
        let mut schema = Self::compile()?;
        schema.factory = Some(Box::new(factory));
        Ok(schema)
    }

    /// Generated JSON Schema document
    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn has_factory(&self) -> bool {
        self.factory.is_some()
    }

    /// Every violation of the schema found in `instance`
    pub fn check(&self, instance: &Value) -> Vec<ValidationIssue> {
        self.validator
            .iter_errors(instance)
            .map(|err| ValidationIssue {
                path: err.instance_path.to_string(),
                message: err.to_string(),
            })
            .collect()
    }

    /// Validate `value` against the schema and hand it back unchanged
    pub fn construct(&self, value: T) -> Result<T, SchemaError> {
        let instance = serde_json::to_value(&value)?;
        let issues = self.check(&instance);
        if !issues.is_empty() {
            return Err(SchemaError::Validation { issues });
        }
        Ok(value)
    }

    /// Parse raw input into `T`, failing on any schema violation
    pub fn json_parse(&self, raw: impl Into<RawInput>) -> Result<T, SchemaError> {
        self.json_parse_safe(raw)?.into_result()
    }

    /// Parse raw input into `T`, reporting schema violations as
    /// [`SafeParse::Failure`].
    ///
    /// Malformed JSON text and non-container values are still errors.
    pub fn json_parse_safe(&self, raw: impl Into<RawInput>) -> Result<SafeParse<T>, SchemaError> {
        let instance = raw.into().into_value()?;

        let issues = self.check(&instance);
        if !issues.is_empty() {
            return Ok(SafeParse::Failure(issues));
        }

        match serde_json::from_value(instance) {
            Ok(value) => Ok(SafeParse::Success(value)),
            Err(e) => Ok(SafeParse::Failure(vec![ValidationIssue {
                path: String::new(),
                message: e.to_string(),
            }])),
        }
    }

    /// Compact JSON text for `value`
    pub fn stringify(&self, value: &T) -> Result<String, SchemaError> {
        Ok(serde_json::to_string(value)?)
    }

    /// Build a default instance through the factory and validate it
    pub fn create(&self) -> Result<T, SchemaError> {
        let factory = self.factory.as_ref().ok_or(SchemaError::MissingFactory)?;
        self.construct(factory(self))
    }
}
