//! Parameter assignments and their token codec.
//!
//! A [`Parameters`] value is the mutable half of a grounded action. Each concrete variant decides
//! how many tokens it takes and what each token must look like; the grounded action only ever
//! talks to it through this trait.
use super::error::ParseError;
use super::schema::{ParamKind, ParamSlot, ParameterSchema};
use std::any::Any;
use std::fmt::{self, Debug};
use std::sync::Arc;

pub trait Parameters: Debug + Send + Sync {
    /// A new assignment of the same concrete type with independent storage.
    fn copy(&self) -> Box<dyn Parameters>;

    /// Replaces the current assignment with one parsed from `tokens`. On error the current
    /// assignment is left as it was.
    fn init_params_with_string_rep(&mut self, tokens: &[&str]) -> Result<(), ParseError>;

    /// One token per slot, or `None` when there is nothing to render.
    fn parameters_as_string(&self) -> Option<Vec<String>>;

    fn as_any(&self) -> &dyn Any;
}

fn check_token_count(
    action: &str,
    schema: &ParameterSchema,
    tokens: &[&str],
) -> Result<(), ParseError> {
    if tokens.len() != schema.len() {
        return Err(ParseError::TokenCount {
            action: action.to_string(),
            expected: schema.len(),
            found: tokens.len(),
        });
    }
    Ok(())
}

/// Assignment for unparameterized actions. Only the action name is kept, for error reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoParameters {
    action: String,
}

impl NoParameters {
    pub fn new(action: impl Into<String>) -> Self {
        NoParameters {
            action: action.into(),
        }
    }
}

impl Parameters for NoParameters {
    fn copy(&self) -> Box<dyn Parameters> {
        Box::new(self.clone())
    }

    fn init_params_with_string_rep(&mut self, tokens: &[&str]) -> Result<(), ParseError> {
        if !tokens.is_empty() {
            return Err(ParseError::TokenCount {
                action: self.action.clone(),
                expected: 0,
                found: tokens.len(),
            });
        }
        Ok(())
    }

    fn parameters_as_string(&self) -> Option<Vec<String>> {
        None
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Binds each slot to a state object by name.
#[derive(Debug, Clone)]
pub struct ObjectParameters {
    action: String,
    schema: Arc<ParameterSchema>,
    objects: Option<Vec<String>>,
}

impl ObjectParameters {
    pub fn new(action: impl Into<String>, schema: Arc<ParameterSchema>) -> Self {
        ObjectParameters {
            action: action.into(),
            schema,
            objects: None,
        }
    }

    pub fn objects(&self) -> Option<&[String]> {
        self.objects.as_deref()
    }

    /// The object bound to the slot called `slot`, if set.
    pub fn object(&self, slot: &str) -> Option<&str> {
        let index = self.schema.slots().iter().position(|s| s.name == slot)?;
        self.objects.as_ref().map(|objects| objects[index].as_str())
    }

    pub fn schema(&self) -> &ParameterSchema {
        &self.schema
    }
}

/// Non-empty and free of whitespace, so it survives a space-joined rendering.
pub fn is_object_name(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

impl Parameters for ObjectParameters {
    fn copy(&self) -> Box<dyn Parameters> {
        Box::new(self.clone())
    }

    fn init_params_with_string_rep(&mut self, tokens: &[&str]) -> Result<(), ParseError> {
        check_token_count(&self.action, &self.schema, tokens)?;
        let objects = self
            .schema
            .slots()
            .iter()
            .zip(tokens)
            .map(|(slot, token)| {
                if is_object_name(token) {
                    Ok(token.to_string())
                } else {
                    Err(ParseError::UnresolvableReference {
                        slot: slot.name.clone(),
                        token: token.to_string(),
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.objects = Some(objects);
        Ok(())
    }

    fn parameters_as_string(&self) -> Option<Vec<String>> {
        self.objects.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Object(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Choice(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Object(name) | ParamValue::Choice(name) => write!(f, "{}", name),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl ParamValue {
    /// Parses `token` according to the slot's kind.
    pub fn parse(slot: &ParamSlot, token: &str) -> Result<ParamValue, ParseError> {
        let mismatch = || ParseError::TypeMismatch {
            slot: slot.name.clone(),
            expected: slot.kind.to_string(),
            token: token.to_string(),
        };
        let unresolved = || ParseError::UnresolvableReference {
            slot: slot.name.clone(),
            token: token.to_string(),
        };
        match &slot.kind {
            ParamKind::Object { .. } => {
                if is_object_name(token) {
                    Ok(ParamValue::Object(token.to_string()))
                } else {
                    Err(unresolved())
                }
            }
            ParamKind::Int { min, max } => {
                let value: i64 = token.parse().map_err(|_| mismatch())?;
                if value < *min || value > *max {
                    return Err(unresolved());
                }
                Ok(ParamValue::Int(value))
            }
            ParamKind::Float => token
                .parse::<f64>()
                .map(ParamValue::Float)
                .map_err(|_| mismatch()),
            ParamKind::Bool => token
                .parse::<bool>()
                .map(ParamValue::Bool)
                .map_err(|_| mismatch()),
            ParamKind::Choice { options } => {
                if options.iter().any(|option| option == token) {
                    Ok(ParamValue::Choice(token.to_string()))
                } else {
                    Err(unresolved())
                }
            }
        }
    }
}

/// Binds each slot to a typed value parsed by the slot's [`ParamKind`].
#[derive(Debug, Clone)]
pub struct ValueParameters {
    action: String,
    schema: Arc<ParameterSchema>,
    values: Option<Vec<ParamValue>>,
}

impl ValueParameters {
    pub fn new(action: impl Into<String>, schema: Arc<ParameterSchema>) -> Self {
        ValueParameters {
            action: action.into(),
            schema,
            values: None,
        }
    }

    pub fn values(&self) -> Option<&[ParamValue]> {
        self.values.as_deref()
    }

    pub fn value(&self, slot: &str) -> Option<&ParamValue> {
        let index = self.schema.slots().iter().position(|s| s.name == slot)?;
        self.values.as_ref().map(|values| &values[index])
    }

    pub fn schema(&self) -> &ParameterSchema {
        &self.schema
    }
}

impl Parameters for ValueParameters {
    fn copy(&self) -> Box<dyn Parameters> {
        Box::new(self.clone())
    }

    fn init_params_with_string_rep(&mut self, tokens: &[&str]) -> Result<(), ParseError> {
        check_token_count(&self.action, &self.schema, tokens)?;
        let values = self
            .schema
            .slots()
            .iter()
            .zip(tokens)
            .map(|(slot, token)| ParamValue::parse(slot, token))
            .collect::<Result<Vec<_>, _>>()?;
        self.values = Some(values);
        Ok(())
    }

    fn parameters_as_string(&self) -> Option<Vec<String>> {
        self.values
            .as_ref()
            .map(|values| values.iter().map(ParamValue::to_string).collect())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
