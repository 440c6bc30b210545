//! Games described entirely by a settings file: a flat object state and actions whose
//! preconditions only ask whether their object parameters exist.
use super::action_set::ActionSet;
use super::definition::{ActionDefinition, DefinitionRef};
use super::error::ConfigError;
use super::grounded::GroundedAction;
use super::parameters::{
    is_object_name, NoParameters, ObjectParameters, Parameters, ValueParameters,
};
use super::product::cartesian_product;
use super::schema::{ParamKind, ParameterSchema};
use log::{debug, warn};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::iter;
use std::path::Path;
use std::sync::Arc;

/// Integer slots wider than this are not enumerated.
pub const MAX_INT_DOMAIN: i64 = 1024;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectState {
    /// Object names by class.
    pub objects: BTreeMap<String, Vec<String>>,
    /// Action names each agent may not use.
    pub disabled: BTreeMap<String, BTreeSet<String>>,
}

impl ObjectState {
    pub fn objects_of_class(&self, class: &str) -> &[String] {
        self.objects.get(class).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_object(&self, class: &str, name: &str) -> bool {
        self.objects_of_class(class).iter().any(|o| o == name)
    }

    pub fn is_disabled(&self, agent: &str, action: &str) -> bool {
        self.disabled
            .get(agent)
            .map_or(false, |actions| actions.contains(action))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterVariant {
    #[default]
    Value,
    Object,
}

#[derive(Debug)]
pub struct ConfiguredAction {
    name: String,
    schema: Arc<ParameterSchema>,
    variant: ParameterVariant,
}

impl ConfiguredAction {
    pub fn new(name: impl Into<String>, schema: ParameterSchema, variant: ParameterVariant) -> Self {
        ConfiguredAction {
            name: name.into(),
            schema: Arc::new(schema),
            variant,
        }
    }

    fn slot_domain(&self, state: &ObjectState, kind: &ParamKind) -> Option<Vec<String>> {
        match kind {
            ParamKind::Object { class } => Some(state.objects_of_class(class).to_vec()),
            ParamKind::Int { min, max } => {
                if max.saturating_sub(*min) >= MAX_INT_DOMAIN {
                    warn!("{}: integer range {}..={} too wide to enumerate", self.name, min, max);
                    return None;
                }
                Some((*min..=*max).map(|i| i.to_string()).collect())
            }
            ParamKind::Bool => Some(vec!["true".to_string(), "false".to_string()]),
            ParamKind::Choice { options } => Some(options.clone()),
            ParamKind::Float => {
                warn!("{}: float parameters cannot be enumerated", self.name);
                None
            }
        }
    }
}

impl ActionDefinition<ObjectState> for ConfiguredAction {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    fn new_parameters(&self) -> Box<dyn Parameters> {
        if self.schema.is_empty() {
            return Box::new(NoParameters::new(self.name.clone()));
        }
        match self.variant {
            ParameterVariant::Value => {
                Box::new(ValueParameters::new(self.name.clone(), self.schema.clone()))
            }
            ParameterVariant::Object => {
                Box::new(ObjectParameters::new(self.name.clone(), self.schema.clone()))
            }
        }
    }

    fn check_precondition(
        &self,
        state: &ObjectState,
        grounding: &GroundedAction<ObjectState>,
    ) -> bool {
        if state.is_disabled(grounding.acting_agent(), &self.name) {
            return false;
        }
        if self.schema.is_empty() {
            return true;
        }
        let Some(tokens) = grounding.parameters_as_string() else {
            return false;
        };
        self.schema
            .slots()
            .iter()
            .zip(tokens.iter())
            .all(|(slot, token)| match &slot.kind {
                ParamKind::Object { class } => state.has_object(class, token),
                _ => true,
            })
    }

    fn parameter_bindings<'a>(
        &'a self,
        state: &'a ObjectState,
        agent: &'a str,
    ) -> Box<dyn Iterator<Item = Vec<String>> + 'a> {
        let domains: Option<Vec<Vec<String>>> = self
            .schema
            .slots()
            .iter()
            .map(|slot| self.slot_domain(state, &slot.kind))
            .collect();
        match domains {
            Some(domains) => {
                debug!(
                    "Binding domains of {} for {}: {:?}",
                    self.name,
                    agent,
                    domains.iter().map(Vec::len).collect::<Vec<_>>()
                );
                Box::new(cartesian_product(domains))
            }
            None => Box::new(iter::empty()),
        }
    }
}

fn invalid_name(kind: &'static str, name: &str) -> ConfigError {
    ConfigError::InvalidName {
        kind,
        name: name.to_string(),
    }
}

fn check_name(kind: &'static str, name: &str) -> Result<(), ConfigError> {
    if is_object_name(name) {
        Ok(())
    } else {
        Err(invalid_name(kind, name))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActionSettings {
    pub name: String,
    #[serde(default)]
    pub variant: ParameterVariant,
    #[serde(default)]
    pub parameters: ParameterSchema,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameSettings {
    pub agents: Vec<String>,
    #[serde(default)]
    pub objects: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub disabled: BTreeMap<String, BTreeSet<String>>,
    pub actions: Vec<ActionSettings>,
}

impl GameSettings {
    pub fn from_file(path: impl AsRef<Path>) -> Result<GameSettings, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<GameSettings, ConfigError> {
        let settings: GameSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Every name that ends up in a rendering must be a single non-empty word, and agent
    /// names may not contain the `:` separating agent from action.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = BTreeSet::new();
        for agent in &self.agents {
            if agent.contains(':') {
                return Err(invalid_name("agent", agent));
            }
            check_name("agent", agent)?;
            if !seen.insert(agent.as_str()) {
                return Err(ConfigError::DuplicateAgent(agent.clone()));
            }
        }
        for (class, names) in &self.objects {
            check_name("object class", class)?;
            for name in names {
                check_name("object", name)?;
            }
        }
        for action in &self.actions {
            check_name("action", &action.name)?;
            for slot in action.parameters.slots() {
                match &slot.kind {
                    ParamKind::Object { class } => check_name("object class", class)?,
                    ParamKind::Choice { options } => {
                        for option in options {
                            check_name("choice option", option)?;
                        }
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    pub fn action_set(&self) -> Result<ActionSet<ObjectState>, ConfigError> {
        self.validate()?;
        let mut actions = ActionSet::new();
        for settings in &self.actions {
            let definition: DefinitionRef<ObjectState> = Arc::new(ConfiguredAction::new(
                settings.name.clone(),
                settings.parameters.clone(),
                settings.variant,
            ));
            actions.insert(definition)?;
        }
        Ok(actions)
    }

    pub fn state(&self) -> ObjectState {
        ObjectState {
            objects: self.objects.clone(),
            disabled: self.disabled.clone(),
        }
    }
}
