use super::definition::{enumerate_groundings, DefinitionRef};
use super::error::{ConfigError, ParseError};
use super::grounded::{GroundedAction, GroundedActionRecord};

///
/// The action definitions of one game, by name.
///
/// Having the set at hand is what makes the canonical `agent:action p1 p2` rendering and
/// [`GroundedActionRecord`]s parseable again.
///
pub struct ActionSet<S> {
    actions: Vec<DefinitionRef<S>>,
}

impl<S> Default for ActionSet<S> {
    fn default() -> Self {
        ActionSet {
            actions: Vec::new(),
        }
    }
}

impl<S> ActionSet<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, definition: DefinitionRef<S>) -> Result<(), ConfigError> {
        if self.get(definition.name()).is_some() {
            return Err(ConfigError::DuplicateAction(definition.name().to_string()));
        }
        self.actions.push(definition);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&DefinitionRef<S>> {
        self.actions.iter().find(|action| action.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DefinitionRef<S>> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Builds the grounding of `name` for `agent` with parameters parsed from `tokens`.
    pub fn ground<T: AsRef<str>>(
        &self,
        agent: &str,
        name: &str,
        tokens: &[T],
    ) -> Result<GroundedAction<S>, ParseError> {
        if agent.is_empty() {
            return Err(ParseError::EmptyAgent(name.to_string()));
        }
        let definition = self
            .get(name)
            .ok_or_else(|| ParseError::UnknownAction(name.to_string()))?;
        let mut grounding = GroundedAction::new(agent, definition.clone());
        grounding.init_params_with_string_rep(tokens)?;
        Ok(grounding)
    }

    /// Inverse of `GroundedAction`'s `Display`.
    pub fn parse(&self, rendering: &str) -> Result<GroundedAction<S>, ParseError> {
        let malformed = || ParseError::MalformedRendering(rendering.to_string());
        let (agent, rest) = rendering.trim().split_once(':').ok_or_else(malformed)?;
        let mut words = rest.split_whitespace();
        let name = words.next().ok_or_else(malformed)?;
        if agent.is_empty() || rest.starts_with(char::is_whitespace) {
            return Err(malformed());
        }
        let tokens: Vec<&str> = words.collect();
        self.ground(agent, name, &tokens)
    }

    pub fn from_record(
        &self,
        record: &GroundedActionRecord,
    ) -> Result<GroundedAction<S>, ParseError> {
        self.ground(&record.agent, &record.action, &record.params)
    }

    /// Legal groundings of every action in the set, in insertion order.
    pub fn all_groundings<'a>(
        &'a self,
        state: &'a S,
        agent: &'a str,
    ) -> impl Iterator<Item = GroundedAction<S>> + 'a {
        self.actions
            .iter()
            .flat_map(move |definition| enumerate_groundings(definition, state, agent))
    }
}
