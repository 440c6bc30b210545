//! Grounded actions: a definition bound to an acting agent and a parameter assignment.
use super::definition::DefinitionRef;
use super::error::ParseError;
use super::parameters::Parameters;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

///
/// A concrete, agent-bound action instance.
///
/// The acting agent and the definition are fixed at construction. The parameter assignment is
/// set once, either by the constructor or by [`GroundedAction::init_params_with_string_rep`],
/// and is read-only after that; take a [`GroundedAction::copy`] before giving the action to
/// another rollout, step or thread.
///
/// # Identity
///
/// Equality and hashing look only at the acting agent and the definition's *name*. Two
/// groundings of the same action by the same agent with different parameters are equal and
/// hash the same. Joint-action bookkeeping and lookup tables keyed by (agent, action name)
/// depend on this, so it must not be changed to compare parameters. Compare
/// [`GroundedAction::parameters_as_string`] as well when parameters matter.
///
pub struct GroundedAction<S> {
    acting_agent: String,
    action: DefinitionRef<S>,
    params: Box<dyn Parameters>,
}

impl<S> GroundedAction<S> {
    /// Parameters start unset, in whatever form the definition's variant uses. Nothing is
    /// checked against the schema until the parameters are initialised.
    pub fn new(acting_agent: impl Into<String>, action: DefinitionRef<S>) -> GroundedAction<S> {
        let params = action.new_parameters();
        GroundedAction::with_parameters(acting_agent, action, params)
    }

    /// # Panics
    ///
    /// In debug builds, if `acting_agent` is empty. [`super::ActionSet::ground`] reports that
    /// case as a [`ParseError`] instead.
    pub fn with_parameters(
        acting_agent: impl Into<String>,
        action: DefinitionRef<S>,
        params: Box<dyn Parameters>,
    ) -> GroundedAction<S> {
        let acting_agent = acting_agent.into();
        debug_assert!(!acting_agent.is_empty(), "acting agent must be named");
        GroundedAction {
            acting_agent,
            action,
            params,
        }
    }

    pub fn acting_agent(&self) -> &str {
        &self.acting_agent
    }

    pub fn action(&self) -> &DefinitionRef<S> {
        &self.action
    }

    pub fn action_name(&self) -> &str {
        self.action.name()
    }

    pub fn is_parameterized(&self) -> bool {
        self.action.is_parameterized()
    }

    pub fn applicable_in_state(&self, state: &S) -> bool {
        self.action.check_precondition(state, self)
    }

    /// Shares the agent and definition, and deep-copies the parameters.
    pub fn copy(&self) -> GroundedAction<S> {
        GroundedAction {
            acting_agent: self.acting_agent.clone(),
            action: self.action.clone(),
            params: self.params.copy(),
        }
    }

    pub fn init_params_with_string_rep<T: AsRef<str>>(
        &mut self,
        tokens: &[T],
    ) -> Result<(), ParseError> {
        let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
        self.params.init_params_with_string_rep(&tokens)
    }

    pub fn parameters_as_string(&self) -> Option<Vec<String>> {
        self.params.parameters_as_string()
    }

    pub fn parameters(&self) -> &dyn Parameters {
        self.params.as_ref()
    }

    /// The parameters as their concrete variant, for precondition and execution code that
    /// knows which variant its definition produces.
    pub fn parameters_as<P: Parameters + 'static>(&self) -> Option<&P> {
        self.params.as_any().downcast_ref::<P>()
    }

    /// The action name and parameters, without the agent.
    pub fn just_action_string(&self) -> String {
        let mut buf = self.action_name().to_string();
        self.append_parameters(&mut buf);
        buf
    }

    pub fn to_record(&self) -> GroundedActionRecord {
        GroundedActionRecord {
            agent: self.acting_agent.clone(),
            action: self.action_name().to_string(),
            params: self.parameters_as_string().unwrap_or_default(),
        }
    }

    fn append_parameters(&self, buf: &mut String) {
        if let Some(params) = self.parameters_as_string() {
            for param in params {
                buf.push(' ');
                buf.push_str(&param);
            }
        }
    }
}

impl<S> Clone for GroundedAction<S> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<S> PartialEq for GroundedAction<S> {
    fn eq(&self, other: &Self) -> bool {
        self.acting_agent == other.acting_agent && self.action_name() == other.action_name()
    }
}

impl<S> Eq for GroundedAction<S> {}

impl<S> Hash for GroundedAction<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        format!("{}::{}", self.acting_agent, self.action_name()).hash(state);
    }
}

impl<S> fmt::Display for GroundedAction<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = format!("{}:{}", self.acting_agent, self.action_name());
        self.append_parameters(&mut buf);
        f.write_str(&buf)
    }
}

impl<S> fmt::Debug for GroundedAction<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroundedAction")
            .field("acting_agent", &self.acting_agent)
            .field("action", &self.action_name())
            .field("params", &self.params)
            .finish()
    }
}

/// Serializable form of a grounded action, for logs and reports. Turning one back into a
/// [`GroundedAction`] needs the game's [`super::ActionSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundedActionRecord {
    pub agent: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sgaction::parameters::ValueParameters;
    use crate::test::grid_game::{grid_state, move_action, pick_action, wait_action};
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn moving(agent: &str, dir: &str) -> GroundedAction<crate::test::grid_game::GridState> {
        let mut g = GroundedAction::new(agent, move_action());
        g.init_params_with_string_rep(&[dir]).unwrap();
        g
    }

    #[test]
    fn test_move_north_scenario() {
        let mut g = GroundedAction::new("A", move_action());
        g.init_params_with_string_rep(&["north"]).unwrap();
        assert_eq!(g.to_string(), "A:move north");
        assert_eq!(g.just_action_string(), "move north");
        assert!(g.is_parameterized());

        let mut copy = g.copy();
        copy.init_params_with_string_rep(&["south"]).unwrap();
        assert_eq!(g.parameters_as_string(), Some(vec!["north".to_string()]));
        assert_eq!(copy.to_string(), "A:move south");
    }

    #[test]
    fn test_equality_ignores_parameters() {
        let north = moving("A", "north");
        let south = moving("A", "south");
        assert_eq!(north, south);
        assert_eq!(hash_of(&north), hash_of(&south));
        assert_ne!(north.parameters_as_string(), south.parameters_as_string());
    }

    #[test]
    fn test_equality_respects_agent_and_name() {
        assert_ne!(moving("A", "north"), moving("B", "north"));
        let wait = GroundedAction::new("A", wait_action());
        assert_ne!(moving("A", "north"), wait);
    }

    #[test]
    fn test_equality_uses_definition_name_not_instance() {
        // move_action() builds a new definition each call.
        let a = GroundedAction::new("A", move_action());
        let b = GroundedAction::new("A", move_action());
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_hash_set_collapses_parameter_variants() {
        let set: HashSet<_> = vec![
            moving("A", "north"),
            moving("A", "south"),
            moving("B", "north"),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_copy_independence() {
        let state = grid_state();
        // A is on the north edge.
        let g = moving("A", "north");
        assert!(!g.applicable_in_state(&state));

        let mut copy = g.copy();
        assert_eq!(copy, g);
        copy.init_params_with_string_rep(&["south"]).unwrap();
        assert!(copy.applicable_in_state(&state));

        assert!(!g.applicable_in_state(&state));
        assert_eq!(g.parameters_as_string(), Some(vec!["north".to_string()]));
        assert!(copy.parameters_as::<ValueParameters>().is_some());
    }

    #[test]
    fn test_unparameterized_rendering() {
        let mut wait = GroundedAction::new("B", wait_action());
        assert!(!wait.is_parameterized());
        assert_eq!(wait.parameters_as_string(), None);
        assert_eq!(wait.to_string(), "B:wait");
        assert_eq!(wait.just_action_string(), "wait");
        let empty: [&str; 0] = [];
        wait.init_params_with_string_rep(&empty).unwrap();
        assert_eq!(wait.to_string(), "B:wait");
        assert!(wait.init_params_with_string_rep(&["now"]).is_err());
    }

    #[test]
    fn test_malformed_count_rejected() {
        let mut g = moving("A", "north");
        assert_eq!(
            g.init_params_with_string_rep(&["south", "east"]),
            Err(ParseError::TokenCount {
                action: "move".to_string(),
                expected: 1,
                found: 2
            })
        );
        assert_eq!(g.parameters_as_string(), Some(vec!["north".to_string()]));
    }

    #[test]
    fn test_round_trip_through_grounded_action() {
        let mut g = GroundedAction::new("C", pick_action());
        g.init_params_with_string_rep(&["key"]).unwrap();
        let tokens = g.parameters_as_string().unwrap();
        g.init_params_with_string_rep(&tokens).unwrap();
        assert_eq!(g.parameters_as_string().unwrap(), tokens);
    }

    #[test]
    fn test_record() {
        let record = moving("A", "east").to_record();
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"agent":"A","action":"move","params":["east"]}"#
        );
        let wait = GroundedAction::new("A", wait_action()).to_record();
        assert_eq!(
            serde_json::to_string(&wait).unwrap(),
            r#"{"agent":"A","action":"wait"}"#
        );
    }
}
