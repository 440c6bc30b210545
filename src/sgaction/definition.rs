use super::grounded::GroundedAction;
use super::parameters::Parameters;
use super::schema::ParameterSchema;
use log::{trace, warn};
use std::fmt::Debug;
use std::iter;
use std::sync::Arc;

/// Shared handle to a definition. Every grounding of a definition holds one of these.
pub type DefinitionRef<S> = Arc<dyn ActionDefinition<S>>;

///
/// The schema-level description of an action in a game over states of type `S`.
///
/// Definitions are immutable once built and shared read-only by all of their groundings, so
/// they must be safe to use from several threads at once.
///
pub trait ActionDefinition<S>: Debug + Send + Sync {
    /// Unique within a game's action set.
    fn name(&self) -> &str;

    fn schema(&self) -> &ParameterSchema;

    fn is_parameterized(&self) -> bool {
        !self.schema().is_empty()
    }

    /// A fresh, unset parameter assignment of whichever [`Parameters`] variant this definition
    /// grounds into.
    fn new_parameters(&self) -> Box<dyn Parameters>;

    /// Whether `grounding` may be applied in `state`.
    fn check_precondition(&self, state: &S, grounding: &GroundedAction<S>) -> bool;

    /// Candidate parameter token lists for `agent` in `state`, before precondition filtering.
    /// Produced lazily so large parameter spaces can be walked without materialising them.
    /// Parameterized definitions override this; the default is the single empty binding.
    fn parameter_bindings<'a>(
        &'a self,
        _state: &'a S,
        _agent: &'a str,
    ) -> Box<dyn Iterator<Item = Vec<String>> + 'a> {
        Box::new(iter::once(Vec::new()))
    }
}

/// Lazily grounds `definition` for `agent` in `state`, yielding one grounded action per
/// candidate binding that parses and passes the precondition. Calling it again starts over.
pub fn enumerate_groundings<'a, S>(
    definition: &'a DefinitionRef<S>,
    state: &'a S,
    agent: &'a str,
) -> impl Iterator<Item = GroundedAction<S>> + 'a {
    let bindings: Box<dyn Iterator<Item = Vec<String>> + 'a> = if agent.is_empty() {
        warn!("Not grounding {} for an unnamed agent", definition.name());
        Box::new(iter::empty())
    } else {
        definition.parameter_bindings(state, agent)
    };
    bindings.filter_map(move |tokens| {
        let mut grounding = GroundedAction::new(agent, definition.clone());
        if let Err(e) = grounding.init_params_with_string_rep(&tokens) {
            warn!(
                "Skipping binding {:?} for {}: {}",
                tokens,
                definition.name(),
                e
            );
            return None;
        }
        if grounding.applicable_in_state(state) {
            Some(grounding)
        } else {
            trace!("Not applicable: {}", grounding);
            None
        }
    })
}
