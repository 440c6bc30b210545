use super::action_set::ActionSet;
use super::grounded::GroundedAction;
use super::product::cartesian_product;
use linked_hash_set::LinkedHashSet;
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

///
/// One grounded action per agent for a single simultaneous step, ordered by agent name.
///
pub struct JointAction<S> {
    actions: BTreeMap<String, GroundedAction<S>>,
}

impl<S> Default for JointAction<S> {
    fn default() -> Self {
        JointAction {
            actions: BTreeMap::new(),
        }
    }
}

impl<S> JointAction<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files `action` under its acting agent, returning whatever that agent had before.
    pub fn add_action(&mut self, action: GroundedAction<S>) -> Option<GroundedAction<S>> {
        self.actions
            .insert(action.acting_agent().to_string(), action)
    }

    pub fn action(&self, agent: &str) -> Option<&GroundedAction<S>> {
        self.actions.get(agent)
    }

    pub fn agents(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn actions(&self) -> impl Iterator<Item = &GroundedAction<S>> {
        self.actions.values()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn copy(&self) -> JointAction<S> {
        JointAction {
            actions: self
                .actions
                .iter()
                .map(|(agent, action)| (agent.clone(), action.copy()))
                .collect(),
        }
    }

    /// Every combination of legal groundings for the given agents, each agent drawing from its
    /// own action set. If any agent has no legal grounding there are no joint actions. An agent
    /// listed more than once keeps only its first entry.
    pub fn all_joint_actions(state: &S, agents: &[(&str, &ActionSet<S>)]) -> Vec<JointAction<S>> {
        let mut seen = BTreeSet::new();
        let agents: Vec<(&str, &ActionSet<S>)> = agents
            .iter()
            .filter(|(agent, _)| {
                let first = seen.insert(*agent);
                if !first {
                    warn!("Agent {} listed more than once; ignoring repeat", agent);
                }
                first
            })
            .copied()
            .collect();
        let per_agent: Vec<Vec<GroundedAction<S>>> = agents
            .iter()
            .map(|(agent, actions)| actions.all_groundings(state, agent).collect())
            .collect();
        debug!(
            "Joint action domains: {:?}",
            agents
                .iter()
                .zip(per_agent.iter())
                .map(|((agent, _), groundings)| (*agent, groundings.len()))
                .collect::<Vec<_>>()
        );
        cartesian_product(per_agent)
            .map(|pick| {
                let mut joint = JointAction::new();
                for action in pick {
                    joint.add_action(action);
                }
                joint
            })
            .collect()
    }
}

impl<S> FromIterator<GroundedAction<S>> for JointAction<S> {
    fn from_iter<I: IntoIterator<Item = GroundedAction<S>>>(iter: I) -> Self {
        let mut joint = JointAction::new();
        for action in iter {
            joint.add_action(action);
        }
        joint
    }
}

impl<S> Clone for JointAction<S> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<S> PartialEq for JointAction<S> {
    fn eq(&self, other: &Self) -> bool {
        self.actions == other.actions
    }
}

impl<S> Eq for JointAction<S> {}

impl<S> Hash for JointAction<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for action in self.actions.values() {
            action.hash(state);
        }
    }
}

impl<S> fmt::Display for JointAction<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.actions.values().map(|a| a.to_string()).collect();
        f.write_str(&rendered.join(";"))
    }
}

impl<S> fmt::Debug for JointAction<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.actions.values()).finish()
    }
}

/// Drops groundings that share an (agent, action name) slot with an earlier one, keeping the
/// first of each in order.
pub fn distinct_slots<S, I>(groundings: I) -> LinkedHashSet<GroundedAction<S>>
where
    I: IntoIterator<Item = GroundedAction<S>>,
{
    let mut slots = LinkedHashSet::new();
    for grounding in groundings {
        if !slots.contains(&grounding) {
            slots.insert(grounding);
        }
    }
    slots
}
