//! Grounded agent actions for multi-agent stochastic games.
//!
//! An [`definition::ActionDefinition`] is the schema-level description of something an agent can
//! do. A [`grounded::GroundedAction`] binds one of those definitions to an acting agent and a
//! concrete parameter assignment, and is what simulators, joint-action enumeration and policy
//! tables actually pass around.
pub mod action_set;
pub mod configured;
pub mod definition;
pub mod error;
pub mod grounded;
pub mod joint_action;
pub mod parameters;
pub mod product;
pub mod schema;

pub use action_set::ActionSet;
pub use definition::{enumerate_groundings, ActionDefinition, DefinitionRef};
pub use error::{ConfigError, ParseError};
pub use grounded::{GroundedAction, GroundedActionRecord};
pub use joint_action::JointAction;
pub use parameters::{NoParameters, ObjectParameters, ParamValue, Parameters, ValueParameters};
pub use schema::{ParamKind, ParamSlot, ParameterSchema};
