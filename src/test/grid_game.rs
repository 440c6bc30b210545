use crate::sgaction::definition::{ActionDefinition, DefinitionRef};
use crate::sgaction::grounded::GroundedAction;
use crate::sgaction::parameters::{
    NoParameters, ObjectParameters, ParamValue, Parameters, ValueParameters,
};
use crate::sgaction::schema::{ParamKind, ParamSlot, ParameterSchema};
use std::collections::HashMap;
use std::sync::Arc;

pub const GRID_SIZE: i32 = 3;
static DIRECTIONS: [&str; 4] = ["north", "south", "east", "west"];

///
/// A tiny grid world for exercising groundings: agents stand on cells, items lie on cells.
///
/// A is on the north edge at (1, 0), B in the middle, C in the south-west corner. The item
/// "bad key" is deliberately not a valid object name.
///
#[derive(Clone, Debug)]
pub struct GridState {
    pub positions: HashMap<String, (i32, i32)>,
    pub items: Vec<(String, (i32, i32))>,
}

pub fn grid_state() -> GridState {
    GridState {
        positions: [("A", (1, 0)), ("B", (1, 1)), ("C", (0, 2))]
            .into_iter()
            .map(|(agent, pos)| (agent.to_string(), pos))
            .collect(),
        items: vec![
            ("coin".to_string(), (1, 1)),
            ("gem".to_string(), (1, 1)),
            ("key".to_string(), (0, 2)),
            ("bad key".to_string(), (0, 2)),
        ],
    }
}

#[derive(Debug)]
pub struct GridMove {
    schema: Arc<ParameterSchema>,
}

impl ActionDefinition<GridState> for GridMove {
    fn name(&self) -> &str {
        "move"
    }

    fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    fn new_parameters(&self) -> Box<dyn Parameters> {
        Box::new(ValueParameters::new(self.name(), self.schema.clone()))
    }

    fn check_precondition(&self, state: &GridState, grounding: &GroundedAction<GridState>) -> bool {
        let Some((x, y)) = state.positions.get(grounding.acting_agent()) else {
            return false;
        };
        let dir = match grounding
            .parameters_as::<ValueParameters>()
            .and_then(|p| p.value("dir"))
        {
            Some(ParamValue::Choice(dir)) => dir.as_str(),
            _ => return false,
        };
        let (nx, ny) = match dir {
            "north" => (*x, y - 1),
            "south" => (*x, y + 1),
            "east" => (x + 1, *y),
            "west" => (x - 1, *y),
            _ => return false,
        };
        (0..GRID_SIZE).contains(&nx) && (0..GRID_SIZE).contains(&ny)
    }

    fn parameter_bindings<'a>(
        &'a self,
        _state: &'a GridState,
        _agent: &'a str,
    ) -> Box<dyn Iterator<Item = Vec<String>> + 'a> {
        Box::new(DIRECTIONS.iter().map(|d| vec![d.to_string()]))
    }
}

pub fn move_action() -> DefinitionRef<GridState> {
    Arc::new(GridMove {
        schema: Arc::new(ParameterSchema::new(vec![ParamSlot::new(
            "dir",
            ParamKind::Choice {
                options: DIRECTIONS.iter().map(|d| d.to_string()).collect(),
            },
        )])),
    })
}

#[derive(Debug)]
pub struct GridPick {
    schema: Arc<ParameterSchema>,
}

impl ActionDefinition<GridState> for GridPick {
    fn name(&self) -> &str {
        "pick"
    }

    fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    fn new_parameters(&self) -> Box<dyn Parameters> {
        Box::new(ObjectParameters::new(self.name(), self.schema.clone()))
    }

    fn check_precondition(&self, state: &GridState, grounding: &GroundedAction<GridState>) -> bool {
        let Some(position) = state.positions.get(grounding.acting_agent()) else {
            return false;
        };
        let Some(item) = grounding
            .parameters_as::<ObjectParameters>()
            .and_then(|p| p.object("item"))
        else {
            return false;
        };
        state
            .items
            .iter()
            .any(|(name, at)| name == item && at == position)
    }

    fn parameter_bindings<'a>(
        &'a self,
        state: &'a GridState,
        _agent: &'a str,
    ) -> Box<dyn Iterator<Item = Vec<String>> + 'a> {
        Box::new(state.items.iter().map(|(name, _)| vec![name.clone()]))
    }
}

pub fn pick_action() -> DefinitionRef<GridState> {
    Arc::new(GridPick {
        schema: Arc::new(ParameterSchema::new(vec![ParamSlot::new(
            "item",
            ParamKind::Object {
                class: "item".to_string(),
            },
        )])),
    })
}

#[derive(Debug, Default)]
pub struct GridWait {
    schema: ParameterSchema,
}

impl ActionDefinition<GridState> for GridWait {
    fn name(&self) -> &str {
        "wait"
    }

    fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    fn new_parameters(&self) -> Box<dyn Parameters> {
        Box::new(NoParameters::new(self.name()))
    }

    fn check_precondition(&self, state: &GridState, grounding: &GroundedAction<GridState>) -> bool {
        state.positions.contains_key(grounding.acting_agent())
    }
}

pub fn wait_action() -> DefinitionRef<GridState> {
    Arc::new(GridWait::default())
}
