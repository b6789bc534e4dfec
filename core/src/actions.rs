//! Named toggle actions exposed to the host panel, each with an inverse
//! getter so the host can persist the value.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::prelude::{MapError, MapResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    HeadingUp,
    MapScale,
    BullseyeVisible,
    TargetsVisible,
    ThreatsVisible,
    WaypointsVisible,
    SelectionPanelVisible,
    ClearDesignations,
    SelectionRingsVisible,
}

impl ActionId {
    pub const ALL: [ActionId; 9] = [
        ActionId::HeadingUp,
        ActionId::MapScale,
        ActionId::BullseyeVisible,
        ActionId::TargetsVisible,
        ActionId::ThreatsVisible,
        ActionId::WaypointsVisible,
        ActionId::SelectionPanelVisible,
        ActionId::ClearDesignations,
        ActionId::SelectionRingsVisible,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ActionId::HeadingUp => "heading_up",
            ActionId::MapScale => "map_scale",
            ActionId::BullseyeVisible => "bullseye_visible",
            ActionId::TargetsVisible => "targets_visible",
            ActionId::ThreatsVisible => "threats_visible",
            ActionId::WaypointsVisible => "waypoints_visible",
            ActionId::SelectionPanelVisible => "selection_panel_visible",
            ActionId::ClearDesignations => "clear_designations",
            ActionId::SelectionRingsVisible => "selection_rings_visible",
        }
    }

    pub fn is_numeric(self) -> bool {
        self == ActionId::MapScale
    }
}

impl FromStr for ActionId {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionId::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| MapError::UnknownAction(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionValue {
    Bool(bool),
    Number(f64),
}

impl ActionValue {
    pub fn expect_bool(self, action: ActionId) -> MapResult<bool> {
        match self {
            ActionValue::Bool(value) => Ok(value),
            ActionValue::Number(_) => Err(MapError::ActionValueKind {
                action: action.name(),
                expected: "boolean",
            }),
        }
    }

    pub fn expect_number(self, action: ActionId) -> MapResult<f64> {
        match self {
            ActionValue::Number(value) => Ok(value),
            ActionValue::Bool(_) => Err(MapError::ActionValueKind {
                action: action.name(),
                expected: "numeric",
            }),
        }
    }
}

impl From<bool> for ActionValue {
    fn from(value: bool) -> Self {
        ActionValue::Bool(value)
    }
}

impl From<f64> for ActionValue {
    fn from(value: f64) -> Self {
        ActionValue::Number(value)
    }
}

/// Setter/getter pair surface implemented by views that expose actions.
pub trait ActionTarget {
    fn set_action(&mut self, action: ActionId, value: ActionValue) -> MapResult<()>;
    fn action_value(&self, action: ActionId) -> MapResult<ActionValue>;
}
