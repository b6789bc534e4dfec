//! Bullseye selection disc shared by the composite and standalone views.

pub mod designation;
pub mod panel;

pub use designation::{DesignationList, TargetDesignation};
pub use panel::{SelectionPanel, SelectionSummary};
