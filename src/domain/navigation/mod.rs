//! Navigation module - which result view is shown.

mod navigator;
mod view_state;

pub use navigator::{NavigationOutcome, NavigationStateMachine, NavigationWarning};
pub use view_state::ViewState;
