//! Panel lifecycle state
//!
//! The state machine is explicit, finite and linear. The controller in
//! `icn6211-drivers` owns the only mutable instance.

pub mod events;
pub mod machine;

pub use events::PanelEvent;
pub use machine::PanelState;
