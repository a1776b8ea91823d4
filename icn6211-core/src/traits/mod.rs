//! Hardware abstraction traits
//!
//! These traits define the interface between the panel lifecycle logic
//! and the board: the DSI host, the supply rail and the backlight. GPIO
//! lines and delays come from `embedded-hal` directly.

pub mod panel;
pub mod power;
pub mod transport;

pub use panel::Panel;
pub use power::{Backlight, PowerRail};
pub use transport::DsiTransport;
