//! Events that trigger panel state transitions

/// Lifecycle events, one begin/finish pair per host operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelEvent {
    BeginPrepare,
    FinishPrepare,
    BeginEnable,
    FinishEnable,
    BeginDisable,
    FinishDisable,
    BeginUnprepare,
    FinishUnprepare,
}
