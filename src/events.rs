/// Control stimuli observed by the simulation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Stop the simulation immediately.
    Cancel,

    /// Advance one generation while paused for manual stepping.
    Step,
}
