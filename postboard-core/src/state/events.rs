//! Events that drive the view state machine

/// Inputs to [`super::ViewStateMachine::handle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ViewEvent {
    /// Debounced button press
    ButtonPress { now_ms: u32 },
    /// Periodic loop tick
    Tick { now_ms: u32 },
    /// A summary message replaced the post summary
    SummaryReceived,
    /// A full-text message replaced the post body
    FullTextReceived,
}
