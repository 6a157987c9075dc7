use wordlens_core::types::ResolutionResult;

/// Outcomes sent from background resolution tasks back to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    Resolved(ResolutionResult),
    RefreshFailed(String),
}
