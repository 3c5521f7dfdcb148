//! Pipeline phase tracking.
//!
//! Each stage of a run is entered as a `tracing` span, so every event
//! logged while loading, ordering or fetching is tagged with the phase it
//! happened in.

use tracing::span::EnteredSpan;

/// Stages of a documentation or export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    /// Reading and parsing the threat store
    Loading,
    /// Putting records in key order and filtering
    Ordering,
    /// Writing the output document
    Rendering,
    /// Paging through remote search results
    Fetching,
    /// Converting remote issues to threat records
    Mapping,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Ordering => write!(f, "ordering"),
            Self::Rendering => write!(f, "rendering"),
            Self::Fetching => write!(f, "fetching"),
            Self::Mapping => write!(f, "mapping"),
        }
    }
}

/// RAII guard; the phase span is exited on drop.
pub struct PhaseGuard {
    _span: EnteredSpan,
}

/// Enter `phase` until the returned guard is dropped.
///
/// # Example
///
/// ```ignore
/// let _phase = enter_phase(PipelinePhase::Loading);
/// let store = load_store_from_path(&path)?;
/// ```
#[must_use]
pub fn enter_phase(phase: PipelinePhase) -> PhaseGuard {
    PhaseGuard {
        _span: tracing::info_span!("phase", name = %phase).entered(),
    }
}
