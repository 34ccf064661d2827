/// Errors surfaced by the stitching pipeline.
///
/// Short fragments and degenerate rings are expected input and are filtered,
/// not reported; only broken internal invariants end up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StitchError {
    /// The open working set ran dry while fragments were still expected.
    OpenSetExhausted { remaining_expected: usize },
}

impl std::fmt::Display for StitchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StitchError::OpenSetExhausted { remaining_expected } => write!(
                f,
                "open fragment set exhausted with {} fragment(s) still expected",
                remaining_expected
            ),
        }
    }
}

impl std::error::Error for StitchError {}
