use jiff::SignedDuration;

#[derive(Clone, Debug)]
pub struct MilpParams {
    /// Wall-clock budget of the branch-and-bound search.
    pub time_limit: Option<SignedDuration>,
    /// Maximum number of branch-and-bound nodes to explore.
    pub node_limit: Option<usize>,
    /// Distance to the closest integer under which a binary counts as integral.
    pub integrality_tolerance: f64,
    /// Relative gap under which a node cannot improve the incumbent.
    pub gap_tolerance: f64,
}

impl Default for MilpParams {
    fn default() -> Self {
        MilpParams {
            time_limit: None,
            node_limit: None,
            integrality_tolerance: 1e-6,
            gap_tolerance: 1e-9,
        }
    }
}
