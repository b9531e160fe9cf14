pub type NodeId = usize;
pub type EdgeId = usize;
