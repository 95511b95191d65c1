pub type NodeId = usize;
pub type EdgeId = usize;
pub type LandmarkId = usize;
