pub mod attribute_stats;
pub mod criterion;
pub mod edge_attributes;
