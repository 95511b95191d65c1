pub mod landmark;
pub mod landmark_index;
