pub mod get_landmarks;
