pub mod cluster;
pub mod extract;
pub mod frequency;
pub mod load;
