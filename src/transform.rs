pub mod resize;
pub mod rotate;
