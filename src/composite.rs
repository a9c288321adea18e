pub mod blend;
pub mod overlay;
pub mod pipeline;
pub mod poster;
