pub mod decode;
pub mod fetch;
pub mod loader;
pub mod source;
