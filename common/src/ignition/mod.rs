pub mod codec;
pub mod document;
pub mod locator;
