//! daxval library exports for testing

pub mod core;
pub mod headless;
pub mod tui;
pub mod validation;

#[cfg(test)]
pub mod test_support;
