// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod catalog;
pub mod clock;
pub mod menu;
pub mod runtime;
pub mod session;
pub mod ui;
