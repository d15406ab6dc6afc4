// ============================================================================
// CONSTELLATION ENGINE - Drifting point field with pointer proximity links,
// plus the quiz form controller the same page ships with.
// ============================================================================
//
// The `sim`, `render`, and `quiz` modules are pure Rust and run on the host
// (that is where the tests live). The `web` module binds them to a browser
// page through wasm-bindgen: a canvas backend for the drawing surface, event
// listeners for pointer/resize/visibility, and a DOM controller for the form.

pub mod quiz;
pub mod render;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;
