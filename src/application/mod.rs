// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - This layer sits ABOVE the domain foundation
// - It wires infrastructure, repositories and services into one state value
// - Embedders hold an AppState and call services through it

pub mod state;

pub use state::AppState;
