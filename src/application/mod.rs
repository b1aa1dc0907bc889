//! Application layer containing business logic services.
//!
//! Services coordinate domain entities and repositories to implement the
//! system's operations. They depend on repository traits, never on
//! concrete infrastructure.

pub mod services;
