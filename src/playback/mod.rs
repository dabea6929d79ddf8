//! Position and auto-advance over a recorded trace.

pub mod controller;
