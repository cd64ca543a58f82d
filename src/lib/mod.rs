//! Shared library modules providing error types, path derivation, normalization and telemetry.

pub mod errors;
pub mod make;
pub mod normalize;
pub mod paths;
pub mod platform;
pub mod telemetry;
