//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskloop_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Keep a tiny CLI probe to validate core crate wiring independently
    // from any host UI runtime.
    println!("taskloop_core ping={}", taskloop_core::ping());
    println!("taskloop_core version={}", taskloop_core::core_version());
}
