//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `pressroom_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("pressroom_core version={}", pressroom_core::core_version());
    println!(
        "pressroom_core default_log_level={}",
        pressroom_core::default_log_level()
    );
}
