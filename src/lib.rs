pub mod error;
pub mod fifo;
pub mod lru;
pub mod opt;
pub mod policy;
pub mod reference;
pub mod simulation;

pub use error::{Error, Result};
pub use policy::{Access, PolicyKind, ReplacementPolicy};
pub use reference::{Page, format_reference_string, parse_reference_string};
pub use simulation::{Simulation, StepRecord, fifo_visual, lru_visual, opt_visual};

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
use wasm_bindgen::prelude::*;

/// Runs all three policies and returns the comparison report followed by every trace.
/// A blank `reference` generates one from `seed`. Errors come back as the message.
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
#[wasm_bindgen]
pub fn run_simulation(frames_count: usize, reference: &str, seed: u64) -> String {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    let pages = if reference.trim().is_empty() {
        reference::generate_reference_string_with(
            &mut StdRng::seed_from_u64(seed),
            reference::DEFAULT_LENGTH,
        )
    } else {
        parse_reference_string(reference)
    };

    let (pages, simulations) = match pages.and_then(|pages| {
        reference::ensure_visual_length(&pages)?;
        simulation::simulate_all(&pages, frames_count).map(|sims| (pages, sims))
    }) {
        Ok(result) => result,
        Err(e) => return e.to_string(),
    };

    let mut result = vec![format!(
        "Reference String: {}",
        format_reference_string(&pages)
    )];
    result.push(simulation::compare(&simulations));
    for sim in &simulations {
        result.push(format!("{}\n{}\n", sim.policy().title(), sim.format_trace()));
    }

    result.join("\n")
}
