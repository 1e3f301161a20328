use serde::Serialize;

use crate::{
    errors::PhylogenyError,
    graph::GraphPrimitives,
    safety::run_strict_checks,
    state::State,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CleanupSummary {
    pub species_removed: usize,
    pub characters_removed: usize,
}

impl CleanupSummary {
    pub fn is_empty(&self) -> bool {
        self.species_removed == 0 && self.characters_removed == 0
    }
}

/// Deactivates every active species and character left without red-black
/// edges. One pass, species first. Only isolated vertices are deactivated,
/// so no other degree changes and a second call is a no-op.
pub fn cleanup(state: &mut State) -> Result<CleanupSummary, PhylogenyError> {
    let mut summary = CleanupSummary::default();
    for species in 0..state.num_species_orig {
        if state.species_active[species] && state.red_black_graph.degree(species)? == 0 {
            state.delete_species(species)?;
            summary.species_removed += 1;
        }
    }
    for character in 0..state.num_characters_orig {
        if !state.character_active[character] {
            continue;
        }
        let vertex = state.character_vertex(character);
        if state.red_black_graph.degree(vertex)? == 0 {
            state.delete_character(character)?;
            summary.characters_removed += 1;
        }
    }
    if !summary.is_empty() {
        tracing::debug!(
            species_removed = summary.species_removed,
            characters_removed = summary.characters_removed,
            "cleanup"
        );
    }
    run_strict_checks(state, "cleanup")?;
    Ok(summary)
}
