//! Red-black graph realization of a single character.
//!
//! Let `A` be the connected component of the character vertex `c` and `B`
//! its neighbourhood. Realizing a black `c` rewires it to the species of
//! `A \ B` and colours it red. Realizing a red `c` succeeds only when no
//! species of `A` lies outside `B`; the character is then free and removed.

use crate::{
    bfs::connected_component,
    cleanup::cleanup,
    errors::PhylogenyError,
    graph::{GraphPrimitives, VertexId},
    safety::run_strict_checks,
    state::{CharacterId, CharacterState, Outcome, State},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Realization {
    Realized(State),
    Infeasible,
}

impl Realization {
    pub fn outcome(&self) -> Outcome {
        match self {
            Realization::Realized(state) => state.last_outcome,
            Realization::Infeasible => Outcome::Infeasible,
        }
    }

    pub fn is_feasible(&self) -> bool {
        matches!(self, Realization::Realized(_))
    }

    pub fn into_state(self) -> Option<State> {
        match self {
            Realization::Realized(state) => Some(state),
            Realization::Infeasible => None,
        }
    }
}

/// Species of `A \ B`, where `A` is the component of the character vertex
/// and `B` its neighbourhood.
pub fn non_adjacent_species(
    state: &State,
    character: CharacterId,
) -> Result<Vec<VertexId>, PhylogenyError> {
    let vertex = state.character_vertex(character);
    let component = connected_component(&state.red_black_graph, vertex)?;
    let adjacent = state.red_black_graph.neighbors(vertex)?;
    Ok(component
        .into_iter()
        .filter(|&v| v != vertex && state.is_species_vertex(v))
        .filter(|v| adjacent.binary_search(v).is_err())
        .collect())
}

/// Realizes `character` on a deep copy of `src`. `src` is never modified.
/// `Infeasible` is an ordinary result; errors are reserved for broken
/// preconditions and invariants.
pub fn realize_character(
    src: &State,
    character: CharacterId,
) -> Result<Realization, PhylogenyError> {
    run_strict_checks(src, "realize (source)")?;
    src.check_character(character)?;

    let mut dst = src.child();
    let vertex = dst.character_vertex(character);
    let color = src.character_state[character];
    let not_adjacent = non_adjacent_species(&dst, character)?;
    tracing::debug!(character, ?color, not_adjacent = not_adjacent.len(), "realizing character");

    dst.red_black_graph.delete_incident_edges(vertex)?;
    match color {
        CharacterState::Black => {
            for &species in &not_adjacent {
                dst.red_black_graph.add_edge(vertex, species)?;
            }
            dst.character_state[character] = CharacterState::Red;
            dst.last_outcome = Outcome::BecameRed;
        }
        CharacterState::Red => {
            if !not_adjacent.is_empty() {
                tracing::debug!(character, "realization infeasible");
                return Ok(Realization::Infeasible);
            }
            dst.delete_character(character)?;
            dst.last_outcome = Outcome::RemovedCompatible;
        }
        CharacterState::Removed => {
            return Err(PhylogenyError::inactive_character(format!(
                "character {character} is already removed"
            )));
        }
    }
    dst.realize_target = character;
    run_strict_checks(&dst, "realize")?;
    cleanup(&mut dst)?;
    tracing::debug!(
        character,
        outcome = ?dst.last_outcome,
        species = dst.num_species,
        characters = dst.num_characters,
        "realized"
    );
    Ok(Realization::Realized(dst))
}
