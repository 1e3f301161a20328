//! Combinatorial state: one node of the realization search tree.
//!
//! Vertex ids `[0, num_species_orig)` are species and
//! `[num_species_orig, num_species_orig + num_characters_orig)` are characters
//! in the red-black graph. The conflict graph is indexed by character id.
//! Vertices are deactivated, never renumbered.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::{
    errors::PhylogenyError,
    graph::{AdjacencyGraph, GraphPrimitives, VertexId},
};

pub type SpeciesId = usize;
pub type CharacterId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterState {
    Black,
    Red,
    Removed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    NoneYet,
    BecameRed,
    RemovedCompatible,
    Infeasible,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        matches!(self, Outcome::BecameRed | Outcome::RemovedCompatible)
    }
}

/// `Clone` is the full copy (bookkeeping included); [`State::child`] is the
/// copy handed to a new search depth.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub num_species_orig: usize,
    pub num_characters_orig: usize,
    pub num_species: usize,
    pub num_characters: usize,
    pub species_active: Vec<bool>,
    pub character_active: Vec<bool>,
    pub character_state: Vec<CharacterState>,
    pub red_black_graph: AdjacencyGraph,
    pub conflict_graph: AdjacencyGraph,
    pub realize_target: CharacterId,
    pub last_outcome: Outcome,
    pub tried_characters: VecDeque<CharacterId>,
    pub pending_characters: VecDeque<CharacterId>,
}

impl State {
    pub fn new(num_species_orig: usize, num_characters_orig: usize) -> Self {
        Self {
            num_species_orig,
            num_characters_orig,
            num_species: num_species_orig,
            num_characters: num_characters_orig,
            species_active: vec![true; num_species_orig],
            character_active: vec![true; num_characters_orig],
            character_state: vec![CharacterState::Black; num_characters_orig],
            red_black_graph: AdjacencyGraph::new(num_species_orig + num_characters_orig),
            conflict_graph: AdjacencyGraph::new(num_characters_orig),
            realize_target: 0,
            last_outcome: Outcome::NoneYet,
            tried_characters: VecDeque::new(),
            pending_characters: VecDeque::new(),
        }
    }

    /// Deep copy with empty search bookkeeping.
    pub fn child(&self) -> Self {
        Self {
            num_species_orig: self.num_species_orig,
            num_characters_orig: self.num_characters_orig,
            num_species: self.num_species,
            num_characters: self.num_characters,
            species_active: self.species_active.clone(),
            character_active: self.character_active.clone(),
            character_state: self.character_state.clone(),
            red_black_graph: self.red_black_graph.clone(),
            conflict_graph: self.conflict_graph.clone(),
            realize_target: self.realize_target,
            last_outcome: self.last_outcome,
            tried_characters: VecDeque::new(),
            pending_characters: VecDeque::new(),
        }
    }

    pub fn reset_bookkeeping(&mut self) {
        self.tried_characters.clear();
        self.pending_characters.clear();
    }

    pub fn character_vertex(&self, character: CharacterId) -> VertexId {
        self.num_species_orig + character
    }

    pub fn is_species_vertex(&self, vertex: VertexId) -> bool {
        vertex < self.num_species_orig
    }

    pub fn is_species_active(&self, species: SpeciesId) -> bool {
        self.species_active.get(species).copied().unwrap_or(false)
    }

    pub fn is_character_active(&self, character: CharacterId) -> bool {
        self.character_active.get(character).copied().unwrap_or(false)
    }

    pub fn active_species(&self) -> Vec<SpeciesId> {
        (0..self.num_species_orig)
            .filter(|&s| self.species_active[s])
            .collect()
    }

    pub fn active_characters(&self) -> Vec<CharacterId> {
        (0..self.num_characters_orig)
            .filter(|&c| self.character_active[c])
            .collect()
    }

    /// Active characters, red ones first, each group ascending.
    pub fn characters_by_color(&self) -> Vec<CharacterId> {
        let mut ordered = Vec::with_capacity(self.num_characters);
        for color in [CharacterState::Red, CharacterState::Black] {
            ordered.extend(
                (0..self.num_characters_orig)
                    .filter(|&c| self.character_active[c] && self.character_state[c] == color),
            );
        }
        ordered
    }

    pub fn is_solved(&self) -> bool {
        self.num_species == 0
    }

    pub fn check_character(&self, character: CharacterId) -> Result<(), PhylogenyError> {
        if character >= self.num_characters_orig {
            return Err(PhylogenyError::out_of_range(format!(
                "character {character} (state has {} characters)",
                self.num_characters_orig
            )));
        }
        if !self.character_active[character] {
            return Err(PhylogenyError::inactive_character(format!(
                "character {character} is not active"
            )));
        }
        Ok(())
    }

    pub fn delete_species(&mut self, species: SpeciesId) -> Result<(), PhylogenyError> {
        if species >= self.num_species_orig {
            return Err(PhylogenyError::out_of_range(format!(
                "species {species} (state has {} species)",
                self.num_species_orig
            )));
        }
        if !self.species_active[species] {
            return Err(PhylogenyError::invalid_input(format!(
                "species {species} is already inactive"
            )));
        }
        tracing::trace!(species, "deleting species");
        self.red_black_graph.delete_incident_edges(species)?;
        self.species_active[species] = false;
        self.num_species -= 1;
        Ok(())
    }

    pub fn delete_character(&mut self, character: CharacterId) -> Result<(), PhylogenyError> {
        self.check_character(character)?;
        tracing::trace!(character, "deleting character");
        let vertex = self.character_vertex(character);
        self.red_black_graph.delete_incident_edges(vertex)?;
        self.character_active[character] = false;
        self.character_state[character] = CharacterState::Removed;
        self.num_characters -= 1;
        Ok(())
    }
}
