use std::fmt;

use serde::Serialize;

use crate::{
    errors::PhylogenyError,
    graph::GraphPrimitives,
    state::{CharacterState, State},
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InvariantReport {
    pub num_species: usize,
    pub num_characters: usize,
    pub species_count_mismatch: usize,
    pub character_count_mismatch: usize,
    pub removed_count_mismatch: usize,
    pub activity_state_disagreements: usize,
    pub edges_on_inactive_vertices: usize,
    pub universe_mismatches: usize,
}

impl InvariantReport {
    pub fn merge(&mut self, other: &InvariantReport) {
        self.num_species = self.num_species.max(other.num_species);
        self.num_characters = self.num_characters.max(other.num_characters);
        self.species_count_mismatch += other.species_count_mismatch;
        self.character_count_mismatch += other.character_count_mismatch;
        self.removed_count_mismatch += other.removed_count_mismatch;
        self.activity_state_disagreements += other.activity_state_disagreements;
        self.edges_on_inactive_vertices += other.edges_on_inactive_vertices;
        self.universe_mismatches += other.universe_mismatches;
    }

    pub fn has_issues(&self) -> bool {
        self.species_count_mismatch > 0
            || self.character_count_mismatch > 0
            || self.removed_count_mismatch > 0
            || self.activity_state_disagreements > 0
            || self.edges_on_inactive_vertices > 0
            || self.universe_mismatches > 0
    }
}

impl fmt::Display for InvariantReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "species={} characters={} species_count_mismatch={} character_count_mismatch={} \
             removed_count_mismatch={} activity_state_disagreements={} \
             edges_on_inactive_vertices={} universe_mismatches={}",
            self.num_species,
            self.num_characters,
            self.species_count_mismatch,
            self.character_count_mismatch,
            self.removed_count_mismatch,
            self.activity_state_disagreements,
            self.edges_on_inactive_vertices,
            self.universe_mismatches,
        )
    }
}

pub fn validate_universe(state: &State) -> InvariantReport {
    let mut report = base_report(state);
    let sizes = [
        state.species_active.len() == state.num_species_orig,
        state.character_active.len() == state.num_characters_orig,
        state.character_state.len() == state.num_characters_orig,
        state.red_black_graph.vertex_count()
            == state.num_species_orig + state.num_characters_orig,
        state.conflict_graph.vertex_count() == state.num_characters_orig,
    ];
    report.universe_mismatches = sizes.iter().filter(|ok| !**ok).count();
    report
}

pub fn validate_counts(state: &State) -> InvariantReport {
    let mut report = base_report(state);
    let active_species = state.species_active.iter().filter(|a| **a).count();
    if active_species != state.num_species {
        report.species_count_mismatch = 1;
    }
    let active_characters = state.character_active.iter().filter(|a| **a).count();
    if active_characters != state.num_characters {
        report.character_count_mismatch = 1;
    }
    let not_removed = state
        .character_state
        .iter()
        .filter(|s| **s != CharacterState::Removed)
        .count();
    if not_removed != state.num_characters {
        report.removed_count_mismatch = 1;
    }
    report.activity_state_disagreements = state
        .character_active
        .iter()
        .zip(state.character_state.iter())
        .filter(|(active, color)| **active == (**color == CharacterState::Removed))
        .count();
    report
}

pub fn validate_edges(state: &State) -> InvariantReport {
    let mut report = base_report(state);
    let active = |vertex: usize| {
        if state.is_species_vertex(vertex) {
            state.is_species_active(vertex)
        } else {
            state.is_character_active(vertex - state.num_species_orig)
        }
    };
    report.edges_on_inactive_vertices = state
        .red_black_graph
        .edges()
        .into_iter()
        .filter(|&(u, v)| !active(u) || !active(v))
        .count();
    report
}

pub fn check_state(state: &State) -> InvariantReport {
    let mut report = base_report(state);
    let universe = validate_universe(state);
    let universe_ok = !universe.has_issues();
    report.merge(&universe);
    // the remaining checks index by the universe sizes
    if universe_ok {
        report.merge(&validate_counts(state));
        report.merge(&validate_edges(state));
    }
    report
}

pub fn run_strict_checks(state: &State, operation: &str) -> Result<(), PhylogenyError> {
    let report = check_state(state);
    if report.has_issues() {
        tracing::error!(operation, %report, "state invariant violated");
        Err(PhylogenyError::invariant(operation, report))
    } else {
        Ok(())
    }
}

fn base_report(state: &State) -> InvariantReport {
    InvariantReport {
        num_species: state.num_species,
        num_characters: state.num_characters,
        ..InvariantReport::default()
    }
}
