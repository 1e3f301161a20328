//! JSON interchange for states. A state file holds every scalar and array
//! field and names two sidecar edge-list files, one per graph.

use std::{
    collections::VecDeque,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    errors::PhylogenyError,
    graph::{AdjacencyGraph, GraphDocument},
    safety::run_strict_checks,
    state::{CharacterId, CharacterState, Outcome, State},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDocument {
    pub num_species_orig: usize,
    pub num_characters_orig: usize,
    pub num_species: usize,
    pub num_characters: usize,
    pub species: Vec<bool>,
    pub characters: Vec<bool>,
    pub current: Vec<CharacterState>,
    pub realize: CharacterId,
    pub operation: Outcome,
    #[serde(default)]
    pub tried_characters: VecDeque<CharacterId>,
    #[serde(default)]
    pub character_queue: VecDeque<CharacterId>,
    pub red_black_file: PathBuf,
    pub conflict_file: PathBuf,
}

pub fn state_to_json(state: &State) -> Result<String, PhylogenyError> {
    run_strict_checks(state, "state_to_json")?;
    serde_json::to_string_pretty(state).map_err(|e| PhylogenyError::serialization(e.to_string()))
}

pub fn state_from_json(input: &str) -> Result<State, PhylogenyError> {
    let state: State =
        serde_json::from_str(input).map_err(|e| PhylogenyError::serialization(e.to_string()))?;
    run_strict_checks(&state, "state_from_json")?;
    Ok(state)
}

pub fn sidecar_paths(path: &Path) -> (PathBuf, PathBuf) {
    let with_suffix = |suffix: &str| {
        let mut name = path.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    };
    (
        with_suffix("-redblack.json"),
        with_suffix("-conflict.json"),
    )
}

pub fn write_state<P: AsRef<Path>>(path: P, state: &State) -> Result<(), PhylogenyError> {
    let path = path.as_ref();
    run_strict_checks(state, "write_state")?;
    let (red_black_file, conflict_file) = sidecar_paths(path);
    write_json(&red_black_file, &state.red_black_graph.to_document())?;
    write_json(&conflict_file, &state.conflict_graph.to_document())?;
    let document = StateDocument {
        num_species_orig: state.num_species_orig,
        num_characters_orig: state.num_characters_orig,
        num_species: state.num_species,
        num_characters: state.num_characters,
        species: state.species_active.clone(),
        characters: state.character_active.clone(),
        current: state.character_state.clone(),
        realize: state.realize_target,
        operation: state.last_outcome,
        tried_characters: state.tried_characters.clone(),
        character_queue: state.pending_characters.clone(),
        red_black_file: file_name(&red_black_file),
        conflict_file: file_name(&conflict_file),
    };
    write_json(path, &document)?;
    tracing::debug!(path = %path.display(), "state written");
    Ok(())
}

pub fn read_state<P: AsRef<Path>>(path: P) -> Result<State, PhylogenyError> {
    let path = path.as_ref();
    let document: StateDocument = read_json(path)?;
    let red_black_graph = read_graph(path, &document.red_black_file)?;
    let conflict_graph = read_graph(path, &document.conflict_file)?;
    let state = State {
        num_species_orig: document.num_species_orig,
        num_characters_orig: document.num_characters_orig,
        num_species: document.num_species,
        num_characters: document.num_characters,
        species_active: document.species,
        character_active: document.characters,
        character_state: document.current,
        red_black_graph,
        conflict_graph,
        realize_target: document.realize,
        last_outcome: document.operation,
        tried_characters: document.tried_characters,
        pending_characters: document.character_queue,
    };
    run_strict_checks(&state, "read_state")?;
    Ok(state)
}

fn file_name(path: &Path) -> PathBuf {
    path.file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| path.to_path_buf())
}

/// Relative sidecar names resolve against the state file's directory.
fn read_graph(state_path: &Path, graph_path: &Path) -> Result<AdjacencyGraph, PhylogenyError> {
    let resolved = match state_path.parent() {
        Some(dir) if graph_path.is_relative() => dir.join(graph_path),
        _ => graph_path.to_path_buf(),
    };
    let document: GraphDocument = read_json(&resolved)?;
    AdjacencyGraph::try_from(document)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PhylogenyError> {
    let data = serde_json::to_string_pretty(value)
        .map_err(|e| PhylogenyError::serialization(e.to_string()))?;
    fs::write(path, data).map_err(|e| PhylogenyError::io(format!("{}: {e}", path.display())))
}

pub(crate) fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, PhylogenyError> {
    let data = fs::read_to_string(path)
        .map_err(|e| PhylogenyError::io(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&data)
        .map_err(|e| PhylogenyError::serialization(format!("{}: {e}", path.display())))
}
