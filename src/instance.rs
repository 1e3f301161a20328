use serde::{Deserialize, Serialize};

use crate::{
    errors::PhylogenyError,
    graph::GraphPrimitives,
    safety::run_strict_checks,
    state::{CharacterId, SpeciesId, State},
};

/// Species-major 0/1 matrix: one row per species, one column per character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Matrix {
    num_species: usize,
    num_characters: usize,
    cells: Vec<u8>,
}

impl Matrix {
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, PhylogenyError> {
        let num_species = rows.len();
        let num_characters = rows.first().map(Vec::len).unwrap_or(0);
        let mut cells = Vec::with_capacity(num_species * num_characters);
        for (species, row) in rows.into_iter().enumerate() {
            if row.len() != num_characters {
                return Err(PhylogenyError::invalid_input(format!(
                    "row {species} has {} values, expected {num_characters}",
                    row.len()
                )));
            }
            if let Some(value) = row.iter().find(|v| **v > 1) {
                return Err(PhylogenyError::invalid_input(format!(
                    "row {species} contains {value}; only 0 and 1 are allowed"
                )));
            }
            cells.extend(row);
        }
        Ok(Self {
            num_species,
            num_characters,
            cells,
        })
    }

    pub fn from_json_str(input: &str) -> Result<Self, PhylogenyError> {
        serde_json::from_str(input).map_err(|e| PhylogenyError::invalid_input(e.to_string()))
    }

    pub fn num_species(&self) -> usize {
        self.num_species
    }

    pub fn num_characters(&self) -> usize {
        self.num_characters
    }

    pub fn get(
        &self,
        species: SpeciesId,
        character: CharacterId,
    ) -> Result<u8, PhylogenyError> {
        if species >= self.num_species || character >= self.num_characters {
            return Err(PhylogenyError::out_of_range(format!(
                "cell ({species}, {character}) of a {}x{} matrix",
                self.num_species, self.num_characters
            )));
        }
        Ok(self.cells[character + self.num_characters * species])
    }

    pub fn rows(&self) -> Vec<Vec<u8>> {
        if self.num_characters == 0 {
            return vec![Vec::new(); self.num_species];
        }
        self.cells
            .chunks(self.num_characters)
            .map(<[u8]>::to_vec)
            .collect()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Matrix {
    type Error = PhylogenyError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Matrix::from_rows(rows)
    }
}

impl From<Matrix> for Vec<Vec<u8>> {
    fn from(matrix: Matrix) -> Self {
        matrix.rows()
    }
}

/// Four-gamete test: the two columns exhibit all of `00`, `01`, `10`, `11`.
pub fn conflicting(
    matrix: &Matrix,
    c1: CharacterId,
    c2: CharacterId,
) -> Result<bool, PhylogenyError> {
    for character in [c1, c2] {
        if character >= matrix.num_characters() {
            return Err(PhylogenyError::out_of_range(format!(
                "character {character} (matrix has {} characters)",
                matrix.num_characters()
            )));
        }
    }
    let mut seen = [[false; 2]; 2];
    for species in 0..matrix.num_species() {
        let a = matrix.get(species, c1)? as usize;
        let b = matrix.get(species, c2)? as usize;
        seen[a][b] = true;
    }
    Ok(seen.iter().flatten().all(|present| *present))
}

pub fn build_initial_state(matrix: &Matrix) -> Result<State, PhylogenyError> {
    let mut state = State::new(matrix.num_species(), matrix.num_characters());
    for species in 0..matrix.num_species() {
        for character in 0..matrix.num_characters() {
            if matrix.get(species, character)? == 1 {
                let vertex = state.character_vertex(character);
                state.red_black_graph.add_edge(species, vertex)?;
            }
        }
    }
    for c1 in 0..matrix.num_characters() {
        for c2 in (c1 + 1)..matrix.num_characters() {
            if conflicting(matrix, c1, c2)? {
                state.conflict_graph.add_edge(c1, c2)?;
            }
        }
    }
    tracing::debug!(
        species = state.num_species,
        characters = state.num_characters,
        conflicts = state.conflict_graph.edge_count(),
        "built initial state"
    );
    run_strict_checks(&state, "build_initial_state")?;
    Ok(state)
}
