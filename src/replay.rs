use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    cleanup::cleanup,
    errors::PhylogenyError,
    persist::{read_json, read_state, write_state},
    realize::{Realization, realize_character},
    state::{CharacterId, State},
};

/// Regression descriptor: realize `characters` in order on the state stored
/// at `input` (or only clean it up when the list is empty) and store the
/// result at `output`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayDescriptor {
    pub input: PathBuf,
    #[serde(default)]
    pub characters: Vec<CharacterId>,
    pub output: PathBuf,
}

impl ReplayDescriptor {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PhylogenyError> {
        read_json(path.as_ref())
    }
}

pub fn replay_characters(
    state: &State,
    characters: &[CharacterId],
) -> Result<State, PhylogenyError> {
    let mut current = state.clone();
    if characters.is_empty() {
        cleanup(&mut current)?;
        return Ok(current);
    }
    for &character in characters {
        current = match realize_character(&current, character)? {
            Realization::Realized(next) => next,
            Realization::Infeasible => {
                return Err(PhylogenyError::invalid_input(format!(
                    "character {character} cannot be realized"
                )));
            }
        };
    }
    Ok(current)
}

pub fn run_descriptor(descriptor: &ReplayDescriptor) -> Result<State, PhylogenyError> {
    let state = read_state(&descriptor.input)?;
    let result = replay_characters(&state, &descriptor.characters)?;
    write_state(&descriptor.output, &result)?;
    Ok(result)
}
