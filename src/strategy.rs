use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use crate::{
    graph::GraphPrimitives,
    state::{CharacterId, State},
};

/// Chooses the order in which characters are tried at one search depth.
/// Called once per depth visit; must return active characters only.
pub trait Strategy {
    fn name(&self) -> &'static str;
    fn next_candidates(&mut self, state: &State) -> Vec<CharacterId>;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn next_candidates(&mut self, state: &State) -> Vec<CharacterId> {
        (**self).next_candidates(state)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InOrder;

impl Strategy for InOrder {
    fn name(&self) -> &'static str {
        "in-order"
    }

    fn next_candidates(&mut self, state: &State) -> Vec<CharacterId> {
        state.active_characters()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ColorOrder;

impl Strategy for ColorOrder {
    fn name(&self) -> &'static str {
        "color"
    }

    fn next_candidates(&mut self, state: &State) -> Vec<CharacterId> {
        state.characters_by_color()
    }
}

/// Most conflicting characters first, counting only active neighbours in
/// the conflict graph. Ties keep ascending id order.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConflictDegree;

impl Strategy for ConflictDegree {
    fn name(&self) -> &'static str {
        "conflict"
    }

    fn next_candidates(&mut self, state: &State) -> Vec<CharacterId> {
        let mut scored: Vec<(usize, CharacterId)> = state
            .active_characters()
            .into_iter()
            .map(|c| {
                let degree = state
                    .conflict_graph
                    .neighbors(c)
                    .map(|n| n.into_iter().filter(|&o| state.is_character_active(o)).count())
                    .unwrap_or(0);
                (degree, c)
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        scored.into_iter().map(|(_, c)| c).collect()
    }
}

pub struct Shuffled {
    rng: StdRng,
}

impl Shuffled {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for Shuffled {
    fn name(&self) -> &'static str {
        "shuffled"
    }

    fn next_candidates(&mut self, state: &State) -> Vec<CharacterId> {
        let mut candidates = state.active_characters();
        candidates.shuffle(&mut self.rng);
        candidates
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    #[default]
    InOrder,
    Color,
    Conflict,
    Shuffled { seed: u64 },
}

impl StrategyKind {
    pub fn parse(name: &str, seed: u64) -> Result<Self, String> {
        match name {
            "in-order" => Ok(StrategyKind::InOrder),
            "color" => Ok(StrategyKind::Color),
            "conflict" => Ok(StrategyKind::Conflict),
            "shuffled" => Ok(StrategyKind::Shuffled { seed }),
            other => Err(format!("unknown strategy {other}")),
        }
    }

    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            StrategyKind::InOrder => Box::new(InOrder),
            StrategyKind::Color => Box::new(ColorOrder),
            StrategyKind::Conflict => Box::new(ConflictDegree),
            StrategyKind::Shuffled { seed } => Box::new(Shuffled::new(seed)),
        }
    }
}
