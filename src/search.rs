//! Exhaustive decision-tree search over realization orders.
//!
//! The engine owns one [`State`] per depth. Depth `d` keeps the characters
//! already tried there and those still pending; a successful realization
//! installs its result at `d + 1`, an exhausted depth retreats to `d - 1`.
//! Slots are reused across attempts, never freed on retreat.

use serde::Serialize;

use crate::{
    cleanup::cleanup,
    errors::PhylogenyError,
    realize::{Realization, realize_character},
    safety::run_strict_checks,
    state::{CharacterId, Outcome, State},
    strategy::{Strategy, StrategyKind},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Depths at or beyond this bound get no candidates.
    pub max_depth: Option<usize>,
    pub strategy: StrategyKind,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub steps: u64,
    pub realizations: u64,
    pub infeasible: u64,
    pub advances: u64,
    pub retreats: u64,
    pub max_depth_reached: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Solution {
    /// Realized characters in order, one per depth `1..=depth`.
    pub realized: Vec<CharacterId>,
    pub outcomes: Vec<Outcome>,
    pub depth: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    Solved(Solution),
    Failed,
}

impl SearchOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            SearchOutcome::Failed => None,
        }
    }
}

pub struct SearchEngine<S> {
    strategy: S,
    config: SearchConfig,
    states: Vec<State>,
    stats: SearchStats,
}

impl SearchEngine<Box<dyn Strategy>> {
    /// Engine using the strategy named by `config.strategy`.
    pub fn from_config(root: State, config: SearchConfig) -> Result<Self, PhylogenyError> {
        let strategy = config.strategy.build();
        SearchEngine::new(root, strategy, config)
    }
}

impl<S: Strategy> SearchEngine<S> {
    pub fn new(root: State, strategy: S, config: SearchConfig) -> Result<Self, PhylogenyError> {
        run_strict_checks(&root, "search root")?;
        let mut root = root.child();
        cleanup(&mut root)?;
        Ok(Self {
            strategy,
            config,
            states: vec![root],
            stats: SearchStats::default(),
        })
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, depth: usize) -> Option<&State> {
        self.states.get(depth)
    }

    pub fn statistics(&self) -> SearchStats {
        self.stats
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Advances the decision tree by one move from `depth`. Returns the new
    /// depth, or `None` once the search has retreated past the root.
    pub fn step(&mut self, depth: usize) -> Result<Option<usize>, PhylogenyError> {
        if depth >= self.states.len() {
            return Err(PhylogenyError::out_of_range(format!(
                "search depth {depth} (deepest state is {})",
                self.states.len() - 1
            )));
        }
        self.stats.steps += 1;

        let current = &self.states[depth];
        if current.tried_characters.is_empty() && current.pending_characters.is_empty() {
            let candidates = self.candidates(depth)?;
            tracing::debug!(depth, candidates = ?candidates, "populated depth");
            self.states[depth].pending_characters = candidates.into();
        }

        let Some(character) = self.states[depth].pending_characters.pop_front() else {
            self.stats.retreats += 1;
            tracing::debug!(depth, "depth exhausted, retreating");
            return Ok(depth.checked_sub(1));
        };
        self.states[depth].tried_characters.push_back(character);
        self.stats.realizations += 1;

        match realize_character(&self.states[depth], character)? {
            Realization::Realized(mut next) => {
                next.reset_bookkeeping();
                run_strict_checks(&next, "search install")?;
                self.install(depth + 1, next);
                self.stats.advances += 1;
                self.stats.max_depth_reached = self.stats.max_depth_reached.max(depth + 1);
                Ok(Some(depth + 1))
            }
            Realization::Infeasible => {
                self.stats.infeasible += 1;
                Ok(Some(depth))
            }
        }
    }

    /// Runs from the root until a state without species is reached or the
    /// whole tree is exhausted.
    pub fn run(&mut self) -> Result<SearchOutcome, PhylogenyError> {
        self.states.truncate(1);
        self.states[0].reset_bookkeeping();
        self.stats = SearchStats::default();

        let mut depth = 0;
        loop {
            if self.states[depth].is_solved() {
                let solution = self.solution(depth);
                tracing::info!(
                    depth,
                    realized = ?solution.realized,
                    steps = self.stats.steps,
                    "perfect phylogeny found"
                );
                return Ok(SearchOutcome::Solved(solution));
            }
            match self.step(depth)? {
                Some(next) => depth = next,
                None => {
                    tracing::info!(steps = self.stats.steps, "search space exhausted");
                    return Ok(SearchOutcome::Failed);
                }
            }
        }
    }

    fn candidates(&mut self, depth: usize) -> Result<Vec<CharacterId>, PhylogenyError> {
        if self.config.max_depth.is_some_and(|max| depth >= max) {
            return Ok(Vec::new());
        }
        let state = &self.states[depth];
        let candidates = self.strategy.next_candidates(state);
        for &character in &candidates {
            state.check_character(character).inspect_err(|err| {
                tracing::warn!(
                    strategy = self.strategy.name(),
                    character,
                    %err,
                    "strategy returned an unusable candidate"
                );
            })?;
        }
        Ok(candidates)
    }

    fn install(&mut self, depth: usize, state: State) {
        if depth < self.states.len() {
            self.states[depth] = state;
        } else {
            self.states.push(state);
        }
    }

    fn solution(&self, depth: usize) -> Solution {
        let path = &self.states[1..=depth];
        Solution {
            realized: path.iter().map(|s| s.realize_target).collect(),
            outcomes: path.iter().map(|s| s.last_outcome).collect(),
            depth,
        }
    }
}
