//! Summaries of explored graphs and solution sets.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use blocks_kernel::canon::key::CanonicalKey;

use crate::outcome::SolutionPath;
use crate::recorder::Recorder;

/// Shape of an explored graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub target_nodes: usize,
    pub max_depth: u32,
    /// Node count per depth.
    pub depth_distribution: BTreeMap<u32, usize>,
    /// Distinct canonical states among all nodes.
    pub distinct_states: usize,
}

impl GraphStats {
    #[must_use]
    pub fn of(recorder: &Recorder) -> Self {
        let mut stats = Self::default();
        let mut states = BTreeSet::new();
        for node in recorder.nodes() {
            stats.total_nodes += 1;
            if node.target_match {
                stats.target_nodes += 1;
            }
            stats.max_depth = stats.max_depth.max(node.depth);
            *stats.depth_distribution.entry(node.depth).or_insert(0) += 1;
            states.insert(CanonicalKey::of(&node.state));
        }
        stats.distinct_states = states.len();
        stats
    }
}

/// Grouping and frequency view over a set of solutions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionAnalysis {
    pub total: usize,
    /// Solution count per path length.
    pub by_length: BTreeMap<usize, usize>,
    pub shortest: Option<usize>,
    /// Solutions of the shortest length.
    pub optimal_count: usize,
    /// How often each action description occurs across all solutions.
    pub action_frequency: BTreeMap<String, usize>,
}

impl SolutionAnalysis {
    #[must_use]
    pub fn of(solutions: &[SolutionPath]) -> Self {
        let mut analysis = Self {
            total: solutions.len(),
            ..Self::default()
        };
        for path in solutions {
            *analysis.by_length.entry(path.len()).or_insert(0) += 1;
            for description in path.descriptions() {
                *analysis
                    .action_frequency
                    .entry(description.to_string())
                    .or_insert(0) += 1;
            }
        }
        if let Some((&len, &count)) = analysis.by_length.iter().next() {
            analysis.shortest = Some(len);
            analysis.optimal_count = count;
        }
        analysis
    }

    /// Descriptions by decreasing frequency, ties by name.
    #[must_use]
    pub fn most_frequent(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .action_frequency
            .iter()
            .map(|(d, &n)| (d.as_str(), n))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(limit);
        ranked
    }
}
