//! SMOTE (Synthetic Minority Over-sampling Technique)
//!
//! Every class smaller than the majority class is grown to the majority
//! count. A synthetic row is placed on the segment between a random member
//! of the class and one of its `k` nearest same-class neighbours.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};
use std::fmt::Display;

use rand::prelude::*;

use super::error::DataFault;

/// Default number of nearest neighbours
pub const DEFAULT_K_NEIGHBORS: usize = 5;

/// Default seed, fixed so repeated runs produce identical output
pub const DEFAULT_SEED: u64 = 42;

/// Distance/index pair ordered by distance, then index
#[derive(Debug, Clone, Copy)]
struct DistIdx(f64, usize);

impl PartialEq for DistIdx {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for DistIdx {}
impl PartialOrd for DistIdx {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for DistIdx {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0).then(self.1.cmp(&other.1))
    }
}

/// Synthetic rows produced by a resampling run
#[derive(Debug, Clone, Default)]
pub struct Resampled {
    /// Generated feature vectors, in generation order
    pub synthetic: Vec<Vec<f64>>,
    /// For each synthetic row, the original row it was interpolated from
    pub source_rows: Vec<usize>,
}

impl Resampled {
    pub fn len(&self) -> usize {
        self.synthetic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synthetic.is_empty()
    }
}

/// SMOTE sampler
#[derive(Debug, Clone)]
pub struct Smote {
    k_neighbors: usize,
    seed: u64,
}

impl Default for Smote {
    fn default() -> Self {
        Self::new()
    }
}

impl Smote {
    pub fn new() -> Self {
        Self {
            k_neighbors: DEFAULT_K_NEIGHBORS,
            seed: DEFAULT_SEED,
        }
    }

    /// Set number of neighbors
    pub fn with_k_neighbors(mut self, k: usize) -> Self {
        self.k_neighbors = k.max(1);
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn k_neighbors(&self) -> usize {
        self.k_neighbors
    }

    fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
    }

    /// Indices (into `members`) of the k nearest neighbours of `members[pos]`, self excluded
    fn nearest_neighbors(&self, x: &[Vec<f64>], members: &[usize], pos: usize) -> Vec<usize> {
        let point = &x[members[pos]];
        let k = self.k_neighbors;
        let mut heap: BinaryHeap<DistIdx> = BinaryHeap::with_capacity(k + 1);

        for (i, &row) in members.iter().enumerate() {
            if i == pos {
                continue;
            }
            let candidate = DistIdx(Self::squared_distance(point, &x[row]), i);
            if heap.len() < k {
                heap.push(candidate);
            } else if heap.peek().is_some_and(|worst| candidate < *worst) {
                heap.pop();
                heap.push(candidate);
            }
        }

        heap.into_sorted_vec().into_iter().map(|DistIdx(_, i)| i).collect()
    }

    /// Generate synthetic rows until every class matches the majority count.
    ///
    /// `x` holds one feature vector per row, `y` the class of each row.
    /// Classes are processed in ascending order.
    pub fn fit_resample<C>(&self, x: &[Vec<f64>], y: &[C]) -> Result<Resampled, DataFault>
    where
        C: Ord + Display,
    {
        let mut members: BTreeMap<&C, Vec<usize>> = BTreeMap::new();
        for (row, class) in y.iter().enumerate() {
            members.entry(class).or_default().push(row);
        }

        if members.len() < 2 {
            return Err(DataFault::SingleClass(members.len()));
        }

        let majority = members.values().map(Vec::len).max().unwrap_or(0);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut result = Resampled::default();

        for (class, rows) in &members {
            let n_to_generate = majority - rows.len();
            if n_to_generate == 0 {
                continue;
            }

            let required = self.k_neighbors + 1;
            if rows.len() < required {
                return Err(DataFault::TooFewSamples {
                    class: class.to_string(),
                    count: rows.len(),
                    required,
                });
            }

            let neighbors: Vec<Vec<usize>> = (0..rows.len())
                .map(|pos| self.nearest_neighbors(x, rows, pos))
                .collect();

            for _ in 0..n_to_generate {
                let pos = rng.gen_range(0..rows.len());
                let nn = neighbors[pos][rng.gen_range(0..neighbors[pos].len())];
                let gap: f64 = rng.gen();

                let base = &x[rows[pos]];
                let other = &x[rows[nn]];
                let sample = base
                    .iter()
                    .zip(other.iter())
                    .map(|(&b, &o)| b + gap * (o - b))
                    .collect();

                result.synthetic.push(sample);
                result.source_rows.push(rows[pos]);
            }

            tracing::debug!(
                class = %class,
                generated = n_to_generate,
                "Synthetic samples generated"
            );
        }

        Ok(result)
    }
}
