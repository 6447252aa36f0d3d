//! Agglomerative hierarchical clustering with Ward linkage.
//!
//! The pipeline is the classic three-step one: condensed pairwise
//! Euclidean distances, a bottom-up merge sequence under Ward's
//! minimum-variance criterion, and a flat cut into a fixed number of
//! clusters. Merge steps use the usual numbering where original rows are
//! clusters `0..n-1` and the k-th merge creates cluster `n + k`.

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::error::{Error, Result};

/// One merge event in the agglomeration sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeStep {
    /// Smaller id of the two merged clusters
    pub left: usize,
    /// Larger id of the two merged clusters
    pub right: usize,
    /// Linkage distance at which the merge happened
    pub distance: f64,
    /// Size of the newly formed cluster
    pub size: usize,
}

/// Position of pair (i, j), i < j, in a condensed distance vector over n points
pub(crate) fn condensed_index(n: usize, i: usize, j: usize) -> usize {
    debug_assert!(i < j && j < n);
    n * i - i * (i + 1) / 2 + (j - i - 1)
}

/// Full pairwise Euclidean distances in condensed form: for n rows, a
/// vector of n*(n-1)/2 distances ordered (0,1), (0,2), ..., (n-2,n-1).
pub fn pairwise_euclidean(rows: &[Vec<f64>]) -> Vec<f64> {
    let n = rows.len();
    let mut condensed = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            let dist = rows[i]
                .iter()
                .zip(rows[j].iter())
                .map(|(&a, &b)| (a - b).powi(2))
                .sum::<f64>()
                .sqrt();
            condensed.push(dist);
        }
    }
    condensed
}

/// Build the Ward merge sequence for n points from their condensed
/// pairwise distances.
///
/// At every step the pair of active clusters with the smallest linkage
/// distance is merged; distances to the surviving clusters are updated
/// with the Lance-Williams recurrence for Ward's criterion. Ties break
/// toward the smallest cluster-id pair, so the sequence is deterministic.
pub fn ward_linkage(condensed: &[f64], n: usize) -> Result<Vec<MergeStep>> {
    let expected = n * n.saturating_sub(1) / 2;
    if condensed.len() != expected {
        return Err(Error::InconsistentRowCount {
            expected,
            found: condensed.len(),
        });
    }
    if n < 2 {
        return Ok(Vec::new());
    }

    // Active clusters (id -> size), iterated in id order for determinism.
    let mut active: BTreeMap<usize, usize> = (0..n).map(|i| (i, 1)).collect();
    let mut distances: HashMap<(usize, usize), f64> = HashMap::new();
    for i in 0..n {
        for j in (i + 1)..n {
            distances.insert((i, j), condensed[condensed_index(n, i, j)]);
        }
    }

    let mut merges = Vec::with_capacity(n - 1);
    for step in 0..(n - 1) {
        let mut best: Option<((usize, usize), f64)> = None;
        let ids: Vec<usize> = active.keys().copied().collect();
        for (a_pos, &a) in ids.iter().enumerate() {
            for &b in &ids[(a_pos + 1)..] {
                let dist = distances[&(a, b)];
                if best.map_or(true, |(_, best_dist)| dist < best_dist) {
                    best = Some(((a, b), dist));
                }
            }
        }
        let ((left, right), merge_dist) = best.ok_or_else(|| {
            Error::EmptyTable("no active cluster pair left to merge".to_string())
        })?;

        let left_size = active[&left];
        let right_size = active[&right];
        let new_id = n + step;
        let new_size = left_size + right_size;

        // Lance-Williams update for Ward: distances to every survivor.
        let mut updated = Vec::new();
        for (&other, &other_size) in &active {
            if other == left || other == right {
                continue;
            }
            let d_left = distances[&ordered(other, left)];
            let d_right = distances[&ordered(other, right)];
            let total = (left_size + right_size + other_size) as f64;
            let d_new = (((left_size + other_size) as f64 * d_left * d_left
                + (right_size + other_size) as f64 * d_right * d_right
                - other_size as f64 * merge_dist * merge_dist)
                / total)
                .sqrt();
            updated.push((ordered(other, new_id), d_new));
        }

        active.remove(&left);
        active.remove(&right);
        distances.retain(|&(a, b), _| {
            a != left && a != right && b != left && b != right
        });
        for (key, dist) in updated {
            distances.insert(key, dist);
        }
        active.insert(new_id, new_size);

        debug!(
            "merge {}: clusters {} and {} at distance {:.6} (size {})",
            step, left, right, merge_dist, new_size
        );
        merges.push(MergeStep {
            left,
            right,
            distance: merge_dist,
            size: new_size,
        });
    }

    Ok(merges)
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Cut a merge sequence into exactly `n_clusters` flat clusters.
///
/// Ward linkage is monotone, so undoing the last `n_clusters - 1` merges
/// yields the same partition as thresholding at the corresponding height.
/// Labels are 1-based and numbered in order of first appearance by row
/// index, so row 0 always lands in cluster 1.
pub fn cut_maxclust(merges: &[MergeStep], n: usize, n_clusters: usize) -> Result<Vec<usize>> {
    if n_clusters == 0 || n_clusters > n {
        return Err(Error::InvalidClusterCount {
            requested: n_clusters,
            rows: n,
        });
    }

    // Replay merges until only n_clusters groups remain.
    let mut members: HashMap<usize, Vec<usize>> = (0..n).map(|i| (i, vec![i])).collect();
    for (step, merge) in merges.iter().take(n - n_clusters).enumerate() {
        let mut left = members.remove(&merge.left).ok_or_else(|| {
            Error::EmptyTable(format!("merge step references unknown cluster {}", merge.left))
        })?;
        let right = members.remove(&merge.right).ok_or_else(|| {
            Error::EmptyTable(format!("merge step references unknown cluster {}", merge.right))
        })?;
        left.extend(right);
        members.insert(n + step, left);
    }

    // Row -> surviving cluster id, then relabel by first appearance.
    let mut cluster_of = vec![0usize; n];
    for (&cluster_id, rows) in &members {
        for &row in rows {
            cluster_of[row] = cluster_id;
        }
    }
    let mut relabel: HashMap<usize, usize> = HashMap::new();
    let mut labels = Vec::with_capacity(n);
    for row in 0..n {
        let next = relabel.len() + 1;
        let label = *relabel.entry(cluster_of[row]).or_insert(next);
        labels.push(label);
    }
    Ok(labels)
}

/// Agglomerative hierarchical clustering over a row-major float matrix.
pub struct AgglomerativeClustering {
    /// Number of flat clusters to produce
    n_clusters: usize,
    /// Merge sequence recorded during fit
    merges: Vec<MergeStep>,
    /// 1-based cluster labels, one per input row
    labels: Vec<usize>,
    /// Whether fit has run
    fitted: bool,
}

impl AgglomerativeClustering {
    /// Create a new instance targeting `n_clusters` flat clusters
    pub fn new(n_clusters: usize) -> Self {
        AgglomerativeClustering {
            n_clusters,
            merges: Vec::new(),
            labels: Vec::new(),
            fitted: false,
        }
    }

    /// Cluster the rows: pairwise distances, Ward linkage, maxclust cut
    pub fn fit(&mut self, rows: &[Vec<f64>]) -> Result<()> {
        let n = rows.len();
        if self.n_clusters == 0 || self.n_clusters > n {
            return Err(Error::InvalidClusterCount {
                requested: self.n_clusters,
                rows: n,
            });
        }
        if let Some(first) = rows.first() {
            for row in rows {
                if row.len() != first.len() {
                    return Err(Error::InconsistentRowCount {
                        expected: first.len(),
                        found: row.len(),
                    });
                }
            }
        }

        let condensed = pairwise_euclidean(rows);
        self.merges = ward_linkage(&condensed, n)?;
        self.labels = cut_maxclust(&self.merges, n, self.n_clusters)?;
        self.fitted = true;
        debug!(
            "clustered {} rows into {} groups via Ward linkage",
            n, self.n_clusters
        );
        Ok(())
    }

    /// 1-based cluster labels assigned during fit
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// The recorded merge sequence
    pub fn merges(&self) -> &[MergeStep] {
        &self.merges
    }

    /// Whether fit has run
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }
}
