use itertools::Itertools;
use petgraph::unionfind::UnionFind;

use crate::libs::block::Block;
use crate::libs::error::MatrixError;
use crate::libs::nt;

/// Per-cluster nucleotide profile: one probability vector per column, in
/// A, C, G, T order. The mean of one-hot encodings over the cluster's rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub cols: Vec<[f64; 4]>,
}

/// Fraction of positions where two equal-length rows agree.
pub fn similarity(a: &[u8], b: &[u8]) -> f64 {
    if a.is_empty() {
        return 0.0;
    }
    let same = a.iter().zip(b.iter()).filter(|(x, y)| x == y).count();
    same as f64 / a.len() as f64
}

/// Partitions block rows into clusters under the transitive closure of the
/// `similarity >= x` relation.
///
/// If A~B and B~C then A, B and C share a cluster even when A and C are
/// dissimilar. Every row lands in exactly one cluster; clusters are ordered
/// by their smallest row index so downstream arithmetic is deterministic.
pub fn cluster_rows(block: &Block, x: f64) -> Vec<Vec<usize>> {
    let n = block.n_rows();
    let mut uf = UnionFind::<usize>::new(n);

    for (a, b) in (0..n).tuple_combinations() {
        if similarity(&block.rows()[a], &block.rows()[b]) >= x {
            uf.union(a, b);
        }
    }

    let labeling = uf.into_labeling();
    let mut clusters: Vec<Vec<usize>> = vec![];
    let mut slot: Vec<Option<usize>> = vec![None; n];
    for (i, &root) in labeling.iter().enumerate() {
        match slot[root] {
            Some(k) => clusters[k].push(i),
            None => {
                slot[root] = Some(clusters.len());
                clusters.push(vec![i]);
            }
        }
    }

    clusters
}

/// Computes the mean one-hot profile of each cluster.
///
/// Blocks are gap-free by construction, so every symbol maps onto a basis
/// vector.
pub fn cluster_profiles(
    block: &Block,
    clusters: &[Vec<usize>],
) -> Result<Vec<Profile>, MatrixError> {
    let n_cols = block.n_cols();

    clusters
        .iter()
        .map(|members| {
            let mut cols = vec![[0.0f64; 4]; n_cols];
            for &row in members {
                for (c, &b) in block.rows()[row].iter().enumerate() {
                    let v = nt::one_hot(b).ok_or(MatrixError::InvalidSymbol {
                        row,
                        col: c,
                        symbol: b as char,
                    })?;
                    for k in 0..4 {
                        cols[c][k] += v[k];
                    }
                }
            }

            let size = members.len() as f64;
            for col in cols.iter_mut() {
                for v in col.iter_mut() {
                    *v /= size;
                }
            }

            Ok(Profile { cols })
        })
        .collect()
}
