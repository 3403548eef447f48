use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

/// Undirected simple graph over nodes `0..n`, stored as sorted neighbor lists.
/// Both network layers (contact and information/game) use this representation;
/// the upper layer shares node identity with the lower layer.
#[derive(Debug, Clone)]
pub struct Network {
    neighbors: Vec<Vec<usize>>,
}

impl Network {
    /// Build from an edge list. Self-loops are rejected; duplicate edges collapse.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> anyhow::Result<Self> {
        anyhow::ensure!(n > 0, "network must have at least one node");
        let mut sets: Vec<HashSet<usize>> = vec![HashSet::new(); n];
        for &(a, b) in edges {
            anyhow::ensure!(a < n && b < n, "edge ({a},{b}) out of range for n={n}");
            anyhow::ensure!(a != b, "self-loop on node {a}");
            sets[a].insert(b);
            sets[b].insert(a);
        }
        let mut neighbors: Vec<Vec<usize>> = sets
            .into_iter()
            .map(|s| {
                let mut v: Vec<usize> = s.into_iter().collect();
                v.sort_unstable();
                v
            })
            .collect();
        neighbors.shrink_to_fit();
        Ok(Self { neighbors })
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn degree(&self, i: usize) -> usize {
        self.neighbors[i].len()
    }

    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.neighbors[i]
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.neighbors[a].binary_search(&b).is_ok()
    }

    /// Edge list with a < b, sorted; handy for layer derivation and tests.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for (a, nbrs) in self.neighbors.iter().enumerate() {
            for &b in nbrs {
                if a < b {
                    out.push((a, b));
                }
            }
        }
        out
    }

    pub fn num_edges(&self) -> usize {
        self.neighbors.iter().map(|v| v.len()).sum::<usize>() / 2
    }

    /// Dense 0/1 adjacency view (symmetric, zero diagonal).
    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        let n = self.len();
        let mut a = vec![vec![0.0; n]; n];
        for (i, nbrs) in self.neighbors.iter().enumerate() {
            for &j in nbrs {
                a[i][j] = 1.0;
            }
        }
        a
    }
}

/// Barabási–Albert scale-free graph: start from `m` unconnected nodes, attach
/// each new node to `m` distinct existing nodes with probability proportional
/// to their degree (repeated-endpoints sampling).
pub fn barabasi_albert<R: Rng>(n: usize, m: usize, rng: &mut R) -> anyhow::Result<Network> {
    anyhow::ensure!(m >= 1, "attachment parameter m must be >= 1");
    anyhow::ensure!(n > m, "need n > m (got n={n}, m={m})");

    let mut edges: Vec<(usize, usize)> = Vec::with_capacity((n - m) * m);
    // One endpoint entry per degree unit; sampling from it is preferential attachment.
    let mut repeated: Vec<usize> = Vec::with_capacity(2 * (n - m) * m);
    let mut targets: Vec<usize> = (0..m).collect();

    for source in m..n {
        for &t in &targets {
            edges.push((source, t));
        }
        repeated.extend_from_slice(&targets);
        repeated.extend(std::iter::repeat(source).take(m));

        // Vec membership keeps the sampling sequence seed-deterministic.
        let mut picked: Vec<usize> = Vec::with_capacity(m);
        while picked.len() < m {
            let &cand = repeated
                .choose(rng)
                .expect("repeated endpoint list is non-empty after first attachment");
            if !picked.contains(&cand) {
                picked.push(cand);
            }
        }
        targets = picked;
    }

    Network::from_edges(n, &edges)
}

/// Derive the upper (information/game) layer: same nodes and edges as `base`
/// plus `extra` additional random edges not already present.
pub fn add_random_edges<R: Rng>(base: &Network, extra: usize, rng: &mut R) -> anyhow::Result<Network> {
    let n = base.len();
    let max_edges = n * (n - 1) / 2;
    anyhow::ensure!(
        base.num_edges() + extra <= max_edges,
        "cannot add {extra} edges: graph with {n} nodes holds at most {max_edges}"
    );

    let mut edges = base.edges();
    let mut present: HashSet<(usize, usize)> = edges.iter().copied().collect();
    let wanted = edges.len() + extra;
    while present.len() < wanted {
        let a = rng.gen_range(0..n);
        let b = rng.gen_range(0..n);
        if a == b {
            continue;
        }
        let key = (a.min(b), a.max(b));
        if present.insert(key) {
            edges.push(key);
        }
    }

    Network::from_edges(n, &edges)
}
