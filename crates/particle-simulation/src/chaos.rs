//! Logistic-map attractor sampling
//!
//! Iterates `x <- r * x * (1 - x)` from random seeds and clusters the
//! long-run tail into attractor branches. At r = 4.0 the map is fully chaotic
//! and the tail smears over [0, 1]; below the period-doubling cascade it
//! collapses onto a handful of branches.

use rand::Rng;

/// Total iterations per seed
pub const LOGISTIC_ITERATIONS: usize = 200;
/// Leading iterates discarded as transient
pub const TRANSIENT: usize = 100;
/// Trailing iterates kept per seed
pub const TAIL_WINDOW: usize = 20;
/// Maximum distance from a cluster's representative for a value to join it
pub const CLUSTER_EPSILON: f64 = 1.0e-3;

/// An attractor mean and the number of samples that landed on it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Branch {
    pub value: f32,
    pub weight: u32,
}

/// One step of the logistic map
#[inline]
pub fn logistic_step(r: f64, x: f64) -> f64 {
    r * x * (1.0 - x)
}

/// Post-transient iterates for one seed
fn logistic_tail(r: f64, x0: f64) -> impl Iterator<Item = f64> {
    let mut x = x0;
    (0..LOGISTIC_ITERATIONS)
        .map(move |_| {
            x = logistic_step(r, x);
            x
        })
        .skip(TRANSIENT)
}

/// Greedy clustering: each value joins the first cluster whose representative
/// (its first member) is within `epsilon`, else opens a new cluster.
///
/// Returns `(mean, count)` per cluster, sorted ascending by mean.
pub fn cluster_attractors(values: &[f64], epsilon: f64) -> Vec<Branch> {
    struct Cluster {
        representative: f64,
        sum: f64,
        count: u32,
    }

    let mut clusters: Vec<Cluster> = Vec::new();
    for &v in values {
        match clusters
            .iter_mut()
            .find(|c| (c.representative - v).abs() < epsilon)
        {
            Some(cluster) => {
                cluster.sum += v;
                cluster.count += 1;
            }
            None => clusters.push(Cluster {
                representative: v,
                sum: v,
                count: 1,
            }),
        }
    }

    let mut branches: Vec<Branch> = clusters
        .into_iter()
        .map(|c| Branch {
            value: (c.sum / c.count as f64) as f32,
            weight: c.count,
        })
        .collect();
    branches.sort_by(|a, b| a.value.total_cmp(&b.value));
    branches
}

/// Sample the attractor branches of the logistic map at parameter `r`.
///
/// Values that leave [0, 1] or stop being finite are dropped, so a degenerate
/// `r` yields an empty list. Callers treat that as "no spawn", not an error.
pub fn sample_branches<R: Rng + ?Sized>(r: f32, seed_count: usize, rng: &mut R) -> Vec<Branch> {
    let r = r as f64;
    let mut pooled = Vec::with_capacity(seed_count * TAIL_WINDOW);

    for _ in 0..seed_count {
        let x0: f64 = rng.random_range(f64::MIN_POSITIVE..1.0);
        let tail: Vec<f64> = logistic_tail(r, x0).collect();
        let start = tail.len().saturating_sub(TAIL_WINDOW);
        pooled.extend(
            tail[start..]
                .iter()
                .copied()
                .filter(|v| v.is_finite() && (0.0..=1.0).contains(v)),
        );
    }

    cluster_attractors(&pooled, CLUSTER_EPSILON)
}
