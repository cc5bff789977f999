//! Forest scatter
//!
//! Trees are placed once per session, uniformly over a square, leaving a
//! clearing around the spawn point.

use crate::config::ForestConfig;
use glam::Vec3;
use rand::Rng;

/// A tree to plant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreePlacement {
    pub position: Vec3,
    pub trunk_height: f32,
}

/// Scatter trees. Draws inside the clearing are dropped, not retried.
pub fn scatter<R: Rng>(config: &ForestConfig, rng: &mut R) -> Vec<TreePlacement> {
    let (low, high) = config.trunk_height;
    let extent = config.half_extent;

    (0..config.tree_count)
        .filter_map(|_| {
            let trunk_height = if high > low { rng.gen_range(low..high) } else { low };
            let x = rng.gen_range(-extent..=extent);
            let z = rng.gen_range(-extent..=extent);
            let in_clearing = x.abs() <= config.clearing && z.abs() <= config.clearing;
            (!in_clearing).then(|| TreePlacement {
                position: Vec3::new(x, 0.0, z),
                trunk_height,
            })
        })
        .collect()
}
