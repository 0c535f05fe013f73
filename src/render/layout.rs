//! Force-directed (Fruchterman-Reingold) node placement.

use petgraph::visit::EdgeRef;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::InteractionGraph;

/// Distances below this are clamped to keep forces finite.
const MIN_DISTANCE: f64 = 0.01;

/// Position every node, indexed by `NodeIndex::index()`, rescaled into
/// `[-1, 1]` on both axes.
///
/// `k` is the optimal distance between nodes. Repulsion acts between every
/// pair; attraction follows edges in both directions, scaled by edge weight.
/// Starting positions are drawn from `seed` (OS entropy when `None`).
pub fn spring_layout(
    graph: &InteractionGraph,
    k: f64,
    iterations: usize,
    seed: Option<u64>,
) -> Vec<(f64, f64)> {
    let n = graph.node_count();
    if n == 0 {
        return vec![];
    }
    if n == 1 {
        return vec![(0.0, 0.0)];
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut pos: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random::<f64>(), rng.random::<f64>()))
        .collect();

    let edges: Vec<(usize, usize, f64)> = graph
        .graph
        .edge_references()
        .filter(|e| e.source() != e.target())
        .map(|e| (e.source().index(), e.target().index(), e.weight().weight))
        .collect();

    // Initial temperature: a tenth of the layout extent, cooled linearly
    let extent = pos
        .iter()
        .fold((f64::MIN, f64::MAX, f64::MIN, f64::MAX), |(xmax, xmin, ymax, ymin), &(x, y)| {
            (xmax.max(x), xmin.min(x), ymax.max(y), ymin.min(y))
        });
    let mut temperature = 0.1 * (extent.0 - extent.1).max(extent.2 - extent.3);
    let cooling = temperature / (iterations as f64 + 1.0);

    let mut disp = vec![(0.0f64, 0.0f64); n];
    for _ in 0..iterations {
        disp.iter_mut().for_each(|d| *d = (0.0, 0.0));

        for i in 0..n {
            for j in (i + 1)..n {
                let dx = pos[i].0 - pos[j].0;
                let dy = pos[i].1 - pos[j].1;
                let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let force = k * k / (dist * dist);
                disp[i].0 += dx * force;
                disp[i].1 += dy * force;
                disp[j].0 -= dx * force;
                disp[j].1 -= dy * force;
            }
        }

        for &(s, t, w) in &edges {
            let dx = pos[s].0 - pos[t].0;
            let dy = pos[s].1 - pos[t].1;
            let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
            let force = w * dist / k;
            disp[s].0 -= dx * force;
            disp[s].1 -= dy * force;
            disp[t].0 += dx * force;
            disp[t].1 += dy * force;
        }

        for (p, d) in pos.iter_mut().zip(&disp) {
            let length = (d.0 * d.0 + d.1 * d.1).sqrt().max(MIN_DISTANCE);
            p.0 += d.0 * temperature / length;
            p.1 += d.1 * temperature / length;
        }
        temperature -= cooling;
    }

    rescale(&mut pos);
    pos
}

/// Center on the mean and scale so the largest coordinate magnitude is 1.
fn rescale(pos: &mut [(f64, f64)]) {
    let n = pos.len() as f64;
    let (mx, my) = pos
        .iter()
        .fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x, sy + y));
    let (mx, my) = (mx / n, my / n);

    let mut lim = 0.0f64;
    for p in pos.iter_mut() {
        p.0 -= mx;
        p.1 -= my;
        lim = lim.max(p.0.abs()).max(p.1.abs());
    }
    if lim > 0.0 {
        for p in pos.iter_mut() {
            p.0 /= lim;
            p.1 /= lim;
        }
    }
}
