//! Quadtree demo - scatter random points, query each quadrant, and check the
//! answers against a linear scan.

use anyhow::{Context, ensure};
use glam::Vec2;
use quadtree::{DataNode, InsertError, QuadTreeConfig, QuadTreeNode, Quadrant, Rect};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "quadtree.toml";

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Quadtree demo v{}", env!("CARGO_PKG_VERSION"));

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = QuadTreeConfig::load_or_create(&path)
        .with_context(|| format!("loading {path}"))?;
    info!("Loaded configuration");
    info!("  Capacity: {}", config.capacity);
    info!("  Root: {}", config.root_bounds()?);
    info!("  Points: {}", config.demo.points);

    let mut rng = match config.demo.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut tree = QuadTreeNode::from_config(&config)?;
    let inserted = scatter(&mut tree, &mut rng, config.demo.points)?;
    info!(
        "Inserted {} points into {} nodes (height {})",
        tree.len(),
        tree.node_count(),
        tree.height()
    );

    let bounds = tree.boundaries();
    let probe = bounds.max() + Vec2::ONE;
    match tree.try_insert(DataNode::new(probe, usize::MAX)) {
        Err(err @ InsertError::OutOfBounds { .. }) => info!("Probe rejected as expected: {err}"),
        Err(err) => anyhow::bail!("probe failed for the wrong reason: {err}"),
        Ok(()) => anyhow::bail!("probe at ({}, {}) was accepted", probe.x, probe.y),
    }

    for quadrant in Quadrant::ORDER {
        let range = shrink(bounds.quadrant(quadrant), config.demo.query_shrink);
        let found = check_query(&tree, &inserted, &range)?;
        info!("{quadrant:?} {range}: {found} points");
    }

    let total = check_query(&tree, &inserted, &bounds)?;
    ensure!(total == tree.len(), "full query returned {total} of {} points", tree.len());
    info!("Full query returned all {total} points");

    Ok(())
}

/// Insert `count` random in-bounds points, returning what was inserted.
fn scatter(
    tree: &mut QuadTreeNode<usize>,
    rng: &mut impl Rng,
    count: usize,
) -> anyhow::Result<Vec<(Vec2, usize)>> {
    let (min, max) = (tree.boundaries().min(), tree.boundaries().max());
    let mut inserted = Vec::with_capacity(count);

    for id in 0..count {
        let point = Vec2::new(rng.random_range(min.x..=max.x), rng.random_range(min.y..=max.y));
        match tree.try_insert(DataNode::new(point, id)) {
            Ok(()) => inserted.push((point, id)),
            Err(err) => {
                warn!("Insert {id} failed: {err}");
                return Err(err.into());
            }
        }
    }

    Ok(inserted)
}

/// Scale a rectangle about its center.
fn shrink(rect: Rect, factor: f32) -> Rect {
    Rect::new(rect.center(), rect.half_extent() * factor.clamp(0.0, 1.0))
}

/// Run a range query and compare it with a brute-force scan.
fn check_query(
    tree: &QuadTreeNode<usize>,
    inserted: &[(Vec2, usize)],
    range: &Rect,
) -> anyhow::Result<usize> {
    let mut found: Vec<usize> = tree.query_range(range).iter().map(|item| item.data).collect();
    let mut expected: Vec<usize> = inserted
        .iter()
        .filter(|(point, _)| range.contains(*point))
        .map(|&(_, id)| id)
        .collect();

    found.sort_unstable();
    expected.sort_unstable();
    debug!("Query {range}: {} found, {} expected", found.len(), expected.len());

    ensure!(
        found == expected,
        "query {range} returned {} points, scan found {}",
        found.len(),
        expected.len()
    );
    Ok(found.len())
}
