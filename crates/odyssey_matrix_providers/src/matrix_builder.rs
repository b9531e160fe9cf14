use odyssey_routing::{
    error::RoutingError, routing_graph_provider::RoutingGraphProvider, stopwatch::Stopwatch,
    types::NodeId,
};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    cache::{MatricesCache, cache_key},
    distance_matrix::DistanceMatrix,
    error::MatrixError,
    matrix_params::{MatrixParams, UnreachablePolicy},
};

/// Computes the all-pairs distance matrix of a set of points by snapping each
/// point to its nearest routing node and running one shortest-path query per
/// ordered pair.
pub struct DistanceMatrixBuilder {
    params: MatrixParams,
}

impl DistanceMatrixBuilder {
    pub fn new(params: MatrixParams) -> Self {
        DistanceMatrixBuilder { params }
    }

    pub fn params(&self) -> &MatrixParams {
        &self.params
    }

    /// Builds the matrix, computing rows on a dedicated thread pool when more
    /// than one thread is configured.
    pub fn build<P>(&self, points: &[geo::Point], provider: &P) -> Result<DistanceMatrix, MatrixError>
    where
        P: RoutingGraphProvider + Sync,
    {
        let num_threads = self.params.threads.number_of_threads();
        if num_threads <= 1 {
            return self.build_sequential(points, provider);
        }

        let stopwatch = Stopwatch::new("distance matrix");
        let nodes = snap_points(points, provider)?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()?;

        let rows = pool.install(|| {
            nodes
                .par_iter()
                .enumerate()
                .map(|(from, &from_node)| {
                    compute_row(from, from_node, &nodes, provider, self.params.unreachable)
                })
                .collect::<Result<Vec<_>, _>>()
        })?;

        let matrix = DistanceMatrix::from_flat(nodes.len(), rows.into_iter().flatten().collect())?;
        report(&matrix, &stopwatch);

        Ok(matrix)
    }

    /// Builds the matrix on the calling thread, one query at a time.
    pub fn build_sequential<P>(
        &self,
        points: &[geo::Point],
        provider: &P,
    ) -> Result<DistanceMatrix, MatrixError>
    where
        P: RoutingGraphProvider,
    {
        let stopwatch = Stopwatch::new("distance matrix");
        let nodes = snap_points(points, provider)?;

        let mut distances = Vec::with_capacity(nodes.len() * nodes.len());
        for (from, &from_node) in nodes.iter().enumerate() {
            distances.extend(compute_row(
                from,
                from_node,
                &nodes,
                provider,
                self.params.unreachable,
            )?);
        }

        let matrix = DistanceMatrix::from_flat(nodes.len(), distances)?;
        report(&matrix, &stopwatch);

        Ok(matrix)
    }

    /// Same as [`DistanceMatrixBuilder::build`] but looks the matrix up in
    /// `cache` first and stores freshly computed matrices in it. Cache
    /// failures are logged and never abort the build.
    pub fn build_cached<P, C>(
        &self,
        points: &[geo::Point],
        provider: &P,
        cache: &C,
    ) -> Result<DistanceMatrix, MatrixError>
    where
        P: RoutingGraphProvider + Sync,
        C: MatricesCache,
    {
        let key = cache_key(points, &provider.fingerprint(), self.params.unreachable);

        match cache.get(&key) {
            Ok(Some(matrix)) if matrix.num_locations() == points.len() => {
                debug!(key = %key, "Distance matrix cache hit");
                return Ok(matrix);
            }
            Ok(_) => debug!(key = %key, "Distance matrix cache miss"),
            Err(error) => warn!(key = %key, "Failed to read cached distance matrix: {}", error),
        }

        let matrix = self.build(points, provider)?;

        if let Err(error) = cache.put(&key, &matrix) {
            warn!(key = %key, "Failed to cache distance matrix: {}", error);
        }

        Ok(matrix)
    }
}

fn snap_points<P>(points: &[geo::Point], provider: &P) -> Result<Vec<NodeId>, MatrixError>
where
    P: RoutingGraphProvider,
{
    points
        .iter()
        .map(|&point| provider.nearest_node(point).map_err(MatrixError::from))
        .collect()
}

fn compute_row<P>(
    from: usize,
    from_node: NodeId,
    nodes: &[NodeId],
    provider: &P,
    policy: UnreachablePolicy,
) -> Result<Vec<f64>, MatrixError>
where
    P: RoutingGraphProvider,
{
    let mut row = Vec::with_capacity(nodes.len());

    for (to, &to_node) in nodes.iter().enumerate() {
        if from == to {
            row.push(f64::INFINITY);
            continue;
        }

        let distance = match provider.shortest_path_length(from_node, to_node) {
            Ok(distance) => distance,
            Err(RoutingError::NoPath { .. }) => match policy {
                UnreachablePolicy::Fail => return Err(MatrixError::NoPath { from, to }),
                UnreachablePolicy::Forbid => {
                    warn!(from, to, "No path between locations, arc is forbidden");
                    f64::INFINITY
                }
            },
            Err(error) => return Err(error.into()),
        };

        row.push(distance);
    }

    Ok(row)
}

fn report(matrix: &DistanceMatrix, stopwatch: &Stopwatch) {
    info!(
        locations = matrix.num_locations(),
        unreachable = matrix.unreachable_pairs(),
        "Distance matrix built in {:?}",
        stopwatch.elapsed()
    );
}
