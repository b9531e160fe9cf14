use std::path::PathBuf;

use clap::{Args, ValueEnum};
use odyssey_matrix_providers::{
    cache::FileCache,
    distance_matrix::DistanceMatrix,
    matrix_builder::DistanceMatrixBuilder,
    matrix_params::{MatrixParams, Threads, UnreachablePolicy},
};
use odyssey_optimizer::{
    parsers::{instance_parser::InstanceParser, parser::DatasetParser},
    problem::location_set::LocationSet,
};
use odyssey_routing::{
    as_the_crow_flies::as_the_crow_flies_graph,
    geometry::CoordinateSystem,
    road_network::RoadNetwork,
    weighting::{LengthWeighting, TravelTimeWeighting, Weighting},
};
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CoordinatesArg {
    /// `<id> <lat> <lon>`
    LatLon,
    /// `<id> <x> <y>`
    Cartesian,
}

impl From<CoordinatesArg> for CoordinateSystem {
    fn from(value: CoordinatesArg) -> Self {
        match value {
            CoordinatesArg::LatLon => CoordinateSystem::LatLon,
            CoordinatesArg::Cartesian => CoordinateSystem::Cartesian,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum WeightingArg {
    Length,
    TravelTime,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum UnreachableArg {
    /// Abort when a location cannot be reached from another one
    Fail,
    /// Never travel between locations without a path
    Forbid,
}

impl From<UnreachableArg> for UnreachablePolicy {
    fn from(value: UnreachableArg) -> Self {
        match value {
            UnreachableArg::Fail => UnreachablePolicy::Fail,
            UnreachableArg::Forbid => UnreachablePolicy::Forbid,
        }
    }
}

/// Instance and distance options shared by the commands.
#[derive(Args)]
pub struct ProviderArgs {
    /// Instance file: a location count followed by one `id x y` row per location
    #[arg(short, long)]
    pub input: PathBuf,

    /// Road graph JSON file, distances are straight lines when omitted
    #[arg(short, long)]
    graph: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = CoordinatesArg::LatLon)]
    coordinates: CoordinatesArg,

    #[arg(short, long, value_enum, default_value_t = WeightingArg::Length)]
    weighting: WeightingArg,

    /// Threads used to compute the distance matrix (default: all cores)
    #[arg(long)]
    threads: Option<usize>,

    #[arg(long, value_enum, default_value_t = UnreachableArg::Fail)]
    unreachable: UnreachableArg,

    /// Reuse distance matrices stored in ODYSSEY_CACHE_FOLDER
    #[arg(long)]
    cache: bool,
}

impl ProviderArgs {
    pub fn load_locations(&self) -> Result<LocationSet, anyhow::Error> {
        let locations = InstanceParser::new(self.coordinates.into()).parse(&self.input)?;
        info!(
            locations = locations.len(),
            "Loaded instance {}",
            self.input.display()
        );
        Ok(locations)
    }

    fn weighting(&self) -> Box<dyn Weighting> {
        match self.weighting {
            WeightingArg::Length => Box::new(LengthWeighting),
            WeightingArg::TravelTime => Box::new(TravelTimeWeighting::default()),
        }
    }

    pub fn build_provider(&self, locations: &LocationSet) -> Result<RoadNetwork, anyhow::Error> {
        match &self.graph {
            Some(path) => {
                let network = RoadNetwork::from_file(path, self.weighting())?;
                if network.graph().coordinates() != locations.coordinates() {
                    warn!(
                        graph = ?network.graph().coordinates(),
                        instance = ?locations.coordinates(),
                        "Road graph and instance use different coordinate systems"
                    );
                }
                Ok(network)
            }
            None => {
                let graph = as_the_crow_flies_graph(&locations.points(), locations.coordinates())?;
                Ok(RoadNetwork::with_weighting(graph, self.weighting()))
            }
        }
    }

    pub fn matrix_params(&self) -> MatrixParams {
        MatrixParams {
            threads: match self.threads {
                None => Threads::Auto,
                Some(0) | Some(1) => Threads::Single,
                Some(threads) => Threads::Multi(threads),
            },
            unreachable: self.unreachable.into(),
        }
    }

    pub fn build_matrix(
        &self,
        locations: &LocationSet,
        provider: &RoadNetwork,
    ) -> Result<DistanceMatrix, anyhow::Error> {
        let builder = DistanceMatrixBuilder::new(self.matrix_params());
        let points = locations.points();

        let matrix = if self.cache {
            let cache = FileCache::from_env()?;
            builder.build_cached(&points, provider, &cache)?
        } else {
            builder.build(&points, provider)?
        };

        Ok(matrix)
    }
}
