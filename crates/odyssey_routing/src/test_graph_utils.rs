#[cfg(test)]
pub mod test_graph {
    use crate::{
        geometry::CoordinateSystem,
        graph::{RoadGraph, RoadGraphBuilder},
        types::NodeId,
    };

    #[derive(Clone, Copy, Debug)]
    pub enum RomaniaGraphCity {
        Arad = 1,
        Bucharest = 2,
        Craiova = 3,
        Dobreta = 4,
        Eforie = 5,
        Fagaras = 6,
        Giurgiu = 7,
        Hirsova = 8,
        Iasi = 9,
        Lugoj = 10,
        Mehadia = 11,
        Neamt = 12,
        Oradea = 13,
        Pitesti = 14,
        RimnicuVilcea = 15,
        Sibiu = 16,
        Timisoara = 17,
        Urziceni = 18,
        Vaslui = 19,
        Zerind = 20,
    }

    impl From<RomaniaGraphCity> for NodeId {
        fn from(value: RomaniaGraphCity) -> Self {
            value as NodeId
        }
    }

    /// (lon, lat) of every node, node 0 is an isolated placeholder.
    const ROMANIA_NODES: [(f64, f64); 21] = [
        (0.0, 0.0),
        (21.31, 46.17),
        (26.10, 44.43),
        (23.80, 44.32),
        (22.66, 44.63),
        (28.65, 44.06),
        (24.97, 45.84),
        (25.97, 43.90),
        (27.95, 44.69),
        (27.60, 47.16),
        (21.90, 45.69),
        (22.36, 44.90),
        (26.38, 47.20),
        (21.92, 47.05),
        (24.87, 44.86),
        (24.37, 45.10),
        (24.15, 45.79),
        (21.23, 45.75),
        (26.64, 44.72),
        (27.73, 46.64),
        (21.52, 46.62),
    ];

    // https://user-images.githubusercontent.com/43790152/97784960-1a142580-1bc4-11eb-9070-39c03eb16df2.png
    fn get_romania_graph_roads() -> Vec<(RomaniaGraphCity, RomaniaGraphCity, f64)> {
        use RomaniaGraphCity::*;

        vec![
            (Oradea, Zerind, 71.0),
            (Oradea, Sibiu, 151.0),
            (Zerind, Arad, 75.0),
            (Arad, Sibiu, 140.0),
            (Arad, Timisoara, 118.0),
            (Timisoara, Lugoj, 111.0),
            (Lugoj, Mehadia, 70.0),
            (Mehadia, Dobreta, 75.0),
            (Dobreta, Craiova, 120.0),
            (Craiova, RimnicuVilcea, 146.0),
            (Craiova, Pitesti, 138.0),
            (RimnicuVilcea, Pitesti, 97.0),
            (RimnicuVilcea, Sibiu, 80.0),
            (Sibiu, Fagaras, 99.0),
            (Fagaras, Bucharest, 211.0),
            (Pitesti, Bucharest, 101.0),
            (Bucharest, Giurgiu, 90.0),
            (Bucharest, Urziceni, 85.0),
            (Urziceni, Hirsova, 98.0),
            (Hirsova, Eforie, 86.0),
            (Urziceni, Vaslui, 142.0),
            (Vaslui, Iasi, 92.0),
            (Iasi, Neamt, 87.0),
        ]
    }

    pub fn romania_point(city: RomaniaGraphCity) -> geo::Point {
        let (lon, lat) = ROMANIA_NODES[city as usize];
        geo::Point::new(lon, lat)
    }

    /// Two-way roads between the cities, lengths in meters.
    pub fn create_romania_graph() -> RoadGraph {
        let mut builder = RoadGraphBuilder::new(CoordinateSystem::LatLon);

        for (lon, lat) in ROMANIA_NODES {
            builder.add_node(geo::Point::new(lon, lat));
        }

        for (start, end, kilometers) in get_romania_graph_roads() {
            builder
                .add_road(start.into(), end.into(), kilometers * 1000.0, None)
                .unwrap();
        }

        builder.build()
    }
}
