use std::fmt;
use std::str::FromStr;

/// Which search strategy to run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Uniform-cost search.
    Dijkstra,
    /// Dijkstra ordered by distance plus an estimate to the end.
    #[default]
    AStar,
    /// Unweighted breadth-first search.
    BreadthFirst,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Self::Dijkstra, Self::AStar, Self::BreadthFirst];

    /// Short name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Dijkstra => "dijkstra",
            Self::AStar => "astar",
            Self::BreadthFirst => "breadth",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when an algorithm name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(pub String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm \u{201c}{}\u{201d} (expected dijkstra, astar or breadth)",
            self.0
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Self::Dijkstra),
            "astar" | "a*" => Ok(Self::AStar),
            "breadth" | "bfs" => Ok(Self::BreadthFirst),
            _ => Err(ParseAlgorithmError(s.to_owned())),
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn algorithm_round_trip() {
        for a in Algorithm::ALL {
            let json = serde_json::to_string(&a).unwrap();
            let back: Algorithm = serde_json::from_str(&json).unwrap();
            assert_eq!(a, back);
        }
    }
}
