use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_DEPTH_LIMIT: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchAlgorithm {
    Minimax,
    #[default]
    #[serde(alias = "alpha_beta", alias = "alpha-beta")]
    AlphaBeta,
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimax => write!(f, "Minimax"),
            Self::AlphaBeta => write!(f, "AlphaBeta"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Plies searched below the root before the static evaluator is used.
    pub depth_limit: u8,
    pub algorithm: SearchAlgorithm,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth_limit: DEFAULT_DEPTH_LIMIT,
            algorithm: SearchAlgorithm::AlphaBeta,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub const fn new(depth_limit: u8, algorithm: SearchAlgorithm) -> Self {
        Self {
            depth_limit,
            algorithm,
        }
    }

    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    /// Fails on malformed JSON or an unknown `algorithm` name.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// A depth of zero would leave nothing to compare at the root, so it searches one ply.
    #[must_use]
    pub fn effective_depth(&self) -> u8 {
        self.depth_limit.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_default() {
        let json = "{}";
        let config = EngineConfig::load_from_json(json).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.depth_limit, DEFAULT_DEPTH_LIMIT);
        assert_eq!(config.algorithm, SearchAlgorithm::AlphaBeta);
    }

    #[test]
    fn test_load_config_partial() {
        let json = r#"{
            "depth_limit": 5
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();
        assert_eq!(config.depth_limit, 5);
        // Others should be default
        assert_eq!(config.algorithm, SearchAlgorithm::AlphaBeta);
    }

    #[test]
    fn test_load_config_full() {
        let json = r#"{
            "depth_limit": 2,
            "algorithm": "minimax"
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();
        assert_eq!(config, EngineConfig::new(2, SearchAlgorithm::Minimax));
    }

    #[test]
    fn test_algorithm_aliases() {
        for name in ["alphabeta", "alpha_beta", "alpha-beta"] {
            let json = format!(r#"{{ "algorithm": "{name}" }}"#);
            let config = EngineConfig::load_from_json(&json).unwrap();
            assert_eq!(config.algorithm, SearchAlgorithm::AlphaBeta);
        }
    }

    #[test]
    fn test_load_config_invalid_json() {
        let json = "{ invalid json }";
        let result = EngineConfig::load_from_json(json);
        assert!(result.is_err());

        let result = EngineConfig::load_from_json(r#"{ "algorithm": "mcts" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_depth_searches_one_ply() {
        let config = EngineConfig::new(0, SearchAlgorithm::Minimax);
        assert_eq!(config.effective_depth(), 1);
        assert_eq!(EngineConfig::default().effective_depth(), DEFAULT_DEPTH_LIMIT);
    }

    #[test]
    fn test_round_trip_serialization() {
        let config = EngineConfig::new(4, SearchAlgorithm::Minimax);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"depth_limit":4,"algorithm":"minimax"}"#);
    }
}
