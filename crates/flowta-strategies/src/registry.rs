//! Strategy registry for dynamic strategy loading.

use std::collections::BTreeMap;
use std::sync::Arc;

use flowta_core::{
    error::StrategyError,
    traits::{Strategy, StrategyConfig},
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    AroonConfig, AroonStrategy, BuyAndHold, MaCrossoverConfig, MaCrossoverStrategy,
    MajorityStrategy, MeanReversionConfig, MeanReversionStrategy, MomentumConfig,
    MomentumStrategy, RsiConfig, RsiStrategy,
};

/// Information about a registered strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyInfo {
    /// Registry key
    pub key: String,
    /// Strategy description
    pub description: String,
    /// Default configuration as JSON
    pub default_config: serde_json::Value,
}

/// Configuration of the majority vote over registered strategies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MajorityConfig {
    /// Registry keys of the voting strategies
    pub strategies: Vec<String>,
}

impl Default for MajorityConfig {
    fn default() -> Self {
        Self {
            strategies: vec![
                "ma_crossover".to_string(),
                "mean_reversion".to_string(),
                "momentum".to_string(),
                "rsi".to_string(),
                "aroon".to_string(),
            ],
        }
    }
}

impl StrategyConfig for MajorityConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        if self.strategies.is_empty() {
            return Err(StrategyError::InvalidConfig(
                "Majority needs at least one strategy".into(),
            ));
        }
        if self.strategies.iter().any(|s| s == MAJORITY) {
            return Err(StrategyError::InvalidConfig(
                "Majority cannot include itself".into(),
            ));
        }
        Ok(())
    }
}

const MAJORITY: &str = "majority";

/// Registry for available strategies.
pub struct StrategyRegistry {
    strategies: BTreeMap<String, StrategyInfo>,
}

impl StrategyRegistry {
    /// Create a new strategy registry with all built-in strategies.
    pub fn new() -> Self {
        let mut registry = Self {
            strategies: BTreeMap::new(),
        };

        registry.register(
            "buy_and_hold",
            "Buys once and holds the position until the end",
            serde_json::json!({}),
        );
        registry.register(
            "ma_crossover",
            "Generates signals based on fast/slow moving average crossovers",
            to_json(&MaCrossoverConfig::default()),
        );
        registry.register(
            "mean_reversion",
            "Trades reversions to the mean using Bollinger Bands",
            to_json(&MeanReversionConfig::default()),
        );
        registry.register(
            "momentum",
            "Follows trends using MACD and signal line crossovers",
            to_json(&MomentumConfig::default()),
        );
        registry.register(
            "rsi",
            "Trades RSI overbought/oversold reversals",
            to_json(&RsiConfig::default()),
        );
        registry.register(
            "aroon",
            "Follows trends identified by the Aroon up/down lines",
            to_json(&AroonConfig::default()),
        );
        registry.register(
            MAJORITY,
            "Follows the action the majority of strategies agree on",
            to_json(&MajorityConfig::default()),
        );

        registry
    }

    fn register(&mut self, key: &str, description: &str, default_config: serde_json::Value) {
        self.strategies.insert(
            key.to_string(),
            StrategyInfo {
                key: key.to_string(),
                description: description.to_string(),
                default_config,
            },
        );
    }

    /// List all available strategies, ordered by key.
    pub fn list(&self) -> Vec<&StrategyInfo> {
        self.strategies.values().collect()
    }

    /// Get strategy info by key.
    pub fn get(&self, key: &str) -> Option<&StrategyInfo> {
        self.strategies.get(key)
    }

    /// Check if a strategy exists.
    pub fn exists(&self, key: &str) -> bool {
        self.strategies.contains_key(key)
    }

    /// Get all strategy keys.
    pub fn names(&self) -> Vec<&String> {
        self.strategies.keys().collect()
    }

    /// Create a strategy instance from configuration.
    pub fn create(
        &self,
        key: &str,
        config: serde_json::Value,
    ) -> Result<Arc<dyn Strategy>, StrategyError> {
        match key {
            "buy_and_hold" => Ok(Arc::new(BuyAndHold::new())),
            "ma_crossover" => {
                let config: MaCrossoverConfig = parse_config(config)?;
                Ok(Arc::new(MaCrossoverStrategy::new(config)))
            }
            "mean_reversion" => {
                let config: MeanReversionConfig = parse_config(config)?;
                Ok(Arc::new(MeanReversionStrategy::new(config)))
            }
            "momentum" => {
                let config: MomentumConfig = parse_config(config)?;
                Ok(Arc::new(MomentumStrategy::new(config)))
            }
            "rsi" => {
                let config: RsiConfig = parse_config(config)?;
                Ok(Arc::new(RsiStrategy::new(config)))
            }
            "aroon" => {
                let config: AroonConfig = parse_config(config)?;
                Ok(Arc::new(AroonStrategy::new(config)))
            }
            MAJORITY => {
                let config: MajorityConfig = parse_config(config)?;
                let voters = config
                    .strategies
                    .iter()
                    .map(|key| self.create_default(key))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Arc::new(MajorityStrategy::with_name("Majority", voters)))
            }
            _ => Err(StrategyError::NotFound(key.to_string())),
        }
    }

    /// Create a strategy with default configuration.
    pub fn create_default(&self, key: &str) -> Result<Arc<dyn Strategy>, StrategyError> {
        let info = self
            .get(key)
            .ok_or_else(|| StrategyError::NotFound(key.to_string()))?;
        self.create(key, info.default_config.clone())
    }

    /// Create the given strategies with default configuration.
    pub fn resolve(&self, keys: &[String]) -> Result<Vec<Arc<dyn Strategy>>, StrategyError> {
        keys.iter().map(|key| self.create_default(key)).collect()
    }

    /// Every registered strategy with its default configuration.
    pub fn all(&self) -> Vec<Arc<dyn Strategy>> {
        self.strategies
            .keys()
            .filter_map(|key| match self.create_default(key) {
                Ok(strategy) => Some(strategy),
                Err(e) => {
                    warn!(strategy = %key, error = %e, "Skipping strategy");
                    None
                }
            })
            .collect()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn to_json<C: Serialize>(config: &C) -> serde_json::Value {
    serde_json::to_value(config).unwrap_or_default()
}

fn parse_config<C>(config: serde_json::Value) -> Result<C, StrategyError>
where
    C: StrategyConfig + DeserializeOwned,
{
    let config: C =
        serde_json::from_value(config).map_err(|e| StrategyError::InvalidConfig(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_list() {
        let registry = StrategyRegistry::new();
        let strategies = registry.list();

        assert_eq!(strategies.len(), 7);
        assert_eq!(strategies[0].key, "aroon");
    }

    #[test]
    fn test_registry_get() {
        let registry = StrategyRegistry::new();

        assert!(registry.get("ma_crossover").is_some());
        assert!(registry.exists("rsi"));
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn test_create_default() {
        let registry = StrategyRegistry::new();

        let strategy = registry.create_default("ma_crossover");
        assert!(strategy.is_ok());

        let strategy = strategy.unwrap();
        assert_eq!(strategy.name(), "EMA Crossover (12/26)");
    }

    #[test]
    fn test_create_with_config() {
        let registry = StrategyRegistry::new();

        let config = serde_json::json!({
            "fast_period": 5,
            "slow_period": 10,
            "use_ema": false
        });

        let strategy = registry.create("ma_crossover", config).unwrap();
        assert_eq!(strategy.name(), "SMA Crossover (5/10)");
    }

    #[test]
    fn test_create_with_invalid_config() {
        let registry = StrategyRegistry::new();

        let config = serde_json::json!({
            "fast_period": 10,
            "slow_period": 5,
            "use_ema": false
        });
        assert!(matches!(
            registry.create("ma_crossover", config),
            Err(StrategyError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_create_unknown_strategy() {
        let registry = StrategyRegistry::new();

        let result = registry.create_default("unknown");
        assert!(matches!(result, Err(StrategyError::NotFound(_))));
    }

    #[test]
    fn test_all_and_resolve() {
        let registry = StrategyRegistry::new();
        assert_eq!(registry.all().len(), 7);

        let resolved = registry
            .resolve(&["buy_and_hold".to_string(), "majority".to_string()])
            .unwrap();
        assert_eq!(resolved[0].name(), "Buy and Hold");
        assert_eq!(resolved[1].name(), "Majority");

        assert!(registry.resolve(&["nope".to_string()]).is_err());
    }
}
