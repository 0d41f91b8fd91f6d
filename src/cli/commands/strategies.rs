//! List strategies command.

use anyhow::Result;
use flowta_backtest::ReportRegistry;
use flowta_strategies::StrategyRegistry;

pub async fn run() -> Result<()> {
    let registry = StrategyRegistry::new();

    println!("Available Strategies");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    for info in registry.list() {
        let name = registry
            .create_default(&info.key)
            .map(|strategy| strategy.name().to_string())
            .unwrap_or_default();

        println!("  {} ({})", info.key, name);
        println!("  ───────────────────────────────────────────────────────");
        println!("  {}", info.description);
        println!("  Defaults: {}", info.default_config);
        println!();
    }

    println!("Use --strategies <key,...> to select strategies.");

    let reports = ReportRegistry::new();
    let names: Vec<&str> = reports.names().into_iter().map(String::as_str).collect();
    println!("Reports: {}", names.join(", "));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_lists_strategies_and_reports() {
        assert!(run().await.is_ok());
    }
}
