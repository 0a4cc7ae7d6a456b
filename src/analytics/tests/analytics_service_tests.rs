// Tests for the analytics engine against in-memory repositories

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use crate::analytics::{
    AnalyticsConfig, PortfolioAnalyticsService, PortfolioAnalyticsServiceTrait, TradeAction,
};
use crate::assets::{AssetRepositoryTrait, InMemoryAssetRepository, NewAsset, PricePoint};
use crate::portfolio::{
    InMemoryPortfolioRepository, Portfolio, PortfolioService, Position,
};

fn analytics_with_config(
    assets: &Arc<InMemoryAssetRepository>,
    config: AnalyticsConfig,
) -> PortfolioAnalyticsService {
    let portfolio_service = Arc::new(PortfolioService::new(
        Arc::new(InMemoryPortfolioRepository::new()),
        assets.clone(),
    ));
    PortfolioAnalyticsService::new(portfolio_service, assets.clone(), config)
}

fn analytics(assets: &Arc<InMemoryAssetRepository>) -> PortfolioAnalyticsService {
    analytics_with_config(assets, AnalyticsConfig::default())
}

async fn add_asset(
    repository: &InMemoryAssetRepository,
    symbol: &str,
    sector: &str,
    price: Decimal,
) {
    repository
        .insert(NewAsset {
            symbol: symbol.to_string(),
            name: format!("{} S.A.", symbol),
            asset_type: "Stock".to_string(),
            sector: sector.to_string(),
            current_price: price,
        })
        .await
        .unwrap();
}

async fn add_history(repository: &InMemoryAssetRepository, symbol: &str, prices: &[(u32, i64)]) {
    let series = prices
        .iter()
        .map(|&(day, price)| PricePoint {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            price: Decimal::from(price),
        })
        .collect();
    repository.save_price_history(symbol, series).await.unwrap();
}

fn position(symbol: &str, quantity: i64, target_allocation: Decimal) -> Position {
    Position {
        id: format!("pos-{}", symbol),
        portfolio_id: "pf-1".to_string(),
        asset_symbol: symbol.to_string(),
        quantity,
        average_price: dec!(10),
        target_allocation,
        last_transaction: Utc::now(),
    }
}

fn portfolio_with(
    total_investment: Decimal,
    age_days: i64,
    positions: Vec<Position>,
) -> Portfolio {
    Portfolio {
        id: "pf-1".to_string(),
        name: "Test Portfolio".to_string(),
        user_id: "user-1".to_string(),
        total_investment,
        created_at: Utc::now() - Duration::days(age_days),
        positions,
    }
}

// ---------------------------------------------------------------------------
// Performance
// ---------------------------------------------------------------------------

#[tokio::test]
async fn performance_computes_total_and_annualized_return() {
    let assets = Arc::new(InMemoryAssetRepository::new());
    add_asset(&assets, "WEGE3", "Industrials", dec!(42.85)).await;
    add_asset(&assets, "TOTS3", "Technology", dec!(29.40)).await;
    let service = analytics(&assets);

    let portfolio = portfolio_with(
        dec!(30000),
        365,
        vec![
            position("WEGE3", 500, dec!(0.7)),
            position("TOTS3", 300, dec!(0.3)),
        ],
    );

    let result = service.performance(&portfolio).unwrap();
    assert_eq!(result.portfolio, "Test Portfolio");
    assert_eq!(result.total_investment, dec!(30000));
    assert_eq!(result.current_value, dec!(30245.00));
    assert_eq!(result.total_return_percent, dec!(0.82));
    // Over exactly one year the annualized return matches the total return
    assert!((result.annualized_return_percent - result.total_return_percent).abs() <= dec!(0.01));
}

#[tokio::test]
async fn performance_is_zero_for_non_positive_investment() {
    let assets = Arc::new(InMemoryAssetRepository::new());
    add_asset(&assets, "WEGE3", "Industrials", dec!(42.85)).await;
    let service = analytics(&assets);

    let portfolio = portfolio_with(Decimal::ZERO, 365, vec![position("WEGE3", 10, dec!(1))]);

    let result = service.performance(&portfolio).unwrap();
    assert_eq!(result.total_return_percent, Decimal::ZERO);
    assert_eq!(result.annualized_return_percent, Decimal::ZERO);
}

#[tokio::test]
async fn annualized_return_is_zero_for_brand_new_portfolio() {
    let assets = Arc::new(InMemoryAssetRepository::new());
    add_asset(&assets, "WEGE3", "Industrials", dec!(42.85)).await;
    let service = analytics(&assets);

    // Created "now": no elapsed holding period to annualize over
    let portfolio = portfolio_with(dec!(100), 0, vec![position("WEGE3", 10, dec!(1))]);

    let result = service.performance(&portfolio).unwrap();
    assert!(result.total_return_percent > Decimal::ZERO);
    assert_eq!(result.annualized_return_percent, Decimal::ZERO);
}

// ---------------------------------------------------------------------------
// Risk analysis
// ---------------------------------------------------------------------------

#[tokio::test]
async fn risk_analysis_reports_dispersion_sharpe_and_concentration() {
    let assets = Arc::new(InMemoryAssetRepository::new());
    add_asset(&assets, "VALE3", "Materials", dec!(100)).await;
    add_asset(&assets, "ITUB4", "Financials", dec!(100)).await;
    let service = analytics(&assets);

    // 64000 + 16000 = 80000 current value, ~8% return against a 12% benchmark
    let portfolio = portfolio_with(
        dec!(74074.07),
        365,
        vec![
            position("VALE3", 640, dec!(0.8)),
            position("ITUB4", 160, dec!(0.2)),
        ],
    );

    let result = service.risk_analysis(&portfolio).unwrap();
    // Position values 64000/16000: mean 40000, population sd 24000, CV 0.6
    assert_eq!(result.volatility_percent, dec!(60.00));
    // Return below the risk-free benchmark gives a negative Sharpe ratio
    assert_eq!(result.sharpe_ratio, dec!(-0.067));
    assert_eq!(result.largest_asset_concentration_percent, dec!(80.00));
}

#[tokio::test]
async fn concentration_is_full_for_a_single_resolvable_position() {
    let assets = Arc::new(InMemoryAssetRepository::new());
    add_asset(&assets, "PETR4", "Energy", dec!(28.50)).await;
    let service = analytics(&assets);

    let portfolio = portfolio_with(dec!(1000), 30, vec![position("PETR4", 100, dec!(1))]);

    let result = service.risk_analysis(&portfolio).unwrap();
    assert_eq!(result.largest_asset_concentration_percent, dec!(100.00));
    // A single position has no size dispersion
    assert_eq!(result.volatility_percent, Decimal::ZERO);
    assert_eq!(result.sharpe_ratio, Decimal::ZERO);
}

#[tokio::test]
async fn risk_analysis_skips_unresolvable_positions() {
    let assets = Arc::new(InMemoryAssetRepository::new());
    add_asset(&assets, "VALE3", "Materials", dec!(50)).await;
    let service = analytics(&assets);

    let portfolio = portfolio_with(
        dec!(1000),
        30,
        vec![
            position("VALE3", 20, dec!(0.5)),
            position("GHOST", 999, dec!(0.5)),
        ],
    );

    let result = service.risk_analysis(&portfolio).unwrap();
    // The unresolvable position is excluded, not zero-filled
    assert_eq!(result.volatility_percent, Decimal::ZERO);
    assert_eq!(result.largest_asset_concentration_percent, dec!(100.00));
}

#[tokio::test]
async fn risk_analysis_is_all_zero_without_positions() {
    let assets = Arc::new(InMemoryAssetRepository::new());
    let service = analytics(&assets);

    let portfolio = portfolio_with(dec!(1000), 30, Vec::new());

    let result = service.risk_analysis(&portfolio).unwrap();
    assert_eq!(result.volatility_percent, Decimal::ZERO);
    assert_eq!(result.sharpe_ratio, Decimal::ZERO);
    assert_eq!(result.largest_asset_concentration_percent, Decimal::ZERO);
}

// ---------------------------------------------------------------------------
// Rebalancing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rebalancing_suggests_sell_and_buy_net_of_costs() {
    let assets = Arc::new(InMemoryAssetRepository::new());
    add_asset(&assets, "VALE3", "Materials", dec!(10)).await;
    add_asset(&assets, "ITUB4", "Financials", dec!(10)).await;
    let service = analytics(&assets);

    // Weights 0.6/0.4 against 0.5/0.5 targets on a 10000 portfolio
    let portfolio = portfolio_with(
        dec!(10000),
        30,
        vec![
            position("VALE3", 600, dec!(0.5)),
            position("ITUB4", 400, dec!(0.5)),
        ],
    );

    let result = service.rebalancing(&portfolio).unwrap();
    assert!(!result.is_balanced);
    assert_eq!(result.total_value, dec!(10000.00));
    assert_eq!(result.suggested_actions.len(), 2);

    // Suggestions keep position iteration order
    let sell = &result.suggested_actions[0];
    assert_eq!(sell.asset, "VALE3");
    assert_eq!(sell.action, TradeAction::Sell);
    assert_eq!(sell.value, dec!(997.00));
    assert_eq!(sell.transaction_cost, dec!(3.00));

    let buy = &result.suggested_actions[1];
    assert_eq!(buy.asset, "ITUB4");
    assert_eq!(buy.action, TradeAction::Buy);
    assert_eq!(buy.value, dec!(997.00));
    assert_eq!(buy.transaction_cost, dec!(3.00));
}

#[tokio::test]
async fn rebalancing_ignores_deviations_inside_the_tolerance_band() {
    let assets = Arc::new(InMemoryAssetRepository::new());
    add_asset(&assets, "VALE3", "Materials", dec!(10)).await;
    add_asset(&assets, "ITUB4", "Financials", dec!(10)).await;
    let service = analytics(&assets);

    // Weights 0.6/0.4; targets only 0.5 point off
    let portfolio = portfolio_with(
        dec!(10000),
        30,
        vec![
            position("VALE3", 600, dec!(0.595)),
            position("ITUB4", 400, dec!(0.405)),
        ],
    );

    let result = service.rebalancing(&portfolio).unwrap();
    assert!(result.is_balanced);
    assert!(result.suggested_actions.is_empty());
}

#[tokio::test]
async fn rebalancing_skips_notionals_below_the_minimum_transaction_size() {
    let assets = Arc::new(InMemoryAssetRepository::new());
    add_asset(&assets, "VALE3", "Materials", dec!(10)).await;
    add_asset(&assets, "ITUB4", "Financials", dec!(10)).await;
    let service = analytics(&assets);

    // Same 0.1 weight deviation, but on a 100-unit portfolio the notional is 10
    let portfolio = portfolio_with(
        dec!(100),
        30,
        vec![
            position("VALE3", 6, dec!(0.5)),
            position("ITUB4", 4, dec!(0.5)),
        ],
    );

    let result = service.rebalancing(&portfolio).unwrap();
    assert!(result.is_balanced);
}

#[tokio::test]
async fn rebalancing_thresholds_come_from_the_injected_config() {
    let assets = Arc::new(InMemoryAssetRepository::new());
    add_asset(&assets, "VALE3", "Materials", dec!(10)).await;
    add_asset(&assets, "ITUB4", "Financials", dec!(10)).await;
    let service = analytics_with_config(
        &assets,
        AnalyticsConfig {
            min_transaction_value: dec!(5),
            transaction_cost_rate: dec!(0.01),
            ..AnalyticsConfig::default()
        },
    );

    let portfolio = portfolio_with(
        dec!(100),
        30,
        vec![
            position("VALE3", 6, dec!(0.5)),
            position("ITUB4", 4, dec!(0.5)),
        ],
    );

    let result = service.rebalancing(&portfolio).unwrap();
    assert!(!result.is_balanced);
    assert_eq!(result.suggested_actions[0].value, dec!(9.90));
    assert_eq!(result.suggested_actions[0].transaction_cost, dec!(0.10));
}

#[tokio::test]
async fn empty_portfolio_is_balanced_and_worth_nothing() {
    let assets = Arc::new(InMemoryAssetRepository::new());
    let service = analytics(&assets);

    let portfolio = portfolio_with(dec!(1000), 30, Vec::new());

    let result = service.rebalancing(&portfolio).unwrap();
    assert_eq!(result.total_value, Decimal::ZERO);
    assert!(result.is_balanced);
    assert!(result.suggested_actions.is_empty());
}

// ---------------------------------------------------------------------------
// Diversification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn diversification_groups_by_sector_heaviest_first() {
    let assets = Arc::new(InMemoryAssetRepository::new());
    add_asset(&assets, "VALE3", "Materials", dec!(10)).await;
    add_asset(&assets, "WEGE3", "Industrials", dec!(10)).await;
    add_asset(&assets, "ITUB4", "Financials", dec!(10)).await;
    let service = analytics(&assets);

    let portfolio = portfolio_with(
        dec!(10000),
        30,
        vec![
            position("ITUB4", 100, dec!(0.1)),
            position("VALE3", 600, dec!(0.6)),
            position("WEGE3", 300, dec!(0.3)),
        ],
    );

    let result = service.diversification(&portfolio).unwrap();
    assert_eq!(result.total_value, dec!(10000.00));

    let sectors: Vec<(&str, Decimal)> = result
        .sectors
        .iter()
        .map(|s| (s.sector.as_str(), s.percent))
        .collect();
    assert_eq!(
        sectors,
        vec![
            ("Materials", dec!(60.00)),
            ("Industrials", dec!(30.00)),
            ("Financials", dec!(10.00)),
        ]
    );

    // Fully resolvable portfolio: percentages account for the whole value
    let percent_sum: Decimal = result.sectors.iter().map(|s| s.percent).sum();
    assert_eq!(percent_sum, dec!(100.00));
}

#[tokio::test]
async fn unresolvable_positions_fall_into_the_unknown_sector() {
    let assets = Arc::new(InMemoryAssetRepository::new());
    add_asset(&assets, "VALE3", "Materials", dec!(10)).await;
    let service = analytics(&assets);

    let portfolio = portfolio_with(
        dec!(1000),
        30,
        vec![
            position("VALE3", 100, dec!(0.5)),
            position("GHOST", 50, dec!(0.5)),
        ],
    );

    let result = service.diversification(&portfolio).unwrap();
    assert_eq!(result.sectors.len(), 2);
    assert_eq!(result.sectors[0].sector, "Materials");
    assert_eq!(result.sectors[0].percent, dec!(100.00));
    assert_eq!(result.sectors[1].sector, "Unknown");
    assert_eq!(result.sectors[1].value, Decimal::ZERO);
}

#[tokio::test]
async fn equally_weighted_sectors_are_ordered_by_name() {
    let assets = Arc::new(InMemoryAssetRepository::new());
    add_asset(&assets, "BBB1", "Utilities", dec!(10)).await;
    add_asset(&assets, "AAA1", "Energy", dec!(10)).await;
    let service = analytics(&assets);

    let portfolio = portfolio_with(
        dec!(2000),
        30,
        vec![
            position("BBB1", 100, dec!(0.5)),
            position("AAA1", 100, dec!(0.5)),
        ],
    );

    let result = service.diversification(&portfolio).unwrap();
    assert_eq!(result.sectors[0].sector, "Energy");
    assert_eq!(result.sectors[1].sector, "Utilities");
}

#[tokio::test]
async fn diversification_of_empty_portfolio_has_no_sectors() {
    let assets = Arc::new(InMemoryAssetRepository::new());
    let service = analytics(&assets);

    let portfolio = portfolio_with(dec!(1000), 30, Vec::new());

    let result = service.diversification(&portfolio).unwrap();
    assert!(result.sectors.is_empty());
    assert_eq!(result.total_value, Decimal::ZERO);
}

// ---------------------------------------------------------------------------
// Correlations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn correlations_cover_each_distinct_pair_once() {
    let assets = Arc::new(InMemoryAssetRepository::new());
    add_asset(&assets, "VALE3", "Materials", dec!(10)).await;
    add_asset(&assets, "ITUB4", "Financials", dec!(20)).await;
    add_history(&assets, "VALE3", &[(1, 10), (2, 11), (3, 12)]).await;
    add_history(&assets, "ITUB4", &[(1, 20), (2, 22), (3, 24)]).await;
    let service = analytics(&assets);

    // The duplicate VALE3 position must not produce a self- or repeated pair
    let portfolio = portfolio_with(
        dec!(1000),
        30,
        vec![
            position("VALE3", 10, dec!(0.4)),
            position("ITUB4", 10, dec!(0.4)),
            position("VALE3", 5, dec!(0.2)),
        ],
    );

    let result = service.correlations(&portfolio).unwrap();
    assert_eq!(result.correlations.len(), 1);
    let pair = &result.correlations[0];
    assert_eq!(pair.asset_a, "VALE3");
    assert_eq!(pair.asset_b, "ITUB4");
    assert_eq!(pair.correlation_coefficient, dec!(1.000));
}

#[tokio::test]
async fn inversely_moving_series_report_negative_correlation() {
    let assets = Arc::new(InMemoryAssetRepository::new());
    add_asset(&assets, "VALE3", "Materials", dec!(10)).await;
    add_asset(&assets, "ITUB4", "Financials", dec!(20)).await;
    add_history(&assets, "VALE3", &[(1, 10), (2, 11), (3, 12)]).await;
    add_history(&assets, "ITUB4", &[(1, 24), (2, 22), (3, 20)]).await;
    let service = analytics(&assets);

    let portfolio = portfolio_with(
        dec!(1000),
        30,
        vec![
            position("VALE3", 10, dec!(0.5)),
            position("ITUB4", 10, dec!(0.5)),
        ],
    );

    let result = service.correlations(&portfolio).unwrap();
    assert_eq!(result.correlations[0].correlation_coefficient, dec!(-1.000));
}

#[tokio::test]
async fn pairs_without_enough_joint_observations_are_omitted() {
    let assets = Arc::new(InMemoryAssetRepository::new());
    add_asset(&assets, "VALE3", "Materials", dec!(10)).await;
    add_asset(&assets, "ITUB4", "Financials", dec!(20)).await;
    add_asset(&assets, "PETR4", "Energy", dec!(30)).await;
    add_history(&assets, "VALE3", &[(1, 10), (2, 11), (3, 12)]).await;
    add_history(&assets, "ITUB4", &[(1, 20), (2, 22), (3, 24)]).await;
    // Only two dates overlap with the others; PETR4 pairs are dropped
    add_history(&assets, "PETR4", &[(1, 30), (2, 31)]).await;
    let service = analytics(&assets);

    let portfolio = portfolio_with(
        dec!(1000),
        30,
        vec![
            position("VALE3", 10, dec!(0.3)),
            position("ITUB4", 10, dec!(0.3)),
            position("PETR4", 10, dec!(0.4)),
        ],
    );

    let result = service.correlations(&portfolio).unwrap();
    assert_eq!(result.correlations.len(), 1);
    assert_eq!(result.correlations[0].asset_a, "VALE3");
    assert_eq!(result.correlations[0].asset_b, "ITUB4");
}

#[tokio::test]
async fn pairs_with_missing_history_are_omitted() {
    let assets = Arc::new(InMemoryAssetRepository::new());
    add_asset(&assets, "VALE3", "Materials", dec!(10)).await;
    add_asset(&assets, "ITUB4", "Financials", dec!(20)).await;
    add_history(&assets, "VALE3", &[(1, 10), (2, 11), (3, 12)]).await;
    let service = analytics(&assets);

    let portfolio = portfolio_with(
        dec!(1000),
        30,
        vec![
            position("VALE3", 10, dec!(0.5)),
            position("ITUB4", 10, dec!(0.5)),
        ],
    );

    let result = service.correlations(&portfolio).unwrap();
    assert!(result.correlations.is_empty());
}
