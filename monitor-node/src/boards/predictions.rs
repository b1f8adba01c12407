use chrono::{DateTime, Utc};
use serde::Serialize;
use stocksight_common::{
    DemandForecast, ForecastHorizon, ForecastPoint, Prediction, RiskLevel, Settings, TrendDirection,
};
use tracing::debug;

use crate::classify::{classify_risk, risk_icon, Badge, BadgeVariant, Icon, RiskThresholds};
use crate::filter::{distinct_categories, PredictionFilter};
use crate::seed;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PredictionRow<'a> {
    pub prediction: &'a Prediction,
    pub risk: RiskLevel,
    pub badge: BadgeVariant,
    pub icon: Icon,
}

#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq)]
pub struct PredictionSummary {
    pub total: usize,
    pub critical: usize,
    /// Mean days until stock-out, `None` when there are no predictions.
    pub average_days_until_stock_out: Option<f64>,
}

/// One category's demand outlook with its derived change.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DemandRow<'a> {
    pub forecast: &'a DemandForecast,
    pub growth_percent: Option<f64>,
    pub trend: TrendDirection,
}

pub struct PredictionBoard {
    predictions: Vec<Prediction>,
    thresholds: RiskThresholds,
    forecast: Vec<ForecastPoint>,
    demand: Vec<DemandForecast>,
    horizon: ForecastHorizon,
}

impl PredictionBoard {
    pub fn new(predictions: Vec<Prediction>, thresholds: RiskThresholds) -> Self {
        Self {
            predictions,
            thresholds,
            forecast: Vec::new(),
            demand: Vec::new(),
            horizon: ForecastHorizon::default(),
        }
    }

    pub fn with_forecast(mut self, forecast: Vec<ForecastPoint>, demand: Vec<DemandForecast>) -> Self {
        self.forecast = forecast;
        self.demand = demand;
        self
    }

    pub fn seeded(now: DateTime<Utc>, settings: &Settings) -> Self {
        Self::new(seed::predictions(now), RiskThresholds::from_settings(settings))
            .with_forecast(seed::stock_forecast(), seed::demand_forecast())
    }

    pub fn horizon(&self) -> ForecastHorizon {
        self.horizon
    }

    pub fn set_horizon(&mut self, horizon: ForecastHorizon) {
        debug!(days = horizon.days(), "Forecast horizon selected");
        self.horizon = horizon;
    }

    /// Forecast points within the selected horizon, nearest first.
    pub fn forecast(&self) -> Vec<&ForecastPoint> {
        let days = self.horizon.days();
        let mut points: Vec<_> = self.forecast.iter().filter(|p| p.days_ahead <= days).collect();
        points.sort_by_key(|p| p.days_ahead);
        points
    }

    pub fn demand(&self) -> Vec<DemandRow<'_>> {
        self.demand
            .iter()
            .map(|forecast| DemandRow {
                forecast,
                growth_percent: forecast.growth_percent(),
                trend: forecast.trend(),
            })
            .collect()
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.thresholds = RiskThresholds::from_settings(settings);
    }

    pub fn risk_of(&self, prediction: &Prediction) -> RiskLevel {
        classify_risk(prediction.days_until_stock_out, self.thresholds)
    }

    /// Matching predictions, soonest stock-out first.
    pub fn filter(&self, filter: &PredictionFilter) -> Vec<PredictionRow<'_>> {
        filter
            .apply(&self.predictions)
            .into_iter()
            .map(|prediction| {
                let risk = self.risk_of(prediction);
                PredictionRow {
                    prediction,
                    risk,
                    badge: risk.badge(),
                    icon: risk_icon(risk),
                }
            })
            .collect()
    }

    pub fn categories(&self) -> Vec<&str> {
        distinct_categories(&self.predictions, |p| p.category.as_str())
    }

    pub fn summary(&self) -> PredictionSummary {
        let total = self.predictions.len();
        let critical = self
            .predictions
            .iter()
            .filter(|p| self.risk_of(p) == RiskLevel::Critical)
            .count();
        let average_days_until_stock_out = (total > 0).then(|| {
            let days: u64 = self.predictions.iter().map(|p| p.days_until_stock_out as u64).sum();
            days as f64 / total as f64
        });

        PredictionSummary {
            total,
            critical,
            average_days_until_stock_out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> PredictionBoard {
        PredictionBoard::seeded(Utc::now(), &Settings::default())
    }

    #[test]
    fn seed_risks_are_derived_from_days() {
        let board = board();
        let risks: Vec<_> = board
            .filter(&PredictionFilter::default())
            .iter()
            .map(|r| (r.prediction.id.clone(), r.risk))
            .collect();
        assert_eq!(
            risks,
            vec![
                ("PRED002".to_string(), RiskLevel::Critical),
                ("PRED003".to_string(), RiskLevel::High),
                ("PRED001".to_string(), RiskLevel::Medium),
                ("PRED004".to_string(), RiskLevel::Low),
            ]
        );
    }

    #[test]
    fn summary() {
        let summary = board().summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.average_days_until_stock_out, Some(16.75));
    }

    #[test]
    fn empty_board_has_no_average() {
        let board = PredictionBoard::new(Vec::new(), RiskThresholds::default());
        assert_eq!(board.summary().average_days_until_stock_out, None);
    }

    #[test]
    fn categories() {
        assert_eq!(board().categories(), vec!["Electronics", "Clothing", "Books"]);
    }

    #[test]
    fn forecast_follows_the_horizon() {
        let mut board = board();
        assert_eq!(board.horizon(), ForecastHorizon::Month);
        let labels: Vec<_> = board.forecast().iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec!["Today", "+3d", "+7d", "+14d", "+21d", "+30d"]);

        board.set_horizon(ForecastHorizon::Week);
        assert_eq!(board.forecast().len(), 3);

        board.set_horizon(ForecastHorizon::Quarter);
        assert_eq!(board.forecast().len(), 6);
    }

    #[test]
    fn forecast_bands_contain_the_prediction() {
        let board = board();
        let points = board.forecast();
        assert_eq!(points[0].actual, Some(847));
        assert!(points[1..].iter().all(|p| p.actual.is_none()));
        for point in points {
            assert!(point.lower <= point.predicted && point.predicted <= point.upper);
        }
    }

    #[test]
    fn demand_growth_per_category() {
        let board = board();
        let demand = board.demand();
        let trends: Vec<_> = demand.iter().map(|d| (d.forecast.category.as_str(), d.trend)).collect();
        assert_eq!(
            trends,
            vec![
                ("Electronics", TrendDirection::Down),
                ("Clothing", TrendDirection::Up),
                ("Books", TrendDirection::Up),
                ("Home & Garden", TrendDirection::Up),
            ]
        );

        let growth = demand[0].growth_percent.unwrap();
        assert!((growth - -8.974).abs() < 0.01);
        let growth = demand[3].growth_percent.unwrap();
        assert!((growth - 15.556).abs() < 0.01);
    }

    #[test]
    fn bare_board_has_no_forecast() {
        let board = PredictionBoard::new(Vec::new(), RiskThresholds::default());
        assert!(board.forecast().is_empty());
        assert!(board.demand().is_empty());
    }
}
