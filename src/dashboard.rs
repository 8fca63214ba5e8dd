use analytics::{AnalyticsEngine, PerformanceSummary};
use api_client::schema::{allocation_records, asset_listing, asset_performance, history_records};
use api_client::{ApiError, DataProvider, SheetRef, Table};
use configuration::Config;
use core_types::{AllocationSummary, AssetListing, AssetPerformance, TimeSeriesPoint};
use serde::Serialize;
use std::sync::Arc;

/// The three tabs as fetched. Each one succeeds or fails on its own.
pub struct Tabs {
    pub history: Result<Arc<Table>, ApiError>,
    pub allocation: Result<Arc<Table>, ApiError>,
    pub returns: Result<Arc<Table>, ApiError>,
}

/// Fetches the three tabs concurrently.
pub async fn fetch_tabs<P: DataProvider>(provider: &P, config: &Config) -> Tabs {
    let id = &config.source.spreadsheet_id;
    let header_row = config.source.header_row;
    let history = SheetRef::new("history", id, &config.sheets.history.gid, header_row);
    let allocation = SheetRef::new("allocation", id, &config.sheets.allocation.gid, header_row);
    let returns = SheetRef::new("returns", id, &config.sheets.returns.gid, header_row);

    let (history, allocation, returns) = futures::join!(
        provider.fetch(&history),
        provider.fetch(&allocation),
        provider.fetch(&returns)
    );

    Tabs {
        history,
        allocation,
        returns,
    }
}

/// Everything the report shows. A section that could not be built is `None`
/// and has an entry in `warnings`.
#[derive(Debug, Default, Serialize)]
pub struct Dashboard {
    pub performance: Option<PerformanceSummary>,
    pub series: Vec<TimeSeriesPoint>,
    pub allocation: Option<AllocationSummary>,
    pub assets: Option<Vec<AssetListing>>,
    pub asset_returns: Option<Vec<AssetPerformance>>,
    pub warnings: Vec<String>,
}

impl Dashboard {
    pub fn assemble(tabs: &Tabs, config: &Config, engine: &AnalyticsEngine) -> Self {
        let mut dashboard = Dashboard::default();
        dashboard.add_performance(&tabs.history, config, engine);
        dashboard.add_allocation(&tabs.allocation, config, engine);
        dashboard.add_asset_returns(&tabs.returns, config);
        dashboard
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }

    fn add_performance(
        &mut self,
        tab: &Result<Arc<Table>, ApiError>,
        config: &Config,
        engine: &AnalyticsEngine,
    ) {
        let records = match tab {
            Ok(table) => history_records(table, &config.sheets.history),
            Err(e) => return self.warn(format!("Could not read the history tab: {}", e)),
        };
        let records = match records {
            Ok(records) => records,
            Err(e) => return self.warn(format!("History tab is not in the expected layout: {}", e)),
        };

        let (series, summary) = engine.summarize(&records);
        match summary {
            None => self.warn("History tab has no rows with a readable date.".to_string()),
            Some(summary) if summary.observations < 2 => {
                self.warn("History has a single point; returns are shown as zero.".to_string());
                self.performance = Some(summary);
            }
            Some(summary) => self.performance = Some(summary),
        }
        self.series = series.into_points();
    }

    fn add_allocation(
        &mut self,
        tab: &Result<Arc<Table>, ApiError>,
        config: &Config,
        engine: &AnalyticsEngine,
    ) {
        let table = match tab {
            Ok(table) => table,
            Err(e) => return self.warn(format!("Could not read the allocation tab: {}", e)),
        };
        let layout = &config.sheets.allocation;

        match allocation_records(table, layout) {
            Ok(records) => {
                let summary = engine.aggregate(&records);
                if summary.is_empty() {
                    self.warn("Allocation tab has no categorised rows.".to_string());
                } else {
                    self.allocation = Some(summary);
                }
            }
            Err(e) => self.warn(format!("Allocation by category is unavailable: {}", e)),
        }

        match asset_listing(table, layout) {
            Ok(assets) => self.assets = Some(assets),
            Err(e) => self.warn(format!("Asset listing is unavailable: {}", e)),
        }
    }

    fn add_asset_returns(&mut self, tab: &Result<Arc<Table>, ApiError>, config: &Config) {
        let table = match tab {
            Ok(table) => table,
            Err(e) => return self.warn(format!("Could not read the returns tab: {}", e)),
        };

        match asset_performance(table, &config.sheets.returns) {
            Ok(rows) => self.asset_returns = Some(rows),
            Err(e) => self.warn(format!("Asset returns are unavailable: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> Config {
        configuration::load_config_from_str("[source]\nspreadsheet_id = \"test\"\n").unwrap()
    }

    fn table(csv: &str) -> Result<Arc<Table>, ApiError> {
        Ok(Arc::new(Table::from_csv(csv, 0).unwrap()))
    }

    const HISTORY: &str = "\
Data,Cota,,PL,Bench
30/11/2023,100,,\"R$ 1.000,00\",1
15/12/2023,110,,\"R$ 1.100,00\",1
02/01/2024,120,,\"R$ 1.200,00\",1
";

    const ALLOCATION: &str = "\
Ativo,Descrição,Posição,% PL,,,Classe,% PL
A,Ativo A,\"R$ 100,00\",\"10%\",,,Equity,\"10%\"
B,Ativo B,\"R$ 50,00\",\"5%\",,,Bond,\"5%\"
C,Ativo C,\"R$ 150,00\",\"15%\",,,Equity,\"15%\"
";

    const RETURNS: &str = "Ativo,Mês,Ano,12m\nA,\"1%\",\"2%\",\"3%\"\n";

    #[test]
    fn assembles_every_section() {
        let tabs = Tabs {
            history: table(HISTORY),
            allocation: table(ALLOCATION),
            returns: table(RETURNS),
        };

        let dashboard = Dashboard::assemble(&tabs, &config(), &AnalyticsEngine::default());

        assert_eq!(dashboard.warnings, Vec::<String>::new());
        let performance = dashboard.performance.unwrap();
        assert!((performance.returns.month_to_date - (120.0 / 110.0 - 1.0)).abs() < 1e-12);
        assert_eq!(performance.latest_aum, 1200.0);
        assert_eq!(dashboard.series.len(), 3);

        let allocation = dashboard.allocation.unwrap();
        assert!((allocation.get("Equity").unwrap() - 0.25).abs() < 1e-12);
        assert!((allocation.get("Bond").unwrap() - 0.05).abs() < 1e-12);
        assert_eq!(dashboard.assets.unwrap().len(), 3);
        assert_eq!(dashboard.asset_returns.unwrap()[0].year_to_date, "2%");
    }

    #[test]
    fn a_failed_tab_only_skips_its_own_section() {
        let tabs = Tabs {
            history: Err(ApiError::Status {
                status: 500,
                url: "history".to_string(),
            }),
            allocation: table("Ativo,Descrição,Posição,% PL\nA,x,1,2\n"),
            returns: table(RETURNS),
        };

        let dashboard = Dashboard::assemble(&tabs, &config(), &AnalyticsEngine::default());

        assert!(dashboard.performance.is_none());
        assert!(dashboard.series.is_empty());
        // The allocation tab is too narrow for the category block but still has the listing.
        assert!(dashboard.allocation.is_none());
        assert_eq!(dashboard.assets.as_ref().map(Vec::len), Some(1));
        assert!(dashboard.asset_returns.is_some());
        assert_eq!(dashboard.warnings.len(), 2);
        assert!(dashboard.warnings[0].contains("history"));
    }

    #[test]
    fn single_point_history_warns_and_reports_zero_returns() {
        let tabs = Tabs {
            history: table("Data,Cota,,PL,Bench\n02/01/2024,120,,1,1\n"),
            allocation: table(ALLOCATION),
            returns: table(RETURNS),
        };

        let dashboard = Dashboard::assemble(&tabs, &config(), &AnalyticsEngine::default());

        let performance = dashboard.performance.unwrap();
        assert_eq!(performance.returns, core_types::ReturnSet::default());
        assert_eq!(dashboard.warnings.len(), 1);
    }

    #[test]
    fn missing_nav_marker_does_not_turn_dot_decimals_into_thousands() {
        let history = "\
Data,Cota,,PL,Bench
30/11/2023,1.08,,1,1
10/12/2023,#N/A,,1,1
29/12/2023,1.1,,1,1
02/01/2024,1.2,,1,1
";
        let tabs = Tabs {
            history: table(history),
            allocation: table(ALLOCATION),
            returns: table(RETURNS),
        };

        let dashboard = Dashboard::assemble(&tabs, &config(), &AnalyticsEngine::default());

        let navs: Vec<f64> = dashboard.series.iter().map(|p| p.nav).collect();
        assert_eq!(navs, vec![1.08, 0.0, 1.1, 1.2]);
        let performance = dashboard.performance.unwrap();
        assert!((performance.returns.month_to_date - (1.2 / 1.1 - 1.0)).abs() < 1e-12);
        assert_eq!(performance.latest_nav, 1.2);
    }
}
