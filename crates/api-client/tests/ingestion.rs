//! Ingestion through the `DataProvider` seam, using canned CSV exports in
//! place of the live spreadsheet.

use api_client::schema::{allocation_records, asset_performance, history_records};
use api_client::{ApiError, CachedProvider, DataProvider, FreshnessPolicy, SheetRef, Table};
use async_trait::async_trait;
use configuration::Sheets;
use core_types::RawCell;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const HISTORY_CSV: &str = "\
Data,Cota,Variação,Patrimônio,SOFR + 3%
30/11/2023,\"1,0800\",,\"R$ 10.800.000,00\",\"1,0420\"
15/12/2023,\"1,1000\",,\"R$ 11.000.000,00\",\"1,0500\"
02/01/2024,\"1,2000\",,\"R$ 12.000.000,00\",\"1,0600\"
";

const RETURNS_CSV: &str = "\
Ativo,Retorno Mês,Retorno Ano,Retorno 12m
PETR4,\"1,2%\",\"8,4%\",\"15,0%\"
,,,
";

/// Serves CSV fixtures keyed by gid.
struct FixtureProvider {
    exports: HashMap<&'static str, &'static str>,
    calls: AtomicUsize,
}

#[async_trait]
impl DataProvider for FixtureProvider {
    async fn fetch(&self, sheet: &SheetRef) -> Result<Arc<Table>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let csv = self.exports.get(sheet.gid.as_str()).copied().ok_or(ApiError::Status {
            status: 404,
            url: sheet.gid.clone(),
        })?;
        Ok(Arc::new(Table::from_csv(csv, sheet.header_row)?))
    }
}

fn provider() -> CachedProvider<FixtureProvider> {
    let exports = HashMap::from([("0", HISTORY_CSV), ("1036617467", RETURNS_CSV)]);
    CachedProvider::new(
        FixtureProvider {
            exports,
            calls: AtomicUsize::new(0),
        },
        FreshnessPolicy::new(Duration::from_secs(600)),
    )
}

#[tokio::test]
async fn history_tab_yields_records_in_sheet_order() {
    let sheets = Sheets::default();
    let provider = provider();
    let table = provider
        .fetch(&SheetRef::new("history", "id", &sheets.history.gid, 0))
        .await
        .unwrap();

    let records = history_records(&table, &sheets.history).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].date, RawCell::from("30/11/2023"));
    // Column C is skipped by the default layout; D holds the AUM.
    assert_eq!(records[2].aum, RawCell::from("R$ 12.000.000,00"));
    assert_eq!(records[2].benchmark, RawCell::from("1,0600"));
}

#[tokio::test]
async fn repeated_fetches_are_served_from_cache() {
    let sheets = Sheets::default();
    let provider = provider();
    let sheet = SheetRef::new("returns", "id", &sheets.returns.gid, 0);

    let first = provider.fetch(&sheet).await.unwrap();
    let second = provider.fetch(&sheet).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    let performance = asset_performance(&second, &sheets.returns).unwrap();
    assert_eq!(performance.len(), 1);
    assert_eq!(performance[0].trailing_12m, "15,0%");
}

#[tokio::test]
async fn unknown_tab_surfaces_an_error_for_that_section_only() {
    let sheets = Sheets::default();
    let provider = provider();

    let allocation = provider
        .fetch(&SheetRef::new("allocation", "id", &sheets.allocation.gid, 0))
        .await;
    assert!(matches!(allocation, Err(ApiError::Status { status: 404, .. })));

    // The other tabs are unaffected.
    let history = provider
        .fetch(&SheetRef::new("history", "id", &sheets.history.gid, 0))
        .await
        .unwrap();
    assert!(history_records(&history, &sheets.history).is_ok());
}

#[tokio::test]
async fn history_tab_lacks_the_allocation_columns() {
    let sheets = Sheets::default();
    let provider = provider();
    let table = provider
        .fetch(&SheetRef::new("history", "id", &sheets.history.gid, 0))
        .await
        .unwrap();

    assert!(matches!(
        allocation_records(&table, &sheets.allocation),
        Err(ApiError::MissingColumn { .. })
    ));
}
