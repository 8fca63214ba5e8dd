use crate::error::ApiError;
use crate::table::Table;
use crate::{DataProvider, SheetRef};
use async_trait::async_trait;
use configuration::SourceConfig;
use reqwest::header::CONTENT_TYPE;
use std::sync::Arc;

/// A `DataProvider` that reads tabs through the Google Sheets CSV export.
///
/// The spreadsheet must be readable by anyone with the link; no credentials
/// are sent.
#[derive(Clone)]
pub struct SheetsClient {
    client: reqwest::Client,
    base_url: String,
}

impl SheetsClient {
    pub fn new(source: &SourceConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(source.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: source.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn export_url(&self, sheet: &SheetRef) -> String {
        format!(
            "{}/{}/export?format=csv&gid={}",
            self.base_url, sheet.spreadsheet_id, sheet.gid
        )
    }
}

#[async_trait]
impl DataProvider for SheetsClient {
    async fn fetch(&self, sheet: &SheetRef) -> Result<Arc<Table>, ApiError> {
        let url = self.export_url(sheet);
        tracing::debug!(sheet = %sheet.name, %url, "Downloading sheet export.");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        // A private sheet redirects to a sign-in page that is served as HTML with 200 OK.
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if content_type.starts_with("text/html") {
            return Err(ApiError::NotCsv { url, content_type });
        }

        let text = response.text().await?;
        let table = Table::from_csv(&text, sheet.header_row)?;
        tracing::info!(
            sheet = %sheet.name,
            rows = table.rows().len(),
            columns = table.width(),
            "Fetched sheet."
        );

        Ok(Arc::new(table))
    }
}
