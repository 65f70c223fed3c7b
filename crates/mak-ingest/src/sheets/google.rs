//! Google Sheets v4 REST client.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, SourceError};
use crate::extract::pad_grid;
use crate::sheets::{Grid, SheetProvider};

const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// How requests are authorised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// API key, enough for link-shared workbooks.
    ApiKey(String),
    /// OAuth access token minted elsewhere.
    BearerToken(String),
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Reads a workbook through the Sheets API.
pub struct GoogleSheetsProvider {
    client: Client,
    spreadsheet_key: String,
    credentials: Option<Credentials>,
}

impl GoogleSheetsProvider {
    pub fn new(
        spreadsheet_key: impl Into<String>,
        credentials: Option<Credentials>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            spreadsheet_key: spreadsheet_key.into(),
            credentials,
        })
    }

    fn url(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url> {
        let mut url =
            Url::parse(SHEETS_API_URL).map_err(|error| SourceError::Configuration(error.to_string()))?;
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                SourceError::Configuration("sheets API url cannot be a base".to_string())
            })?;
            path.push(&self.spreadsheet_key);
            path.extend(segments);
        }
        let api_key = matches!(self.credentials, Some(Credentials::ApiKey(_)));
        if !query.is_empty() || api_key {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            if let Some(Credentials::ApiKey(api_key)) = &self.credentials {
                pairs.append_pair("key", api_key);
            }
        }
        Ok(url)
    }

    fn get(&self, url: Url) -> RequestBuilder {
        let request = self
            .client
            .get(url)
            .header(USER_AGENT, format!("mak-catalog/{}", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json");
        match &self.credentials {
            Some(Credentials::BearerToken(token)) => request.bearer_auth(token),
            _ => request,
        }
    }

    fn send(&self, url: Url) -> Result<Response> {
        if self.credentials.is_none() {
            return Err(SourceError::Authentication(
                "no credentials found".to_string(),
            ));
        }
        let response = self.get(url).send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                SourceError::Authentication(format!("{status}: {message}"))
            }
            StatusCode::NOT_FOUND => SourceError::NotFound(self.spreadsheet_key.clone()),
            _ => SourceError::Connection(format!("{status}: {message}")),
        })
    }
}

impl SheetProvider for GoogleSheetsProvider {
    fn sheet_titles(&self) -> Result<Vec<String>> {
        let url = self.url(&[], &[("fields", "sheets.properties.title")])?;
        debug!(spreadsheet = %self.spreadsheet_key, "listing sheets");
        let meta: SpreadsheetMeta = self.send(url)?.json()?;
        Ok(meta
            .sheets
            .into_iter()
            .map(|sheet| sheet.properties.title)
            .collect())
    }

    fn read_sheet(&self, title: &str) -> Result<Grid> {
        let range = format!("'{}'", title.replace('\'', "''"));
        let url = self.url(&["values", &range], &[("majorDimension", "ROWS")])?;
        debug!(spreadsheet = %self.spreadsheet_key, sheet = %title, "reading sheet values");
        let values: ValueRange = self.send(url)?.json()?;
        Ok(pad_grid(values.values))
    }
}
