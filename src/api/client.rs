/// Blocking client for the APOD metadata endpoint
use chrono::NaiveDate;
use reqwest::blocking::Client;
use reqwest::Url;

use super::types::ApodInfo;
use super::MetadataSource;
use crate::config::ApiConfig;
use crate::error::{ApodError, Result};

const USER_AGENT: &str = concat!("apod-desktop/", env!("CARGO_PKG_VERSION"));

/// Build the blocking HTTP client shared by metadata and image requests
pub fn build_http_client(config: &ApiConfig) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.timeout)
        .build()?)
}

/// Talks to the APOD API; one request per date
#[derive(Debug, Clone)]
pub struct ApodClient {
    http: Client,
    config: ApiConfig,
}

impl ApodClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = build_http_client(&config)?;
        Ok(Self::with_http(http, config))
    }

    /// Reuse an existing HTTP client (and its connection pool)
    pub fn with_http(http: Client, config: ApiConfig) -> Self {
        ApodClient { http, config }
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Full request URL for `date`.
    /// `thumbs=true` makes the service include `thumbnail_url` for videos.
    pub fn request_url(&self, date: NaiveDate) -> Result<Url> {
        let date = date.format("%Y-%m-%d").to_string();
        Url::parse_with_params(
            &self.config.base_url,
            &[
                ("date", date.as_str()),
                ("api_key", self.config.api_key.as_str()),
                ("thumbs", "true"),
            ],
        )
        .map_err(|e| ApodError::Config(format!("invalid APOD API URL '{}': {}", self.config.base_url, e)))
    }

    /// Fetch the metadata for `date`.
    ///
    /// Any non-success status becomes [`ApodError::Service`]; the caller
    /// decides whether that ends the run.
    pub fn fetch(&self, date: NaiveDate) -> Result<ApodInfo> {
        let url = self.request_url(date)?;
        tracing::info!(%date, "getting APOD information from NASA");

        let response = self.http.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%date, status = status.as_u16(), "APOD request failed");
            return Err(ApodError::Service {
                date,
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        let info: ApodInfo = serde_json::from_str(&body)?;
        tracing::debug!(%date, title = %info.title, media_type = info.media_type.as_str(), "APOD information received");
        Ok(info)
    }
}

impl MetadataSource for ApodClient {
    fn fetch_info(&self, date: NaiveDate) -> Result<ApodInfo> {
        self.fetch(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApodClient {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            api_key: "test key".to_string(),
            ..ApiConfig::default()
        };
        ApodClient::new(config).unwrap()
    }

    #[test]
    fn test_request_url_carries_date_key_and_thumbs() {
        let date = NaiveDate::from_ymd_opt(2022, 5, 4).unwrap();
        let url = client("https://api.nasa.gov/planetary/apod").request_url(date).unwrap();

        assert_eq!(url.host_str(), Some("api.nasa.gov"));
        assert_eq!(url.path(), "/planetary/apod");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("date".to_string(), "2022-05-04".to_string()),
                ("api_key".to_string(), "test key".to_string()),
                ("thumbs".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_base_url_is_a_config_error() {
        let date = NaiveDate::from_ymd_opt(2022, 5, 4).unwrap();
        let err = client("not a url").request_url(date).unwrap_err();
        assert!(matches!(err, ApodError::Config(_)));
    }
}
