use pbrates::core::config::{AppConfig, ProviderConfig};
use pbrates::core::{Currency, DateKey};
use std::fs;
use tracing::{error, info};

const API_PATH: &str = "/p24api/exchange_rates";

// Adds automatic logging to test
mod test_utils {
    use super::API_PATH;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const MOCK_JSON: &str = r#"{"exchangeRate":[{"currency":"EUR","saleRate":40.0,"purchaseRate":39.5},{"currency":"USD","saleRate":38.0,"purchaseRate":37.0},{"currency":"GBP","saleRate":50.0,"purchaseRate":49.0}]}"#;

    /// Serves `mock_response` for every date, expecting `calls` requests when given.
    pub async fn create_mock_server(mock_response: &str, calls: Option<u64>) -> MockServer {
        let mock_server = MockServer::start().await;

        let mock = Mock::given(method("GET"))
            .and(path(API_PATH))
            .and(query_param("json", ""))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response));
        let mock = match calls {
            Some(n) => mock.expect(n),
            None => mock,
        };
        mock.mount(&mock_server).await;

        mock_server
    }

    pub async fn create_dated_mock_server(date: &str, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(API_PATH))
            .and(query_param("json", ""))
            .and(query_param("date", date))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }
}

fn config_for(base_url: String) -> AppConfig {
    AppConfig {
        provider: ProviderConfig {
            base_url,
            timeout_secs: 5,
            ..ProviderConfig::default()
        },
    }
}

#[test_log::test(tokio::test)]
async fn test_report_for_single_date() {
    let mock_server =
        test_utils::create_dated_mock_server("01.01.2024", test_utils::MOCK_JSON).await;
    let config = config_for(format!("{}{}", mock_server.uri(), API_PATH));
    let dates = vec![DateKey::from(
        chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    )];

    let report = pbrates::providers::privatbank::fetch(&config.provider, &dates, &|| ())
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        serde_json::json!([{
            "01.01.2024": {
                "EUR": {"sale": 40.0, "purchase": 39.5},
                "USD": {"sale": 38.0, "purchase": 37.0}
            }
        }])
    );
}

#[test_log::test(tokio::test)]
async fn test_fetch_rates_covers_each_day() {
    let mock_server = test_utils::create_mock_server(test_utils::MOCK_JSON, Some(3)).await;
    let config = config_for(format!("{}{}", mock_server.uri(), API_PATH));

    let report = pbrates::fetch_rates(3, &config).await.unwrap();

    assert_eq!(report.len(), 3);
    let dates: Vec<DateKey> = report.iter().map(|r| r.date.clone()).collect();
    assert_eq!(dates, pbrates::core::generate(3));
    for entry in &report {
        assert_eq!(entry.rates.len(), 2);
        assert!(entry.rates.contains_key(&Currency::Eur));
        assert!(entry.rates.contains_key(&Currency::Usd));
    }
}

#[test_log::test(tokio::test)]
async fn test_too_many_days_makes_no_requests() {
    let mock_server = test_utils::create_mock_server(test_utils::MOCK_JSON, Some(0)).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_path = config_file.path();
    let config_content = format!(
        r#"
        provider:
          base_url: {}{}
    "#,
        mock_server.uri(),
        API_PATH
    );
    fs::write(config_path, &config_content).expect("Failed to write config file");

    let result = pbrates::run(
        11,
        pbrates::OutputFormat::Json,
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("up to 10 days"));

    let config = AppConfig::load_from_path(config_path).unwrap();
    assert!(pbrates::fetch_rates(11, &config).await.is_err());

    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_malformed_responses_keep_report_length() {
    let mock_server = test_utils::create_mock_server("<html>busy</html>", None).await;
    let config = config_for(format!("{}{}", mock_server.uri(), API_PATH));

    let report = pbrates::fetch_rates(4, &config).await.unwrap();

    assert_eq!(report.len(), 4);
    assert!(report.iter().all(|entry| entry.rates.is_empty()));
}

#[test_log::test(tokio::test)]
async fn test_unreachable_service_keeps_report_length() {
    // Nothing listens on port 1
    let config = config_for(format!("http://127.0.0.1:1{API_PATH}"));

    let report = pbrates::fetch_rates(2, &config).await.unwrap();

    assert_eq!(report.len(), 2);
    assert!(report.iter().all(|entry| entry.rates.is_empty()));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json[0][report[0].date.as_str()], serde_json::json!({}));
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    // Two days for each output format
    let mock_server = test_utils::create_mock_server(test_utils::MOCK_JSON, Some(4)).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_path = config_file.path();
    let config_content = format!(
        r#"
        provider:
          base_url: {}{}
          concurrency: 2
    "#,
        mock_server.uri(),
        API_PATH
    );
    fs::write(config_path, &config_content).expect("Failed to write config file");

    for format in [pbrates::OutputFormat::Table, pbrates::OutputFormat::Json] {
        let result = pbrates::run(2, format, Some(config_path.to_str().unwrap())).await;
        assert!(
            result.is_ok(),
            "Main function failed with: {:?}",
            result.err()
        );
    }
}

#[test_log::test(tokio::test)]
#[ignore = "requires network access to api.privatbank.ua"]
async fn test_real_privatbank_api() {
    let config = AppConfig::default();

    info!("Fetching rates from the PrivatBank archive");
    match pbrates::fetch_rates(2, &config).await {
        Ok(report) => {
            info!(?report, "Received report");
            assert_eq!(report.len(), 2);
            assert!(
                report.iter().any(|entry| !entry.rates.is_empty()),
                "Expected rates for at least one day"
            );
        }
        Err(e) => {
            error!("PrivatBank request failed: {e}\n{e:?}");
            panic!("PrivatBank request failed: {e}");
        }
    }
}
