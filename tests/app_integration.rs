use stockview::cli::history::parse_range;
use stockview::core::config::AppConfig;
use stockview::core::{FetchError, RangeSelection, fetch_history_in_range};
use stockview::providers::AlphaVantageProvider;
use tracing::info;

mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(
        function: &str,
        symbol: &str,
        mock_response: &str,
    ) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/query"))
            .and(query_param("function", function))
            .and(query_param("symbol", symbol))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(base_url: &str, extra: &str) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
providers:
  alpha_vantage:
    base_url: {base_url}
    api_key: "integration-key"
    timeout_secs: 5
{extra}
"#
        );
        std::fs::write(config_file.path(), config_content).expect("Failed to write config file");
        config_file
    }
}

// `run_command` blocks on HTTP, so keep it off the runtime driving the mock server.
async fn run_blocking(
    command: stockview::AppCommand,
    config_file: &tempfile::NamedTempFile,
) -> anyhow::Result<()> {
    let path = config_file.path().to_str().unwrap().to_string();
    tokio::task::spawn_blocking(move || stockview::run_command(command, Some(&path)))
        .await
        .expect("run_command panicked")
}

#[test_log::test(tokio::test)]
async fn test_full_quote_flow_with_mock() {
    let mock_response = r#"{
        "Global Quote": {
            "01. symbol": "AAPL",
            "05. price": "189.8400",
            "07. latest trading day": "2024-05-14",
            "10. change percent": "0.6182%"
        }
    }"#;
    let mock_server = test_utils::create_mock_server("GLOBAL_QUOTE", "AAPL", mock_response).await;
    let config_file = test_utils::write_config(&mock_server.uri(), "");

    let result = run_blocking(
        stockview::AppCommand::Quote {
            symbol: " aapl ".to_string(),
            json: false,
        },
        &config_file,
    )
    .await;
    assert!(
        result.is_ok(),
        "Quote command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_full_history_flow_with_mock() {
    use chrono::{Duration, Local};

    let today = Local::now().date_naive();
    let recent = today - Duration::days(2);
    let older = today - Duration::days(10);
    let ancient = today - Duration::days(400);

    let mock_response = format!(
        r#"{{
            "Meta Data": {{ "2. Symbol": "AAPL" }},
            "Time Series (Daily)": {{
                "{recent}": {{ "4. close": "190.10" }},
                "{older}": {{ "4. close": "185.00" }},
                "{ancient}": {{ "4. close": "150.00" }}
            }}
        }}"#
    );
    let mock_server =
        test_utils::create_mock_server("TIME_SERIES_DAILY", "AAPL", &mock_response).await;
    let config_file = test_utils::write_config(&mock_server.uri(), "history:\n  default_range: \"30d\"");

    info!(%recent, %older, "Running history flow");
    let result = run_blocking(
        stockview::AppCommand::History {
            symbol: "AAPL".to_string(),
            range: None,
            json: true,
        },
        &config_file,
    )
    .await;
    assert!(
        result.is_ok(),
        "History command failed with: {:?}",
        result.err()
    );

    // Same config and endpoint, with the series returned instead of printed.
    let path = config_file.path().to_path_buf();
    let series = tokio::task::spawn_blocking(move || -> anyhow::Result<_> {
        let config = AppConfig::load_from_path(&path)?;
        let range = stockview::history_range(None, &config);
        assert_eq!(range.as_deref(), Some("30d"));

        let selection = parse_range(range.as_deref());
        assert_eq!(selection, Some(RangeSelection::Last30Days));

        let provider = AlphaVantageProvider::from_config(&config, config.resolve_api_key(None)?)?;
        Ok(fetch_history_in_range(&provider, "AAPL", selection, today)?)
    })
    .await
    .expect("history fetch panicked")
    .expect("History fetch failed");

    let dates: Vec<_> = series.points().iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![older, recent]);
    assert!(series.points().iter().all(|p| p.date != ancient));

    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 2);
}

#[test_log::test(tokio::test)]
async fn test_unknown_symbol_reports_no_data() {
    let mock_server =
        test_utils::create_mock_server("GLOBAL_QUOTE", "ZZZZ", r#"{"Global Quote": {}}"#).await;
    let config_file = test_utils::write_config(&mock_server.uri(), "");

    let err = run_blocking(
        stockview::AppCommand::Quote {
            symbol: "zzzz".to_string(),
            json: false,
        },
        &config_file,
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<FetchError>(),
        Some(FetchError::NoData { .. })
    ));
}

#[test_log::test(tokio::test)]
async fn test_missing_time_series_reports_no_data() {
    let mock_server = test_utils::create_mock_server(
        "TIME_SERIES_DAILY",
        "ZZZZ",
        r#"{"Error Message": "Invalid API call."}"#,
    )
    .await;
    let config_file = test_utils::write_config(&mock_server.uri(), "");

    let err = run_blocking(
        stockview::AppCommand::History {
            symbol: "ZZZZ".to_string(),
            range: Some("3m".to_string()),
            json: false,
        },
        &config_file,
    )
    .await
    .unwrap_err();

    match err.downcast_ref::<FetchError>() {
        Some(FetchError::NoData { symbol, detail }) => {
            assert_eq!(symbol, "ZZZZ");
            assert_eq!(detail.as_deref(), Some("Invalid API call."));
        }
        other => panic!("Expected NoData, got {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn test_unreachable_server_reports_transport_error() {
    // Nothing listens on port 9 locally.
    let config_file = test_utils::write_config("http://127.0.0.1:9", "");

    let err = run_blocking(
        stockview::AppCommand::Quote {
            symbol: "IBM".to_string(),
            json: false,
        },
        &config_file,
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<FetchError>(),
        Some(FetchError::Transport { .. })
    ));
}

#[test]
fn test_unreadable_config_path_fails() {
    let result = stockview::run_command(
        stockview::AppCommand::Quote {
            symbol: "IBM".to_string(),
            json: false,
        },
        Some("/definitely/not/here/config.yaml"),
    );
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Failed to read config file")
    );
}
