use fxform::core::pipeline::CONFIRM_MESSAGE;
use fxform::core::{
    ConversionForm, ConversionPipeline, ConversionStatus, Currency, Notifier, RateProvider,
};
use fxform::providers::FastForexProvider;
use std::fs;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod test_utils {
    use super::*;

    pub async fn create_rate_server(from: &str, to: &str, rate: f64) -> MockServer {
        let mock_server = MockServer::start().await;
        let body = format!(
            r#"{{"base": "{from}", "result": {{"{to}": {rate}}}, "updated": "2026-10-16 09:00:00", "ms": 2}}"#
        );

        Mock::given(method("GET"))
            .and(path("/fetch-one"))
            .and(query_param("from", from))
            .and(query_param("to", to))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(base_url: &str) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
provider:
  base_url: {base_url}
  api_key: "integration-key"
debounce_ms: 20
defaults:
  from: EUR
  to: CZK
"#
        );
        fs::write(config_file.path(), config_content).expect("Failed to write config file");
        config_file
    }

    #[derive(Default)]
    pub struct RecordingNotifier {
        pub messages: Mutex<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }
}

#[test_log::test(tokio::test)]
async fn test_full_convert_flow_with_mock() {
    let mock_server = test_utils::create_rate_server("EUR", "CZK", 25.0).await;
    let config_file = test_utils::write_config(&mock_server.uri());

    let result = fxform::run_command(
        fxform::AppCommand::Convert {
            amount: "50".to_string(),
            from: None,
            to: None,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Convert command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_convert_reports_upstream_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fetch-one"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    let config_file = test_utils::write_config(&mock_server.uri());

    let result = fxform::run_command(
        fxform::AppCommand::Convert {
            amount: "50".to_string(),
            from: Some(Currency::Usd),
            to: Some(Currency::Eur),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    let err = result.unwrap_err().to_string();
    assert!(err.contains("Conversion failed"), "unexpected error: {err}");
    assert!(err.contains("500"), "unexpected error: {err}");
}

#[test_log::test(tokio::test)]
async fn test_missing_config_fails() {
    let result = fxform::run_command(
        fxform::AppCommand::Interactive,
        Some("/nonexistent/fxform/config.yaml"),
    )
    .await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
async fn test_pipeline_against_http_provider() {
    let mock_server = test_utils::create_rate_server("EUR", "USD", 1.1).await;
    let provider: Arc<dyn RateProvider> =
        Arc::new(FastForexProvider::new(&mock_server.uri(), "integration-key").unwrap());
    let notifier = Arc::new(test_utils::RecordingNotifier::default());
    let pipeline = ConversionPipeline::new(
        ConversionForm::new(Currency::Eur, Currency::Usd).unwrap(),
        provider,
        notifier.clone(),
        Duration::from_millis(20),
    );

    for amount in ["1", "10", "100"] {
        pipeline.set_amount(amount).await;
    }
    let status = tokio::time::timeout(Duration::from_secs(5), pipeline.wait_until_settled())
        .await
        .expect("Pipeline did not settle");
    info!(?status, "Pipeline settled");
    assert_eq!(status, ConversionStatus::Resolved("110.00".to_string()));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let record = pipeline.confirm().await.unwrap();
    assert_eq!(record.before, "100");
    assert_eq!(record.after, "110.00");
    assert_eq!(record.from_currency, Currency::Eur);
    assert_eq!(record.to_currency, Currency::Usd);

    let snapshot = pipeline.snapshot().await;
    assert_eq!(snapshot.history.len(), 1);
    assert_eq!(snapshot.input.amount, "");
    assert_eq!(snapshot.converted_amount, "110.00");
    assert_eq!(
        *notifier.messages.lock().unwrap(),
        vec![CONFIRM_MESSAGE.to_string()]
    );
}

#[test_log::test(tokio::test)]
async fn test_pipeline_keeps_stale_value_when_fetch_fails() {
    let mock_server = test_utils::create_rate_server("EUR", "USD", 2.0).await;
    let provider: Arc<dyn RateProvider> =
        Arc::new(FastForexProvider::new(&mock_server.uri(), "integration-key").unwrap());
    let pipeline = ConversionPipeline::new(
        ConversionForm::new(Currency::Eur, Currency::Usd).unwrap(),
        provider,
        Arc::new(test_utils::RecordingNotifier::default()),
        Duration::from_millis(20),
    );

    pipeline.set_amount("3").await;
    pipeline.wait_until_settled().await;
    assert_eq!(pipeline.snapshot().await.converted_amount, "6.00");

    // No mock is mounted for EUR/CZK, so wiremock answers 404.
    pipeline.set_target(Currency::Czk).await.unwrap();
    let status = tokio::time::timeout(Duration::from_secs(5), pipeline.wait_until_settled())
        .await
        .expect("Pipeline did not settle");

    assert!(matches!(status, ConversionStatus::Failed(_)));
    assert_eq!(pipeline.snapshot().await.converted_amount, "6.00");
}
