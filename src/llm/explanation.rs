//! Plain-language explanation of a tariff breakdown.

use async_trait::async_trait;
use serde_json::json;

use crate::config::TariffConfig;
use crate::models::{TariffBreakdown, VesselDescription};

use super::{GeminiClient, LlmError};

/// Returned in place of an explanation when no API key is configured.
pub const EXPLANATION_UNAVAILABLE: &str = "Explanation not available without API key.";

/// Produces a plain-language explanation of calculated dues.
#[async_trait]
pub trait ExplanationGenerator: Send + Sync {
    /// Explains how each due was derived from the tariff rules.
    async fn explain(
        &self,
        config: &TariffConfig,
        vessel: &VesselDescription,
        dues: &TariffBreakdown,
    ) -> Result<String, LlmError>;
}

#[async_trait]
impl ExplanationGenerator for GeminiClient {
    async fn explain(
        &self,
        config: &TariffConfig,
        vessel: &VesselDescription,
        dues: &TariffBreakdown,
    ) -> Result<String, LlmError> {
        if !self.has_api_key() {
            return Ok(EXPLANATION_UNAVAILABLE.to_string());
        }

        let prompt = explanation_prompt(config, vessel, dues)?;
        self.generate_content(&prompt).await
    }
}

/// Builds the explanation prompt.
///
/// Embeds the calculation parameters of all six tariff categories so the
/// model explains against the rates that were actually applied, along with
/// the vessel's stay measured from arrival to departure.
pub fn explanation_prompt(
    config: &TariffConfig,
    vessel: &VesselDescription,
    dues: &TariffBreakdown,
) -> Result<String, LlmError> {
    let tariffs = config.tariffs();
    let rules = serde_json::to_string_pretty(&json!({
        "light_dues": tariffs.light_dues.calculation,
        "port_dues": tariffs.port_dues.calculation,
        "vts_dues": tariffs.vts_dues.calculation,
        "pilotage_dues": tariffs.pilotage_dues.calculation,
        "towage_dues": tariffs.towage_dues.calculation,
        "running_of_vessel_lines_dues": tariffs.running_of_vessel_lines_dues.calculation,
    }))?;
    let vessel_json = serde_json::to_string_pretty(vessel)?;
    let dues_json = serde_json::to_string_pretty(dues)?;

    Ok(format!(
        "Explain in plain language how the following port dues were calculated \
         for this vessel, one short paragraph per category, quoting the rates used.\n\n\
         Tariff rules ({edition}, {currency}):\n{rules}\n\n\
         Vessel:\n{vessel_json}\n\
         Hours in port: {hours}\n\n\
         Calculated dues:\n{dues_json}",
        edition = config.metadata().edition,
        currency = config.metadata().currency,
        hours = vessel.hours_in_port().round_dp(2).normalize(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::llm::fallback_description;
    use crate::settings::LlmSettings;
    use httpmock::prelude::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config() -> TariffConfig {
        ConfigLoader::load("./config/transnet_2024_25")
            .unwrap()
            .config()
            .clone()
    }

    fn dues() -> TariffBreakdown {
        let dec = |s: &str| Decimal::from_str(s).unwrap();
        TariffBreakdown {
            light_dues: dec("60062.04"),
            port_dues: dec("217455.57"),
            vts_dues: dec("33345.00"),
            pilotage_dues: dec("23594.97"),
            towage_dues: dec("39315.38"),
            line_running_dues: dec("1654.56"),
            total: dec("375427.52"),
        }
    }

    fn client(base_url: &str, api_key: Option<&str>) -> GeminiClient {
        GeminiClient::new(LlmSettings {
            api_key: api_key.map(str::to_string),
            model: "test-model".to_string(),
            base_url: base_url.to_string(),
            timeout_seconds: 5,
        })
    }

    #[test]
    fn test_prompt_embeds_rules_vessel_and_dues() {
        let prompt = explanation_prompt(&config(), &fallback_description(), &dues()).unwrap();

        assert!(prompt.contains("2024/25"));
        assert!(prompt.contains("\"formula_rate\": \"117.08\""));
        assert!(prompt.contains("\"running_of_vessel_lines_dues\""));
        assert!(prompt.contains("\"Richards_Bay\""));
        assert!(prompt.contains("\"total\": \"375427.52\""));
        assert!(prompt.contains("\"loa\": \"229.2\""));
        assert!(prompt.contains("Hours in port: 170.8\n"));
    }

    #[tokio::test]
    async fn test_without_api_key_returns_unavailable_message() {
        let explainer = client("http://127.0.0.1:9", None);
        let text = explainer
            .explain(&config(), &fallback_description(), &dues())
            .await
            .unwrap();
        assert_eq!(text, EXPLANATION_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_returns_model_text() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).body_contains("375427.52");
                then.status(200).json_body(serde_json::json!({
                    "candidates": [{ "content": { "parts": [{ "text": "Light dues are..." }] } }]
                }));
            })
            .await;

        let explainer = client(&server.base_url(), Some("secret"));
        let text = explainer
            .explain(&config(), &fallback_description(), &dues())
            .await
            .unwrap();
        assert_eq!(text, "Light dues are...");
    }

    #[tokio::test]
    async fn test_service_error_is_propagated() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(503).body("overloaded");
            })
            .await;

        let explainer = client(&server.base_url(), Some("secret"));
        let result = explainer
            .explain(&config(), &fallback_description(), &dues())
            .await;
        assert!(matches!(result, Err(LlmError::Status { status: 503, .. })));
    }
}
