//! Builder for configuring gateway instances.

use std::sync::Arc;

use super::Gateway;
use crate::config::{ProviderPreference, ProviderSettings};
use crate::providers::{GeminiClient, OpenAiClient, Provider};

/// Builder for [`Gateway`].
///
/// Unlike a client library, building with zero providers is not an error:
/// an empty cascade is demo mode, and the gateway still answers every
/// well-formed text request.
pub struct GatewayBuilder {
    gemini_key: Option<String>,
    openai_key: Option<String>,
    preferred: Option<ProviderPreference>,
    timeout_secs: Option<u64>,
    extra: Vec<Arc<dyn Provider>>,
}

impl GatewayBuilder {
    pub fn new() -> Self {
        Self {
            gemini_key: None,
            openai_key: None,
            preferred: None,
            timeout_secs: None,
            extra: Vec::new(),
        }
    }

    /// Wire in credentials and preference from resolved settings.
    pub fn from_settings(settings: &ProviderSettings) -> Self {
        let mut builder = Self::new();
        builder.gemini_key = settings.gemini_api_key.clone();
        builder.openai_key = settings.openai_api_key.clone();
        builder.preferred = settings.preferred;
        builder
    }

    /// Configure the Gemini provider.
    pub fn gemini(mut self, api_key: impl Into<String>) -> Self {
        self.gemini_key = Some(api_key.into());
        self
    }

    /// Configure the OpenAI provider.
    pub fn openai(mut self, api_key: impl Into<String>) -> Self {
        self.openai_key = Some(api_key.into());
        self
    }

    /// Set the preferred provider, moving it to the front of the cascade.
    pub fn preferred(mut self, preference: ProviderPreference) -> Self {
        self.preferred = Some(preference);
        self
    }

    /// Set the per-request timeout for provider HTTP calls (seconds).
    pub fn timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Append a custom provider at the end of the cascade (lowest priority).
    pub fn provider(mut self, provider: Arc<dyn Provider>) -> Self {
        self.extra.push(provider);
        self
    }

    /// Build the gateway. Infallible: zero providers is demo mode.
    ///
    /// Attempt order comes from [`ProviderSettings::resolved_order`], the
    /// single owner of the tie-break and preference-promotion policy.
    pub fn build(self) -> Gateway {
        let timeout_secs = self.timeout_secs.unwrap_or(60);
        let settings = ProviderSettings {
            gemini_api_key: self.gemini_key,
            openai_api_key: self.openai_key,
            preferred: self.preferred,
        };

        let mut providers: Vec<Arc<dyn Provider>> = Vec::new();
        for preference in settings.resolved_order() {
            match preference {
                ProviderPreference::Gemini => {
                    if let Some(key) = settings.gemini_api_key.as_deref() {
                        providers.push(Arc::new(GeminiClient::new(key).timeout_secs(timeout_secs)));
                    }
                }
                ProviderPreference::OpenAi => {
                    if let Some(key) = settings.openai_api_key.as_deref() {
                        providers.push(Arc::new(OpenAiClient::new(key).timeout_secs(timeout_secs)));
                    }
                }
            }
        }

        providers.extend(self.extra);
        Gateway::new(providers)
    }
}

impl Default for GatewayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_yields_demo_mode() {
        let gateway = GatewayBuilder::new().build();
        assert!(!gateway.has_providers());
    }

    #[test]
    fn tie_break_order_is_gemini_first() {
        let gateway = GatewayBuilder::new().gemini("g").openai("o").build();
        assert_eq!(gateway.provider_names(), ["gemini", "openai"]);
    }

    #[test]
    fn preference_promotes_to_front() {
        let gateway = GatewayBuilder::new()
            .gemini("g")
            .openai("o")
            .preferred(ProviderPreference::OpenAi)
            .build();
        assert_eq!(gateway.provider_names(), ["openai", "gemini"]);
    }

    #[test]
    fn preference_without_credentials_is_noop() {
        let gateway = GatewayBuilder::new()
            .gemini("g")
            .preferred(ProviderPreference::OpenAi)
            .build();
        assert_eq!(gateway.provider_names(), ["gemini"]);
    }

    #[test]
    fn from_settings_wires_credentials() {
        let settings = ProviderSettings {
            gemini_api_key: None,
            openai_api_key: Some("o".into()),
            preferred: None,
        };
        let gateway = GatewayBuilder::from_settings(&settings).build();
        assert_eq!(gateway.provider_names(), ["openai"]);
    }

    #[test]
    fn build_order_matches_the_resolver() {
        let settings = ProviderSettings {
            gemini_api_key: Some("g".into()),
            openai_api_key: Some("o".into()),
            preferred: Some(ProviderPreference::OpenAi),
        };

        let resolved: Vec<&str> = settings
            .resolved_order()
            .into_iter()
            .map(|p| match p {
                ProviderPreference::Gemini => "gemini",
                ProviderPreference::OpenAi => "openai",
            })
            .collect();
        let gateway = GatewayBuilder::from_settings(&settings).build();

        assert_eq!(gateway.provider_names(), resolved);
    }
}
