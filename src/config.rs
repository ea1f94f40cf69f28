//! Provider availability resolution.
//!
//! [`ProviderSettings`] is computed once from the environment at process
//! start and passed into the gateway builder by reference. It never touches
//! the network and never fails: a process with zero credentials is a valid,
//! expected state (demo mode), not an error.

use std::str::FromStr;

use serde::Deserialize;
use tracing::warn;

/// Upstream provider identity, used for operator preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderPreference {
    Gemini,
    OpenAi,
}

impl FromStr for ProviderPreference {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAi),
            _ => Err(()),
        }
    }
}

/// Which upstream providers are usable, derived from the environment.
///
/// Read-only after construction; recomputed on each process start, never
/// persisted.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    /// Explicit operator preference; takes priority over the tie-break order.
    pub preferred: Option<ProviderPreference>,
}

impl ProviderSettings {
    /// Resolve settings from the environment.
    ///
    /// `GEMINI_API_KEY` (falling back to `GOOGLE_API_KEY`) enables Gemini,
    /// `OPENAI_API_KEY` enables OpenAI, and `NOVUS_PREFERRED_PROVIDER`
    /// expresses an explicit preference. An unrecognised preference value
    /// is logged and ignored rather than treated as fatal.
    pub fn from_env() -> Self {
        let preferred = match std::env::var("NOVUS_PREFERRED_PROVIDER") {
            Ok(raw) => match raw.parse() {
                Ok(p) => Some(p),
                Err(()) => {
                    warn!(value = %raw, "unrecognised NOVUS_PREFERRED_PROVIDER, ignoring");
                    None
                }
            },
            Err(_) => None,
        };

        Self {
            gemini_api_key: env_nonempty("GEMINI_API_KEY").or_else(|| env_nonempty("GOOGLE_API_KEY")),
            openai_api_key: env_nonempty("OPENAI_API_KEY"),
            preferred,
        }
    }

    /// Whether any provider has a complete credential set.
    ///
    /// When false, every operation routes to the demo responder.
    pub fn has_any_provider(&self) -> bool {
        self.gemini_api_key.is_some() || self.openai_api_key.is_some()
    }

    /// Configured providers in attempt order.
    ///
    /// Explicit preference first when its credentials are present; otherwise
    /// the fixed tie-break order (Gemini before OpenAI).
    pub fn resolved_order(&self) -> Vec<ProviderPreference> {
        let mut order = Vec::new();
        if self.gemini_api_key.is_some() {
            order.push(ProviderPreference::Gemini);
        }
        if self.openai_api_key.is_some() {
            order.push(ProviderPreference::OpenAi);
        }
        if let Some(preferred) = self.preferred
            && let Some(idx) = order.iter().position(|p| *p == preferred)
            && idx > 0
        {
            order[..=idx].rotate_right(1);
        }
        order
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
