//! Mailer settings: yaml file overlaid by environment variables.

use std::path::Path;

use serde::Deserialize;

const DEFAULT_INFERENCE_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Optional mailer configuration. Precedence: environment variables
/// over file values over built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MailerSettings {
    /// Chat-completions endpoint.
    pub inference_url: Option<String>,
    /// Model name sent with every request.
    pub model: Option<String>,
    /// Bearer token; absent means unauthenticated endpoint.
    pub api_key: Option<String>,
    /// Default email tone.
    pub tone: Option<String>,
    /// Default email length in characters.
    pub length: Option<usize>,
}

impl MailerSettings {
    /// Load from a yaml file (missing or malformed files fall back to
    /// defaults with a warning), then overlay environment variables
    /// `SHOWROOM_INFERENCE_URL`, `SHOWROOM_MODEL` and
    /// `SHOWROOM_OPENAI_API_KEY`.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        Self::from_file(path).merge(Self::from_env())
    }

    /// Settings taken from the environment only.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            inference_url: env_non_empty("SHOWROOM_INFERENCE_URL"),
            model: env_non_empty("SHOWROOM_MODEL"),
            api_key: env_non_empty("SHOWROOM_OPENAI_API_KEY"),
            tone: None,
            length: None,
        }
    }

    fn from_file(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %error,
                    "failed to read mailer settings; ignoring"
                );
                return Self::default();
            }
        };
        match serde_yaml::from_str::<Self>(&raw) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %error,
                    "failed to parse mailer settings yaml; ignoring file"
                );
                Self::default()
            }
        }
    }

    /// Overlay `overlay` on `self` (overlay wins per field).
    #[must_use]
    pub fn merge(self, overlay: Self) -> Self {
        Self {
            inference_url: overlay.inference_url.or(self.inference_url),
            model: overlay.model.or(self.model),
            api_key: overlay.api_key.or(self.api_key),
            tone: overlay.tone.or(self.tone),
            length: overlay.length.or(self.length),
        }
    }

    /// Endpoint with the built-in default applied.
    #[must_use]
    pub fn resolved_inference_url(&self) -> String {
        self.inference_url
            .clone()
            .unwrap_or_else(|| DEFAULT_INFERENCE_URL.to_string())
    }

    /// Model with the built-in default applied.
    #[must_use]
    pub fn resolved_model(&self) -> String {
        self.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    /// Tone with the built-in default applied.
    #[must_use]
    pub fn resolved_tone(&self) -> String {
        self.tone.clone().unwrap_or_else(|| "😊 Formal".to_string())
    }

    /// Length with the built-in default applied.
    #[must_use]
    pub fn resolved_length(&self) -> usize {
        self.length.unwrap_or(1000)
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn overlay_wins_per_field() {
        let base = MailerSettings {
            inference_url: Some("http://base".to_string()),
            model: Some("base-model".to_string()),
            ..MailerSettings::default()
        };
        let overlay = MailerSettings {
            model: Some("overlay-model".to_string()),
            ..MailerSettings::default()
        };
        let merged = base.merge(overlay);
        assert_eq!(merged.inference_url.as_deref(), Some("http://base"));
        assert_eq!(merged.model.as_deref(), Some("overlay-model"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = MailerSettings::from_file(Path::new("/nonexistent/mailer.yaml"));
        assert_eq!(settings.resolved_model(), DEFAULT_MODEL);
        assert_eq!(settings.resolved_inference_url(), DEFAULT_INFERENCE_URL);
        assert_eq!(settings.resolved_length(), 1000);
    }

    #[test]
    fn yaml_file_is_read() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "model: local-llm\nlength: 500").expect("write yaml");
        let settings = MailerSettings::from_file(file.path());
        assert_eq!(settings.resolved_model(), "local-llm");
        assert_eq!(settings.resolved_length(), 500);
    }

    #[test]
    fn malformed_yaml_is_ignored() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, ": not yaml [").expect("write bad yaml");
        let settings = MailerSettings::from_file(file.path());
        assert_eq!(settings.resolved_model(), DEFAULT_MODEL);
    }
}
