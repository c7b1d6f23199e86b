use std::path::PathBuf;

use mathprobe_engine::GenerateSettings;

/// Process configuration, resolved once at startup.
pub struct AppConfig {
    pub generate: GenerateSettings,
    pub report_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::resolve(|name| std::env::var(name).ok())
    }

    fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut generate = GenerateSettings::default();
        if let Some(key) =
            non_empty(lookup("MATHPROBE_API_KEY")).or_else(|| non_empty(lookup("API_KEY")))
        {
            generate.api_key = key;
        }
        if let Some(endpoint) = non_empty(lookup("MATHPROBE_BASE_URL")) {
            generate.endpoint = endpoint;
        }

        let report_dir = std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("reports");

        Self {
            generate,
            report_dir,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::AppConfig;

    fn resolve_with(vars: &[(&str, &str)]) -> AppConfig {
        AppConfig::resolve(|name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        })
    }

    #[test]
    fn defaults_point_at_the_relay() {
        let config = resolve_with(&[]);
        assert_eq!(config.generate.endpoint, "https://api.videocaptioner.cn/v1");
        assert_eq!(config.generate.model, "gemini-2.5-flash");
        assert_eq!(config.generate.api_key, "");
        assert!(config.report_dir.ends_with("reports"));
    }

    #[test]
    fn prefixed_key_wins_over_bare_key() {
        let config = resolve_with(&[("MATHPROBE_API_KEY", "prefixed"), ("API_KEY", "bare")]);
        assert_eq!(config.generate.api_key, "prefixed");
    }

    #[test]
    fn bare_key_is_the_fallback() {
        let config = resolve_with(&[("API_KEY", "bare")]);
        assert_eq!(config.generate.api_key, "bare");
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = resolve_with(&[("MATHPROBE_API_KEY", "  "), ("MATHPROBE_BASE_URL", "")]);
        assert_eq!(config.generate.api_key, "");
        assert_eq!(config.generate.endpoint, "https://api.videocaptioner.cn/v1");
    }

    #[test]
    fn base_url_override_is_applied() {
        let config = resolve_with(&[("MATHPROBE_BASE_URL", "http://localhost:9090/v1")]);
        assert_eq!(config.generate.endpoint, "http://localhost:9090/v1");
    }
}
