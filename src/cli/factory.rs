//! App factory
//!
//! Builds the identity provider, request client and `App` from `AppConfig`.

use crate::api::ApiClient;
use crate::cli::config::{resolve_env_var, AppConfig, ConfigError};
use crate::identity::{FirebaseIdentity, Identity, StubIdentity};
use crate::transport::{ReqwestTransport, Transport};
use crate::ui::App;

/// Create the app with a real HTTP transport
pub fn create_app_from_config(config: &AppConfig) -> Result<App, ConfigError> {
    let transport = ReqwestTransport::with_timeout(config.backend.timeout_secs)
        .map_err(|e| ConfigError::Invalid(format!("HTTP client: {}", e)))?;
    create_app_with_transport(config, Transport::Real(transport))
}

/// Create the app over a given transport
pub fn create_app_with_transport(
    config: &AppConfig,
    transport: Transport,
) -> Result<App, ConfigError> {
    let identity = create_identity(config, transport.clone())?;
    let api = ApiClient::new(config.backend.base_url.clone(), transport);
    Ok(App::new(identity, api).with_search_url(config.lookup.search_url.clone()))
}

fn create_identity(config: &AppConfig, transport: Transport) -> Result<Identity, ConfigError> {
    match config.identity.provider.as_str() {
        "firebase" => {
            let api_key = resolve_env_var(&config.identity.api_key)?;
            Ok(Identity::Firebase(FirebaseIdentity::new(api_key, transport)))
        }
        "stub" => {
            let token = resolve_env_var(&config.identity.token)?;
            Ok(Identity::Stub(StubIdentity::new(token)))
        }
        other => Err(ConfigError::Invalid(format!(
            "Unknown identity provider: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::IdentityProvider;
    use crate::transport::FakeTransport;

    #[test]
    fn test_stub_provider_config() {
        let config = AppConfig::from_toml_str(
            r#"[identity]
provider = "stub"
token = "dev-token"
"#,
        )
        .unwrap();
        let identity = create_identity(&config, Transport::Fake(FakeTransport::new())).unwrap();
        assert_eq!(identity.provider_name(), "stub");
    }

    #[test]
    fn test_firebase_provider_config() {
        let config = AppConfig::from_toml_str(
            r#"[identity]
provider = "firebase"
api_key = "AIza-test"
"#,
        )
        .unwrap();
        let identity = create_identity(&config, Transport::Fake(FakeTransport::new())).unwrap();
        assert_eq!(identity.provider_name(), "firebase");
    }

    #[test]
    fn test_unknown_provider() {
        let config = AppConfig::from_toml_str("[identity]\nprovider = \"ldap\"\n").unwrap();
        let result = create_identity(&config, Transport::Fake(FakeTransport::new()));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unset_key_reference_fails() {
        let config = AppConfig::from_toml_str(
            "[identity]\napi_key = \"env:ALTHEA_TEST_MISSING_KEY_98765\"\n",
        )
        .unwrap();
        let result = create_app_with_transport(&config, Transport::Fake(FakeTransport::new()));
        assert!(matches!(result, Err(ConfigError::MissingEnv(_))));
    }

    #[test]
    fn test_search_template_applied() {
        let config = AppConfig::from_toml_str(
            r#"[identity]
provider = "stub"
token = "t"

[lookup]
search_url = "https://example.org/q?s={term}"
"#,
        )
        .unwrap();
        let app =
            create_app_with_transport(&config, Transport::Fake(FakeTransport::new())).unwrap();
        assert_eq!(app.search_template(), "https://example.org/q?s={term}");
    }
}
