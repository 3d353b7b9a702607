/*!
 * Tests for app configuration functionality
 */

use anyhow::Result;
use dotwai::app_config::{Config, ProviderConfig, TranslationProvider};
use std::str::FromStr;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_shouldCarryDocumentedDefaults() {
    let config = Config::default();
    assert_eq!(config.target_language, "French");
    assert_eq!(config.translation.provider, TranslationProvider::Anthropic);
    assert_eq!(config.translation.common.worker_count, 5);
    assert_eq!(config.translation.common.retry_delay_ms, 20_000);
    assert_eq!(config.translation.common.max_retries, None);
    assert!(!config.translation.common.context_mode);
    assert_eq!(config.translation.common.context_window_size, 5);
    assert_eq!(config.translation.common.max_output_tokens, 3000);
}

/// Test that the default provider table resolves model and endpoint
#[test]
fn test_get_model_withDefaultProviders_shouldResolvePerProvider() {
    let mut config = Config::default();
    assert_eq!(config.translation.get_model(), "claude-3-haiku-20240307");
    assert_eq!(config.translation.get_endpoint(), "https://api.anthropic.com");

    config.translation.provider = TranslationProvider::Ollama;
    assert_eq!(config.translation.get_model(), "llama3.2:3b");
    assert_eq!(config.translation.get_endpoint(), "http://localhost:11434");
}

/// Test that an API key stored in the provider table is found
#[test]
fn test_get_api_key_withKeyInProviderTable_shouldReturnIt() {
    let mut config = Config::default();
    if let Some(provider) = config
        .translation
        .available_providers
        .iter_mut()
        .find(|p| p.provider_type == "anthropic")
    {
        provider.api_key = "test-api-key".to_string();
    }
    assert_eq!(config.translation.get_api_key(), "test-api-key");
}

/// Test that validation rejects a zero-sized worker pool
#[test]
fn test_validate_withZeroWorkers_shouldFail() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Ollama;
    config.translation.common.worker_count = 0;
    assert!(config.validate().is_err());
}

/// Test that validation rejects an empty target language
#[test]
fn test_validate_withEmptyTargetLanguage_shouldFail() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Ollama;
    config.target_language = "  ".to_string();
    assert!(config.validate().is_err());
}

/// Test that the keyless Ollama provider validates without a credential
#[test]
fn test_validate_withOllamaProvider_shouldNotRequireApiKey() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Ollama;
    assert!(config.validate().is_ok());
}

/// Test that validation passes for Anthropic once a key is present
#[test]
fn test_validate_withAnthropicKeyInConfig_shouldPass() {
    let mut config = Config::default();
    if let Some(provider) = config
        .translation
        .available_providers
        .iter_mut()
        .find(|p| p.provider_type == "anthropic")
    {
        provider.api_key = "test-api-key".to_string();
    }
    assert!(config.validate().is_ok());
}

/// Test saving and reloading the configuration file
#[test]
fn test_config_roundTrip_withFile_shouldPreserveValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.target_language = "Traditional Chinese".to_string();
    config.translation.common.worker_count = 8;
    config.translation.common.context_mode = true;
    config.save_to_file(&config_path)?;

    let reloaded = Config::from_file(&config_path)?;
    assert_eq!(reloaded.target_language, "Traditional Chinese");
    assert_eq!(reloaded.translation.common.worker_count, 8);
    assert!(reloaded.translation.common.context_mode);

    Ok(())
}

/// Test that a partial config file fills the rest from defaults
#[test]
fn test_from_file_withPartialConfig_shouldUseDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        r#"{ "target_language": "German", "translation": {} }"#,
    )?;

    let config = Config::from_file(&config_path)?;
    assert_eq!(config.target_language, "German");
    assert_eq!(config.translation.common.worker_count, 5);
    assert_eq!(config.translation.provider, TranslationProvider::Anthropic);

    Ok(())
}

/// Test that loading a malformed config file fails
#[test]
fn test_from_file_withMalformedJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path =
        common::create_test_file(&temp_dir.path().to_path_buf(), "conf.json", "{ nope")?;
    assert!(Config::from_file(&config_path).is_err());
    Ok(())
}

/// Test provider parsing and display round trip
#[test]
fn test_provider_fromStr_withKnownNames_shouldParse() {
    assert_eq!(
        TranslationProvider::from_str("anthropic").unwrap(),
        TranslationProvider::Anthropic
    );
    assert_eq!(
        TranslationProvider::from_str("OLLAMA").unwrap(),
        TranslationProvider::Ollama
    );
    assert!(TranslationProvider::from_str("openai").is_err());
    assert_eq!(TranslationProvider::Anthropic.display_name(), "Anthropic");
    assert_eq!(TranslationProvider::Ollama.to_string(), "ollama");
}

/// Test provider config construction defaults
#[test]
fn test_provider_config_new_withAnthropic_shouldUseAnthropicDefaults() {
    let provider = ProviderConfig::new(TranslationProvider::Anthropic);
    assert_eq!(provider.provider_type, "anthropic");
    assert_eq!(provider.model, "claude-3-haiku-20240307");
    assert_eq!(provider.timeout_secs, 120);
}
