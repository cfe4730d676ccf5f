/*!
 * Tests for application configuration functionality
 */

use zhsubs::app_config::{Config, LogLevel, ProviderConfig, TranslationProvider};
use crate::common;

/// Test default configuration values
#[test]
fn test_defaultConfig_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.translation.provider, TranslationProvider::Gemini);
    assert_eq!(config.translation.get_model(), "gemini-3-pro-preview");
    assert_eq!(config.translation.get_timeout_secs(), 120);
    assert_eq!(config.translation.available_providers.len(), 4);
    assert_eq!(config.log_level, LogLevel::Info);

    let common = &config.translation.common;
    assert_eq!(common.chunk_size, 20);
    assert_eq!(common.max_retries, 3);
    assert_eq!(common.backoff_base_ms, 1000);
    assert!(common.system_prompt.is_none());
}

#[test]
fn test_configValidation_withBadTemperature_shouldFail() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Ollama;
    config.translation.common.temperature = 3.5;
    assert!(config.validate().is_err());

    config.translation.common.temperature = 1.0;
    assert!(config.validate().is_ok());
}

#[test]
fn test_configFile_withSaveThenLoad_shouldKeepSettings() -> anyhow::Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Ollama;
    config.translation.common.chunk_size = 7;
    config.translation.common.strict_alignment = true;
    config.log_level = LogLevel::Debug;
    config.save_to_file(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded.translation.provider, TranslationProvider::Ollama);
    assert_eq!(loaded.translation.common, config.translation.common);
    assert_eq!(loaded.log_level, LogLevel::Debug);
    Ok(())
}

#[test]
fn test_configFile_withInvalidJson_shouldFailWithPath() -> anyhow::Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    let error = Config::from_file(&path).unwrap_err();
    assert!(format!("{:#}", error).contains("conf.json"));
    Ok(())
}

#[test]
fn test_providerConfig_withCustomEntry_shouldOverrideDefaults() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::OpenAI;
    config.translation.available_providers = vec![ProviderConfig {
        provider_type: "openai".to_string(),
        model: "gpt-4o-mini".to_string(),
        api_key: "sk-test".to_string(),
        endpoint: "http://localhost:8080/v1".to_string(),
        timeout_secs: 0,
    }];

    assert_eq!(config.translation.get_model(), "gpt-4o-mini");
    assert_eq!(config.translation.get_api_key(), "sk-test");
    assert_eq!(config.translation.get_endpoint(), "http://localhost:8080/v1");
    assert_eq!(config.translation.get_timeout_secs(), 120);
}

#[test]
fn test_activeProviderConfigMut_withMissingEntry_shouldInsertDefaults() {
    let mut config = Config::default();
    config.translation.available_providers.clear();
    config.translation.provider = TranslationProvider::Ollama;

    config.translation.active_provider_config_mut().model = "llama3".to_string();

    assert_eq!(config.translation.available_providers.len(), 1);
    assert_eq!(config.translation.get_model(), "llama3");
    assert_eq!(config.translation.get_endpoint(), "http://localhost:11434");
}

#[test]
fn test_logLevel_shouldMapToFilter() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}

#[test]
fn test_providerDisplay_shouldRoundTripThroughFromStr() {
    for provider in [
        TranslationProvider::Gemini,
        TranslationProvider::OpenAI,
        TranslationProvider::Anthropic,
        TranslationProvider::Ollama,
    ] {
        assert_eq!(provider.to_string().parse::<TranslationProvider>().unwrap(), provider);
    }
}
