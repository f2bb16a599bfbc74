use pattern_lab::utils::validation::Validate;
use pattern_lab::LabConfig;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_full_settings_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[payment]
gateway_url = "http://localhost:12111"
currency = "eur"
price_id = "price_123"
transaction_log = "/tmp/pattern-lab/transactions.log"

[transcribe]
transcriber_url = "http://localhost:9000/asr"
model = "small"
work_dir = "/tmp/pattern-lab/audio"
output_dir = "/tmp/pattern-lab/out"

[singleton]
connect_delay_ms = 0
"#
    )
    .unwrap();

    let config = LabConfig::load(Some(file.path())).unwrap();
    config.validate().unwrap();

    assert_eq!(config.payment.currency, "eur");
    assert_eq!(config.payment.price_id.as_deref(), Some("price_123"));
    assert!(config.payment.api_key.is_none());
    assert_eq!(config.transcribe.model, "small");
    assert_eq!(config.singleton.connect_delay_ms, 0);
}

#[test]
fn test_missing_file_is_an_error() {
    let result = LabConfig::load(Some(std::path::Path::new("/no/such/pattern-lab.toml")));
    assert!(result.is_err());
}

#[test]
fn test_non_http_transcriber_url_is_rejected() {
    let config =
        LabConfig::from_toml_str("[transcribe]\ntranscriber_url = \"ftp://example.com/asr\"\n")
            .unwrap();

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("transcribe.transcriber_url"));
}

#[test]
fn test_malformed_toml_is_an_error() {
    assert!(LabConfig::from_toml_str("[payment\ncurrency = ").is_err());
}
