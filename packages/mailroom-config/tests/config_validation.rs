use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use mailroom_config::{Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let table = root
		.as_table_mut()
		.expect("Template config must be a table.")
		.get_mut(section)
		.and_then(Value::as_table_mut)
		.unwrap_or_else(|| panic!("Template config must include [{section}]."));

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("mailroom_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse test config.")
}

#[test]
fn sample_config_is_valid() {
	let path = write_temp_config(SAMPLE_CONFIG_TEMPLATE_TOML.to_string());
	let result = mailroom_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Expected sample config to load.");

	assert_eq!(cfg.session.cookie_name, "mailroom_session");
	assert_eq!(cfg.mailbox.page_size, 50);
}

#[test]
fn mailbox_and_compose_sections_are_optional() {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let table = root.as_table_mut().expect("Template config must be a table.");

	table.remove("mailbox");
	table.remove("compose");

	let cfg: Config = toml::from_str(&toml::to_string(&root).expect("Failed to render config."))
		.expect("Failed to parse config.");

	assert_eq!(cfg.mailbox.page_size, 50);
	assert_eq!(cfg.compose.max_subject_chars, 255);
	assert!(mailroom_config::validate(&cfg).is_ok());
}

#[test]
fn missing_file_reports_read_error() {
	let mut path = env::temp_dir();

	path.push("mailroom_config_test_does_not_exist.toml");

	let err = mailroom_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error: {err:?}");
}

#[test]
fn malformed_toml_reports_parse_error() {
	let path = write_temp_config("[service\nhttp_bind = 1".to_string());
	let result = mailroom_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }), "Unexpected error: {err:?}");
}

#[test]
fn cookie_name_is_trimmed_on_load() {
	let payload =
		sample_toml_with("session", "cookie_name", Value::String("  sid  ".to_string()));
	let path = write_temp_config(payload);
	let result = mailroom_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Expected trimmed cookie name to load.");

	assert_eq!(cfg.session.cookie_name, "sid");
}

#[test]
fn cookie_name_rejects_separators() {
	let payload =
		sample_toml_with("session", "cookie_name", Value::String("mail;room".to_string()));
	let path = write_temp_config(payload);
	let result = mailroom_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected cookie name validation error.");

	assert!(
		err.to_string().contains("session.cookie_name must only contain cookie token characters."),
		"Unexpected error: {err}"
	);
}

#[test]
fn session_age_must_be_in_range() {
	let mut cfg = base_config();

	cfg.session.max_age_days = 0;

	let err = mailroom_config::validate(&cfg).expect_err("Expected max_age_days error.");

	assert!(
		err.to_string().contains("session.max_age_days must be in the range 1-400."),
		"Unexpected error: {err}"
	);

	cfg.session.max_age_days = 401;

	assert!(mailroom_config::validate(&cfg).is_err());
}

#[test]
fn page_size_must_be_in_range() {
	let mut cfg = base_config();

	cfg.mailbox.page_size = 0;

	assert!(mailroom_config::validate(&cfg).is_err());

	cfg.mailbox.page_size = 201;

	let err = mailroom_config::validate(&cfg).expect_err("Expected page_size error.");

	assert!(
		err.to_string().contains("mailbox.page_size must be in the range 1-200."),
		"Unexpected error: {err}"
	);
}

#[test]
fn pool_size_must_be_positive() {
	let mut cfg = base_config();

	cfg.storage.postgres.pool_max_conns = 0;

	let err = mailroom_config::validate(&cfg).expect_err("Expected pool size error.");

	assert!(
		err.to_string().contains("storage.postgres.pool_max_conns must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn compose_limits_must_be_positive() {
	let mut cfg = base_config();

	cfg.compose.max_body_chars = 0;

	let err = mailroom_config::validate(&cfg).expect_err("Expected compose limit error.");

	assert!(
		err.to_string().contains("compose.max_body_chars must be greater than zero."),
		"Unexpected error: {err}"
	);
}
