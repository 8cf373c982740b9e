//! Environment overrides for settings.
//!
//! Kept in its own test binary since it mutates the process environment.

use std::io::Write;

use anyhow::Result;
use tablesift_engine::Settings;
use tablesift_shared::NumberFormat;

#[test]
fn test_environment_overrides_settings_file() -> Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(file, "comma_num = false")?;
    writeln!(file, "show_excluded = true")?;

    std::env::set_var("TABLESIFT_COMMA_NUM", "true");
    let from_env = Settings::load(None);
    let from_file_and_env = Settings::load(Some(file.path()));
    std::env::remove_var("TABLESIFT_COMMA_NUM");

    let from_env = from_env?;
    assert!(from_env.comma_num);
    assert_eq!(from_env.number_format(), NumberFormat::COMMA);

    let from_file_and_env = from_file_and_env?;
    assert!(from_file_and_env.comma_num);
    assert!(from_file_and_env.show_excluded);

    let from_file = Settings::load(Some(file.path()))?;
    assert!(!from_file.comma_num);
    Ok(())
}
