use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in [
        "entries",
        "outputDir",
        "locale",
        "importPath",
        "translateIdentifier",
        "excludes",
        "outputFormat",
        "formatter",
    ] {
        assert!(
            parsed.get(field).is_some(),
            "Config should have '{}' field",
            field
        );
    }
    assert_eq!(parsed["locale"], "zh");
    assert_eq!(parsed["translateIdentifier"], "t");

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "✓ Created .i18nifyrc.json\n");

    let content = test.read_file(".i18nifyrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".i18nifyrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Error: .i18nifyrc.json already exists\n");
    assert_eq!(test.read_file(".i18nifyrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("src/app.tsx", "export const App = () => <div>你好</div>;\n")?;

    let output = test.run_command().output()?;
    assert!(
        output.status.success(),
        "Run should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(test.root().join("src/locales/zh.js").exists());

    Ok(())
}
