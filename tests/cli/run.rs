use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use serde_json::{Map, Value};

use crate::{CliTest, stderr, stdout};

/// Generated keys are random; replace their hex part.
fn redact(text: &str) -> String {
    let key = regex::Regex::new(r"\b([A-Za-z0-9_-]+)\.[0-9a-f]{8}\b").unwrap();
    key.replace_all(text, "$1.[KEY]").into_owned()
}

const LOGIN: &str = r#"import { useState } from "react";

export function Login({ name }) {
  const [hint] = useState(`欢迎${name}回来`);
  console.log("渲染登录");
  return (
    <form className="登录">
      <input placeholder="请输入用户名" />
      <button>登录</button>
    </form>
  );
}
"#;

#[test]
fn test_run_rewrites_sources_and_writes_resource() -> Result<()> {
    let test = CliTest::with_file("src/Login.jsx", LOGIN)?;

    let output = test.run_command().output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "✓ Replaced 3 hardcoded texts in 1 file\n✓ Wrote 3 translations to src/locales/zh.js\n"
    );

    assert_snapshot!(redact(&test.read_file("src/Login.jsx")?), @r#"
    import t from "@/i18n";
    import { useState } from "react";

    export function Login({ name }) {
      const [hint] = useState(t("Login.[KEY]" /* 欢迎{{name}}回来 */, { name }));
      console.log("渲染登录");
      return (
        <form className="登录">
          <input placeholder={t("Login.[KEY]" /* 请输入用户名 */)} />
          <button>{t("Login.[KEY]" /* 登录 */)}</button>
        </form>
      );
    }
    "#);

    let resource = test.read_file("src/locales/zh.js")?;
    assert!(resource.starts_with("export default {\n"));
    assert!(resource.contains(": \"欢迎{{name}}回来\",\n"));
    assert!(resource.contains(": \"请输入用户名\",\n"));
    assert!(resource.contains(": \"登录\",\n"));

    Ok(())
}

#[test]
fn test_second_run_leaves_sources_alone() -> Result<()> {
    let test = CliTest::with_file("src/Login.jsx", LOGIN)?;

    test.run_command().output()?;
    let first = test.read_file("src/Login.jsx")?;

    let output = test.run_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "✓ Checked 1 source file - no hardcoded text found\n✓ Wrote 0 translations to src/locales/zh.js\n"
    );
    assert_eq!(test.read_file("src/Login.jsx")?, first);
    // The module only holds what this run registered.
    assert_eq!(test.read_file("src/locales/zh.js")?, "export default {\n};\n");

    Ok(())
}

#[test]
fn test_check_reports_and_exits_with_failure() -> Result<()> {
    let test = CliTest::with_file("src/Login.jsx", LOGIN)?;
    test.write_file("src/util.ts", "export const n = 1;\n")?;

    let output = test.run_command().arg("--check").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "  src/Login.jsx 3 texts\n✘ Found 3 hardcoded texts in 1 of 2 source files\n"
    );
    assert_eq!(test.read_file("src/Login.jsx")?, LOGIN);
    assert!(!test.root().join("src/locales").exists());

    Ok(())
}

#[test]
fn test_paths_and_flags_override_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".i18nifyrc.json",
        r#"{ "entries": ["src"], "locale": "zh", "keyPrefix": "web" }"#,
    )?;
    test.write_file("src/a.ts", "export const a = \"你好\";\n")?;
    test.write_file("pages/home.ts", "export const title = \"Welcome home\";\n")?;

    let output = test
        .run_command()
        .args([
            "pages",
            "--locale",
            "en",
            "--out-dir",
            "i18n",
            "--format",
            "json",
            "--import-path",
            "~/i18n",
        ])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    assert_eq!(test.read_file("src/a.ts")?, "export const a = \"你好\";\n");
    assert_snapshot!(redact(&test.read_file("pages/home.ts")?), @r#"
    import t from "~/i18n";
    export const title = t("web.[KEY]" /* Welcome home */);
    "#);

    let emitted: Map<String, Value> = serde_json::from_str(&test.read_file("i18n/en.json")?)?;
    assert_eq!(emitted.len(), 1);
    assert_eq!(
        emitted.values().next(),
        Some(&Value::String("Welcome home".to_string()))
    );

    Ok(())
}

#[test]
fn test_parse_error_exits_with_error() -> Result<()> {
    let test = CliTest::with_file("src/broken.ts", "export const = \"你好\";\n")?;

    let output = test.run_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.starts_with("Error: failed to parse "), "stderr: {}", err);
    assert!(err.contains("broken.ts:1:"), "stderr: {}", err);
    assert!(!test.root().join("src/locales").exists());

    Ok(())
}

#[test]
fn test_missing_entry_exits_with_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run_command().arg("nope").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("entry path does not exist"),
        "stderr: {}",
        stderr(&output)
    );

    Ok(())
}

#[test]
fn test_invalid_config_exits_with_error() -> Result<()> {
    let test = CliTest::with_file(".i18nifyrc.json", r#"{ "translateIdentifier": "i18n.t" }"#)?;

    let output = test.run_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("translateIdentifier"));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Usage:"));

    Ok(())
}
