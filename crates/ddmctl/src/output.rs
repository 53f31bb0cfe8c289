//! Output formatting: JSON, compact JSON, YAML.
//!
//! Server responses are rendered in the format selected by `--output`.
//! Pretty JSON is indented with a tab.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Render a decoded server response in the chosen format.
pub fn render_value(format: OutputFormat, data: &Value) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => render_json_pretty(data),
        OutputFormat::JsonCompact => Ok(serde_json::to_string(data)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?.trim_end().to_owned()),
    }
}

fn render_json_pretty(data: &Value) -> Result<String, CliError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    data.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Decorate a success line when color is enabled.
pub fn success(line: &str, color: bool) -> String {
    if color {
        line.green().to_string()
    } else {
        line.to_owned()
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn pretty_json_uses_tabs() {
        let out = render_value(OutputFormat::Json, &json!({ "active": true })).unwrap();
        assert_eq!(out, "{\n\t\"active\": true\n}");
    }

    #[test]
    fn compact_json_is_single_line() {
        let out = render_value(OutputFormat::JsonCompact, &json!(["a", "b"])).unwrap();
        assert_eq!(out, r#"["a","b"]"#);
    }

    #[test]
    fn yaml_has_no_trailing_newline() {
        let out = render_value(OutputFormat::Yaml, &json!({ "set": "lab" })).unwrap();
        assert_eq!(out, "set: lab");
    }

    #[test]
    fn success_is_plain_without_color() {
        assert_eq!(success("done", false), "done");
        assert_ne!(success("done", true), "done");
    }
}
