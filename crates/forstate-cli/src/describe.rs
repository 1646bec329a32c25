//! # Describe Subcommand
//!
//! Prints the demo class's methods and the states each one handles.

use anyhow::Context;
use clap::Args;

use crate::config::CliConfig;
use crate::demo::turnstile_class;

/// Arguments for the describe subcommand.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Render the demo class description.
pub fn render(args: &DescribeArgs, config: &CliConfig) -> anyhow::Result<String> {
    let class = turnstile_class(&config.registrar).context("demo class failed to build")?;
    let description = class.describe();
    if args.json {
        serde_json::to_string_pretty(&description).context("failed to serialize description")
    } else {
        Ok(description.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_output() {
        let out = render(&DescribeArgs { json: false }, &CliConfig::default()).unwrap();
        assert!(out.starts_with("class Turnstile"));
        assert!(out.contains("  push [locked, unlocked]"));
        assert!(out.contains("  inspect [<ANY_STATE>]"));
        assert!(out.contains("  status (plain)"));
    }

    #[test]
    fn test_json_output() {
        let out = render(&DescribeArgs { json: true }, &CliConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["name"], "Turnstile");
        let coin = value["methods"]
            .as_array()
            .unwrap()
            .iter()
            .find(|m| m["name"] == "coin")
            .unwrap();
        assert_eq!(coin["states"], serde_json::json!(["broken", "locked", "unlocked"]));
        assert_eq!(coin["fallback"], false);
    }
}
