//! Subcommand implementations.

use std::path::Path;
use std::process::ExitCode;

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use serde::Serialize;
use serde_json::{Value, json};
use toolsmith_tool::{
    Normalizer, Tool, ToolSpecCompiler, build_tool_config, check_tool, check_tool_input,
};

use crate::config::Config;

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).wrap_err_with(|| format!("cannot read {}", path.display()))
}

fn read_json(path: &Path) -> Result<Value> {
    let text = read_text(path)?;
    serde_json::from_str(&text).wrap_err_with(|| format!("{} is not valid JSON", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the normalized parameter list.
///
/// With `raw_string` the file text itself is the payload, so unparseable
/// content yields an empty list rather than an error.
pub fn normalize(config: &Config, file: &Path, raw_string: bool) -> Result<ExitCode> {
    let raw = if raw_string {
        Value::String(read_text(file)?)
    } else {
        read_json(file)?
    };

    let params = Normalizer::with_config(config.normalize.clone()).normalize(&raw);
    tracing::info!(count = params.len(), "normalized parameters");
    print_json(&params)?;
    Ok(ExitCode::SUCCESS)
}

/// Print `valid`, or the validation failure with a failing exit code
pub fn validate(file: &Path) -> Result<ExitCode> {
    let value = read_json(file)?;
    match check_tool(&value) {
        Ok(tool) => {
            tracing::debug!(tool_id = %tool.id, "tool is valid");
            println!("valid");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("invalid: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Print a compiled spec for a single tool, or a `toolConfig` for an array.
///
/// Array entries that fail validation are logged and left out.
pub fn compile(config: &Config, file: &Path, select: &[String]) -> Result<ExitCode> {
    let value = read_json(file)?;
    let compiler = ToolSpecCompiler::with_config(config.compile.clone());

    match value {
        Value::Array(items) => {
            let tools: Vec<Tool> = items
                .iter()
                .enumerate()
                .filter_map(|(index, item)| match check_tool(item) {
                    Ok(tool) => Some(tool),
                    Err(e) => {
                        tracing::warn!(index, reason = %e, "skipping invalid tool");
                        None
                    }
                })
                .collect();
            let tool_config = build_tool_config(&tools, Some(select), &compiler);
            tracing::info!(tools = tool_config.len(), "assembled toolConfig");
            print_json(&json!({ "toolConfig": tool_config }))?;
        }
        single => {
            let spec = compiler
                .compile_value(&single)
                .map_err(|e| eyre!("tool cannot be compiled: {}", e))?;
            print_json(&spec)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Print argument errors as a JSON object; empty when the input is accepted
pub fn check_input(config: &Config, tool: &Path, input: &Path) -> Result<ExitCode> {
    let tool = read_json(tool)?;
    let input = read_json(input)?;

    let spec = ToolSpecCompiler::with_config(config.compile.clone())
        .compile_value(&tool)
        .map_err(|e| eyre!("tool cannot be compiled: {}", e))?;

    match check_tool_input(&spec, &input) {
        Ok(()) => {
            print_json(&json!({}))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(errors) => {
            print_json(&errors)?;
            Ok(ExitCode::FAILURE)
        }
    }
}
