//! Processing API for call-chain sources
//!
//! This module exposes each pipeline stage (tokens, parsed chain, canonical pair) in
//! several output formats, selected with a `stage-format` string:
//!
//! ```text
//! token-simple       token-json
//! ast-simple         ast-json         ast-yaml
//! canonical-simple   canonical-json
//! ```
//!
//! `canonical-simple` is exactly [crate::compile]: errors come back as the output text.
//! Every other format reports compile errors as [ProcessingError::Compile].

use crate::chain::error::CompileError;
use crate::chain::lexing::tokenize;
use crate::chain::parsing::parse;
use crate::chain::pipeline::{compile_with, try_compile_with, CompileOptions};
use crate::chain::token::Token;
use std::fmt;
use std::fs;
use std::path::Path;

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
    Canonical,
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Yaml,
}

/// Represents a complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "canonical-json"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let (stage, format) = format_str
            .split_once('-')
            .ok_or_else(|| ProcessingError::InvalidFormat(format_str.to_string()))?;

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            "canonical" => ProcessingStage::Canonical,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "yaml" => OutputFormat::Yaml,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        let spec = ProcessingSpec { stage, format };
        if !Self::available_specs().contains(&spec) {
            return Err(ProcessingError::InvalidFormatType(format!(
                "Format '{}' not supported for {} stage",
                format_str,
                stage_name(stage)
            )));
        }
        Ok(spec)
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        [
            (ProcessingStage::Token, OutputFormat::Simple),
            (ProcessingStage::Token, OutputFormat::Json),
            (ProcessingStage::Ast, OutputFormat::Simple),
            (ProcessingStage::Ast, OutputFormat::Json),
            (ProcessingStage::Ast, OutputFormat::Yaml),
            (ProcessingStage::Canonical, OutputFormat::Simple),
            (ProcessingStage::Canonical, OutputFormat::Json),
        ]
        .into_iter()
        .map(|(stage, format)| ProcessingSpec { stage, format })
        .collect()
    }
}

impl fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = match self.format {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        };
        write!(f, "{}-{}", stage_name(self.stage), format)
    }
}

fn stage_name(stage: ProcessingStage) -> &'static str {
    match stage {
        ProcessingStage::Token => "token",
        ProcessingStage::Ast => "ast",
        ProcessingStage::Canonical => "canonical",
    }
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingError {
    InvalidFormat(String),
    InvalidStage(String),
    InvalidFormatType(String),
    Compile(CompileError),
    SerializationError(String),
    IoError(String),
}

impl std::error::Error for ProcessingError {}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::InvalidFormat(format) => write!(f, "Invalid format: {}", format),
            ProcessingError::InvalidStage(stage) => write!(f, "Invalid stage: {}", stage),
            ProcessingError::InvalidFormatType(format_type) => {
                write!(f, "Invalid format type: {}", format_type)
            }
            ProcessingError::Compile(err) => write!(f, "{}", err),
            ProcessingError::SerializationError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            ProcessingError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl From<CompileError> for ProcessingError {
    fn from(err: CompileError) -> Self {
        ProcessingError::Compile(err)
    }
}

/// Process one source according to the given specification
pub fn process_source(
    source: &str,
    spec: &ProcessingSpec,
    options: CompileOptions,
) -> Result<String, ProcessingError> {
    match (spec.stage, spec.format) {
        (ProcessingStage::Token, format) => format_tokens(&tokenize(source), format),
        (ProcessingStage::Ast, format) => {
            let chain = parse(source)?;
            match format {
                OutputFormat::Simple => Ok(chain.to_string()),
                OutputFormat::Json => to_json(&chain),
                OutputFormat::Yaml => to_yaml(&chain),
            }
        }
        (ProcessingStage::Canonical, OutputFormat::Simple) => Ok(compile_with(source, options)),
        (ProcessingStage::Canonical, OutputFormat::Json) => {
            to_json(&try_compile_with(source, options)?)
        }
        (ProcessingStage::Canonical, OutputFormat::Yaml) => Err(
            ProcessingError::InvalidFormatType("canonical-yaml".to_string()),
        ),
    }
}

/// Process a file line by line; blank lines are skipped.
///
/// Each non-blank line is processed on its own, so one failing line does not hide
/// the output of the others. Only an unreadable file fails the whole call.
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    options: CompileOptions,
) -> Result<Vec<LineOutcome>, ProcessingError> {
    let content =
        fs::read_to_string(file_path).map_err(|e| ProcessingError::IoError(e.to_string()))?;

    Ok(content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| LineOutcome {
            line: index + 1,
            result: process_source(line, spec, options),
        })
        .collect())
}

/// Result of processing one line of a file
#[derive(Debug, Clone, PartialEq)]
pub struct LineOutcome {
    /// 1-based line number in the source file
    pub line: usize,
    pub result: Result<String, ProcessingError>,
}

/// Format tokens according to the specified output format.
pub fn format_tokens(tokens: &[Token], format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => Ok(tokens
            .iter()
            .map(|token| token.to_string())
            .collect::<Vec<_>>()
            .join(" ")),
        OutputFormat::Json => to_json(&tokens),
        OutputFormat::Yaml => Err(ProcessingError::InvalidFormatType(
            "token-yaml".to_string(),
        )),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ProcessingError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ProcessingError::SerializationError(e.to_string()))
}

/// serde_yaml rejects nested enums such as `Call(Map(Binary {..}))`, so the tree goes
/// through a JSON value first
fn to_yaml<T: serde::Serialize>(value: &T) -> Result<String, ProcessingError> {
    let value = serde_json::to_value(value)
        .map_err(|e| ProcessingError::SerializationError(e.to_string()))?;
    serde_yaml::to_string(&value).map_err(|e| ProcessingError::SerializationError(e.to_string()))
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .into_iter()
        .map(|spec| spec.to_string())
        .collect()
}
