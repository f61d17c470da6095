use crate::config::{Config, OutputFormat};
use crate::params::{load_definitions, SearchParamType, SearchParameterDefinition};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};
use typepath_inference::{ResolutionResult, Resolver, ResolverOptions};
use typepath_model::ModelDirectory;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Search parameter definition file (one definition or an array)
    pub params: PathBuf,

    /// Model definition file (overrides config)
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Output format (overrides config)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Fail on paths through undeclared fields
    #[arg(long)]
    pub strict: bool,

    /// Report every traversal result, duplicates included
    #[arg(long)]
    pub raw: bool,
}

/// Outcome of resolving one definition
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionReport {
    pub name: String,
    pub resource_type: String,
    pub results: Vec<ResultEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResultEntry {
    #[serde(rename = "type")]
    pub type_name: String,
    pub category: SearchParamType,
    pub path: Option<String>,
}

impl DefinitionReport {
    pub fn is_mapped(&self) -> bool {
        self.error.is_none() && !self.results.is_empty()
    }
}

impl From<ResolutionResult<SearchParamType>> for ResultEntry {
    fn from(result: ResolutionResult<SearchParamType>) -> Self {
        Self {
            type_name: result.type_name().to_string(),
            category: result.category,
            path: result.path,
        }
    }
}

pub fn resolve(args: ResolveArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;

    let model_path = args
        .model
        .clone()
        .or_else(|| config.get_model_path(cwd))
        .ok_or_else(|| anyhow!("No model file given; pass --model or set \"model\" in the config file"))?;
    let format = args.format.unwrap_or(config.format);
    let options = ResolverOptions {
        deduplicate: !args.raw,
        strict: args.strict || config.strict,
    };

    let model = ModelDirectory::load(&model_path)
        .with_context(|| format!("Failed to load model {}", model_path.display()))?;
    let definitions = load_definitions(&args.params)?;

    debug!(
        types = model.len(),
        definitions = definitions.len(),
        "Loaded model {}",
        model_path.display()
    );

    let resolver = Resolver::with_options(&model, options);
    let reports: Vec<DefinitionReport> = definitions
        .iter()
        .map(|definition| resolve_definition(&resolver, definition))
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => print_text(&reports),
    }

    let unmapped = reports.iter().filter(|report| !report.is_mapped()).count();
    if unmapped > 0 {
        return Err(anyhow!(
            "{} of {} definitions could not be mapped",
            unmapped,
            reports.len()
        ));
    }

    Ok(())
}

pub fn resolve_definition(
    resolver: &Resolver<'_, ModelDirectory>,
    definition: &SearchParameterDefinition,
) -> DefinitionReport {
    let components = definition.component_pairs();

    let outcome = resolver.resolve(
        &definition.resource_type,
        (definition.param_type, &definition.expression),
        &components,
    );

    let (results, error) = match outcome {
        Ok(results) => (results.into_iter().map(ResultEntry::from).collect(), None),
        Err(err) => {
            warn!("Could not resolve '{}': {}", definition.name, err);
            (Vec::new(), Some(err.to_string()))
        }
    };

    DefinitionReport {
        name: definition.name.clone(),
        resource_type: definition.resource_type.clone(),
        results,
        error,
    }
}

/// `name (Resource): Type [category] path`, one line per result
pub fn format_result_line(report: &DefinitionReport, entry: &ResultEntry) -> String {
    format!(
        "{} ({}): {} [{}] {}",
        report.name,
        report.resource_type,
        entry.type_name,
        entry.category,
        entry.path.as_deref().unwrap_or("-")
    )
}

fn print_text(reports: &[DefinitionReport]) {
    for report in reports {
        if let Some(error) = &report.error {
            eprintln!(
                "  {} {} ({}): {}",
                "✗".red(),
                report.name,
                report.resource_type,
                error.red()
            );
            continue;
        }

        if report.results.is_empty() {
            println!(
                "  {} {} ({}): {}",
                "⚠".yellow(),
                report.name,
                report.resource_type,
                "not mapped".yellow()
            );
            continue;
        }

        for entry in &report.results {
            println!("  {} {}", "✓".green(), format_result_line(report, entry));
        }
    }

    let mapped = reports.iter().filter(|report| report.is_mapped()).count();
    println!();
    println!("Mapped {} of {} definitions", mapped, reports.len());
}
