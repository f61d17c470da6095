use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use typepath_model::{ModelDirectory, TypeKind};

#[derive(Args, Debug)]
pub struct CheckModelArgs {
    /// Model definition file to validate
    pub model: PathBuf,
}

pub fn check_model(args: CheckModelArgs, _cwd: &str) -> Result<()> {
    let model = ModelDirectory::load(&args.model)
        .with_context(|| format!("Invalid model {}", args.model.display()))?;

    println!("{} {}", "✓".green(), args.model.display());
    println!("   Types: {}", model.len());
    println!("   Resources: {}", model.count_by_kind(TypeKind::Resource));
    println!("   Complex: {}", model.count_by_kind(TypeKind::Complex));
    println!("   Primitives: {}", model.count_by_kind(TypeKind::Primitive));

    Ok(())
}
