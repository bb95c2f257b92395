//! CLI entry point for s2s-codegen

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use s2s_codegen::codegen::{parse_tables, plan_artifacts, TemplateSelector};
use s2s_codegen::config::{validation, BuildTool, CodegenConfig, OrmFramework};
use s2s_codegen::output::{self, PathGuard};

#[derive(Parser)]
#[command(name = "s2s-codegen")]
#[command(about = "Generate a Spring Boot backend project from SQL CREATE TABLE statements")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to SQL schema file (overrides config)
    #[arg(short, long)]
    sql: Option<PathBuf>,

    /// Directory the project directory is created in (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// DDL dialect: mysql or postgresql (defaults to the database type)
    #[arg(short, long)]
    dialect: Option<String>,

    /// Directory holding the template files (overrides config)
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// Project name (overrides config)
    #[arg(long)]
    project_name: Option<String>,

    /// Base Java package (overrides config)
    #[arg(long)]
    package_name: Option<String>,

    /// ORM framework: mybatis, mybatis-plus or jpa
    #[arg(long)]
    orm: Option<OrmFramework>,

    /// Build tool: maven or gradle
    #[arg(long)]
    build_tool: Option<BuildTool>,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the project (default)
    Generate,
    /// Inspect schema (show parsed tables for debugging)
    Inspect {
        /// Print the parsed tables as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the artifacts with their templates and target paths
    Plan,
    /// Zip a generated project into <output>/<project>.zip
    Pack,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = CodegenConfig::load(cli.config.as_deref())?;

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    // Apply CLI overrides
    if let Some(sql) = cli.sql {
        config.sql_file = sql;
    }
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    if let Some(dialect) = cli.dialect {
        config.dialect = Some(dialect);
    }
    if let Some(templates) = cli.templates {
        config.templates_dir = templates;
    }
    if let Some(name) = cli.project_name {
        config.project_name = name;
    }
    if let Some(name) = cli.package_name {
        config.package_name = name;
    }
    if let Some(orm) = cli.orm {
        config.tech_stack.orm_framework = orm;
    }
    if let Some(build_tool) = cli.build_tool {
        config.tech_stack.build_tool = build_tool;
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    match cli.command.unwrap_or(Commands::Generate) {
        Commands::Inspect { json } => inspect_schema(&config, json),
        Commands::Plan => plan_project(&config),
        Commands::Pack => pack(&config),
        Commands::Generate => {
            info!("Generating project from schema: {:?}", config.sql_file);
            let placements = s2s_codegen::generate(&config)?;

            if config.dry_run {
                println!("Dry run mode - would generate:");
                for placement in &placements {
                    println!("  {}", placement.absolute_path.display());
                }
            } else {
                info!("Code generation completed successfully");
            }
            Ok(())
        }
    }
}

fn read_sql(config: &CodegenConfig) -> Result<String> {
    config.validate()?;
    validation::read_sql_file(&config.sql_file)
        .with_context(|| format!("Failed to read {}", config.sql_file.display()))
}

fn inspect_schema(config: &CodegenConfig, json: bool) -> Result<()> {
    let sql = read_sql(config)?;
    let project = config.project_metadata();
    let tables = parse_tables(&sql, config.dialect.as_deref(), &project)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tables)?);
        return Ok(());
    }

    println!("Parsed {} tables:\n", tables.len());
    for table in &tables {
        println!("Table: {} -> {}", table.table_name(), table.class_name());
        if !table.table_comment().is_empty() {
            println!("  Comment: {}", table.table_comment());
        }
        println!("  Columns:");
        for col in table.columns() {
            let nullable = if col.nullable() { "NULL" } else { "NOT NULL" };
            let pk = if col.is_primary_key() { " PRIMARY KEY" } else { "" };
            println!(
                "    - {} {} {}{} -> {} {}",
                col.column_name(),
                col.raw_db_type(),
                nullable,
                pk,
                col.mapped_type(),
                col.property_name()
            );
            if let Some(default) = col.default_value() {
                println!("      DEFAULT {}", default);
            }
        }
        match table.primary_key_column() {
            Some(pk) => println!("  Primary Key: {} ({})", pk, table.primary_key_type()),
            None => println!("  Primary Key: none ({} assumed)", table.primary_key_type()),
        }
        if !table.imports().is_empty() {
            println!("  Imports:");
            for import in table.imports() {
                println!("    - {}", import);
            }
        }
        println!();
    }

    Ok(())
}

fn plan_project(config: &CodegenConfig) -> Result<()> {
    let sql = read_sql(config)?;
    let project = config.project_metadata();
    let tables = parse_tables(&sql, config.dialect.as_deref(), &project)?;
    let plan = plan_artifacts(
        &tables,
        &project,
        &TemplateSelector::standard(),
        config.max_tables,
    )?;

    let project_dir = project.project_dir();
    println!(
        "{} artifacts for {} ({} + {}):\n",
        plan.len(),
        project.project_name,
        project.tech_stack.orm_framework,
        project.tech_stack.build_tool
    );
    for artifact in &plan {
        let name = output::sanitize_filename(&artifact.file_name)?;
        let path = output::resolve(&name, &project.package_name);
        println!(
            "  {:<40} {:<40} {}",
            artifact.file_name,
            artifact.template,
            project_dir.join(path).display()
        );
    }
    Ok(())
}

fn pack(config: &CodegenConfig) -> Result<()> {
    config.validate_project()?;
    let project = config.project_metadata();
    let guard = PathGuard::new(config.allowed_base_dir())?;

    let bytes = output::pack_project(project.project_dir(), &guard)?;
    let archive = s2s_codegen::archive_path(config);
    let archive = guard.validate_dir(&archive)?;
    std::fs::write(&archive, &bytes)
        .with_context(|| format!("Failed to write {}", archive.display()))?;

    println!("Packed {} ({} bytes)", archive.display(), bytes.len());
    Ok(())
}
