//! AHP Engine CLI (ahp-engine) - Main entry point
//!
//! Analyzes pairwise comparison hierarchies stored as YAML or JSON files,
//! and manages hierarchies kept in the configured data directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ahp_engine::adapters::{
    exporter_for, read_hierarchy_file, write_hierarchy_file, FileHierarchyStorage,
};
use ahp_engine::application::{
    AnalyzeHierarchyCommand, AnalyzeHierarchyHandler, CreateHierarchyCommand,
    CreateHierarchyHandler, EditHierarchyCommand, EditHierarchyHandler, HierarchyEdit,
    HierarchyLocks, HierarchyTemplate,
};
use ahp_engine::config::{AppConfig, LoggingConfig};
use ahp_engine::domain::ahp::reference::{default_hierarchy, reference_hierarchy};
use ahp_engine::domain::ahp::{
    AhpAnalyzer, AnalysisReport, EntityKind, Hierarchy, HierarchyLimits, MatrixRef,
};
use ahp_engine::domain::foundation::HierarchyId;
use ahp_engine::ports::HierarchyRepository;

/// Command-line arguments for ahp-engine
#[derive(Parser, Debug)]
#[command(name = "ahp-engine")]
#[command(about = "Analytic Hierarchy Process priority engine")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a hierarchy file and print the report
    Analyze {
        file: PathBuf,
        /// Output format (csv or json)
        #[arg(short, long, default_value = "csv")]
        format: String,
    },
    /// Analyze the bundled reference dataset
    Reference {
        #[arg(short, long, default_value = "csv")]
        format: String,
    },
    /// Check a hierarchy file and list every violation
    Validate { file: PathBuf },
    /// Write a starter hierarchy file
    Init {
        file: PathBuf,
        /// Use the reference judgments instead of neutral ones
        #[arg(long)]
        reference: bool,
    },
    /// Print matrix and comparison counts for a hierarchy file
    Summary { file: PathBuf },
    /// Copy a hierarchy file into the data directory
    Store { file: PathBuf },
    /// List hierarchies in the data directory
    List,
    /// Analyze a hierarchy from the data directory
    AnalyzeStored {
        id: HierarchyId,
        #[arg(short, long, default_value = "csv")]
        format: String,
    },
    /// Record one judgment in a stored hierarchy
    SetJudgment {
        id: HierarchyId,
        /// Criterion whose alternative matrix to edit; omit for the criteria matrix
        #[arg(long)]
        criterion: Option<String>,
        row: usize,
        col: usize,
        value: f64,
    },
    /// Replace the goal of a stored hierarchy
    SetGoal { id: HierarchyId, goal: String },
    /// Add an alternative to a stored hierarchy
    AddAlternative { id: HierarchyId, name: String },
    /// Add a criterion to a stored hierarchy
    AddCriterion { id: HierarchyId, name: String },
    /// Remove the alternative at a 0-based index
    RemoveAlternative { id: HierarchyId, index: usize },
    /// Remove the criterion at a 0-based index, with its alternative matrix
    RemoveCriterion { id: HierarchyId, index: usize },
    /// Rename the alternative at a 0-based index
    RenameAlternative {
        id: HierarchyId,
        index: usize,
        name: String,
    },
    /// Rename the criterion at a 0-based index
    RenameCriterion {
        id: HierarchyId,
        index: usize,
        name: String,
    },
}

impl Command {
    /// Splits a stored-hierarchy edit into its target and the edit to apply.
    fn into_edit(self) -> Result<(HierarchyId, HierarchyEdit), Command> {
        let (id, edit) = match self {
            Command::SetJudgment {
                id,
                criterion,
                row,
                col,
                value,
            } => {
                let matrix = criterion.map_or(MatrixRef::Criteria, MatrixRef::Alternatives);
                let edit = HierarchyEdit::SetJudgment {
                    matrix,
                    row,
                    col,
                    value,
                };
                (id, edit)
            }
            Command::SetGoal { id, goal } => (id, HierarchyEdit::SetGoal { goal }),
            Command::AddAlternative { id, name } => {
                let kind = EntityKind::Alternative;
                (id, HierarchyEdit::AddEntity { kind, name })
            }
            Command::AddCriterion { id, name } => {
                let kind = EntityKind::Criterion;
                (id, HierarchyEdit::AddEntity { kind, name })
            }
            Command::RemoveAlternative { id, index } => {
                let kind = EntityKind::Alternative;
                (id, HierarchyEdit::RemoveEntity { kind, index })
            }
            Command::RemoveCriterion { id, index } => {
                let kind = EntityKind::Criterion;
                (id, HierarchyEdit::RemoveEntity { kind, index })
            }
            Command::RenameAlternative { id, index, name } => {
                let kind = EntityKind::Alternative;
                let edit = HierarchyEdit::RenameEntity {
                    kind,
                    index,
                    new_name: name,
                };
                (id, edit)
            }
            Command::RenameCriterion { id, index, name } => {
                let kind = EntityKind::Criterion;
                let edit = HierarchyEdit::RenameEntity {
                    kind,
                    index,
                    new_name: name,
                };
                (id, edit)
            }
            other => return Err(other),
        };
        Ok((id, edit))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    init_tracing(&config.logging);

    run(args.command, &config).await
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    // Logs go to stderr so reports on stdout stay machine-readable.
    let json_layer = logging.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_layer = (!logging.json)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(command: Command, config: &AppConfig) -> Result<()> {
    let analyzer = AhpAnalyzer::new(config.consistency.checker());
    let limits = config.hierarchy.limits();
    let repository: Arc<dyn HierarchyRepository> = Arc::new(FileHierarchyStorage::new(
        &config.storage.data_dir,
        config.storage.format,
    ));
    let analyze_handler = AnalyzeHierarchyHandler::new(repository.clone(), analyzer, limits);

    match command {
        Command::Analyze { file, format } => {
            let hierarchy = load(&file).await?;
            let report = analyze_handler.analyze(hierarchy)?;
            print_report(&report, &format)
        }
        Command::Reference { format } => {
            let report = analyze_handler.analyze(reference_hierarchy()?)?;
            print_report(&report, &format)
        }
        Command::Validate { file } => {
            let hierarchy = load(&file).await?.with_limits(limits);
            let validation = hierarchy.validate();
            if validation.is_valid {
                println!("{}: valid", file.display());
                return Ok(());
            }
            for error in &validation.errors {
                println!("{}", error);
            }
            bail!(
                "{} has {} violation(s)",
                file.display(),
                validation.errors.len()
            )
        }
        Command::Init { file, reference } => {
            let hierarchy = if reference {
                reference_hierarchy()?
            } else {
                default_hierarchy()?
            };
            write_hierarchy_file(&file, &hierarchy)
                .await
                .with_context(|| format!("Failed to write {}", file.display()))?;
            info!(path = %file.display(), reference, "Hierarchy file written");
            Ok(())
        }
        Command::Summary { file } => {
            let summary = load(&file).await?.summary();
            println!("Goal: {}", summary.goal);
            println!("Criteria: {}", summary.criteria_count);
            println!("Alternatives: {}", summary.alternative_count);
            println!("Matrices: {}", summary.total_matrices);
            println!("Comparisons: {}", summary.total_comparisons);
            Ok(())
        }
        Command::Store { file } => {
            let hierarchy = load(&file).await?;
            let handler = CreateHierarchyHandler::new(repository, limits);
            let result = handler
                .handle(CreateHierarchyCommand {
                    template: HierarchyTemplate::Imported(hierarchy),
                })
                .await?;
            println!("{}", result.id);
            Ok(())
        }
        Command::List => {
            for id in repository.list_ids().await? {
                println!("{}", id);
            }
            Ok(())
        }
        Command::AnalyzeStored { id, format } => {
            let report = analyze_handler
                .handle(AnalyzeHierarchyCommand { hierarchy_id: id })
                .await?;
            print_report(&report, &format)
        }
        edit_command => {
            let (id, edit_cmd) = edit_command
                .into_edit()
                .map_err(|other| anyhow!("{:?} is not a hierarchy edit", other))?;
            edit(repository, limits, id, edit_cmd).await
        }
    }
}

async fn edit(
    repository: Arc<dyn HierarchyRepository>,
    limits: HierarchyLimits,
    id: HierarchyId,
    edit: HierarchyEdit,
) -> Result<()> {
    let handler = EditHierarchyHandler::new(repository, HierarchyLocks::new(), limits);
    let result = handler
        .handle(EditHierarchyCommand {
            hierarchy_id: id,
            edit,
        })
        .await?;

    println!("{:?}", result.outcome);
    for warning in &result.validation.errors {
        println!("warning: {}", warning);
    }
    Ok(())
}

async fn load(path: &Path) -> Result<Hierarchy> {
    read_hierarchy_file(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

fn print_report(report: &AnalysisReport, format: &str) -> Result<()> {
    let Some(exporter) = exporter_for(format) else {
        bail!("Unknown format '{}', expected csv or json", format);
    };
    print!("{}", exporter.export(report)?);
    Ok(())
}
