use crate::cli;
use crate::config::{self, RepoDoctorConfig};
use crate::core::{ModuleImports, ViolationCounts};
use crate::debt::run_graph_rules;
use crate::extraction::{extract_sources, SourceFacts};
use crate::graph::DependencyGraph;
use crate::history::TrendAnalyzer;
use crate::io::{self, OutputFormat, OutputWriter, StructuralReport};
use crate::io::writers::{JsonWriter, TerminalWriter};
use crate::metrics::size::{check_sizes, FileSize};
use crate::organization::god_object::{check_god_objects, TypeInventory};
use crate::scoring::calculate_score;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub format: cli::OutputFormat,
    pub output: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub no_history: bool,
    pub fail_on_critical: bool,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let root = validate_root(&config.path)?;

    let settings = match &config.config_file {
        Some(file) => config::load_config_from_path(file)?,
        None => config::load_config(&root)?,
    };

    let report = analyze_project(&root, &settings)?;

    let report = if config.no_history {
        report
    } else {
        record_history(&root, report)?
    };

    write_report(&report, &settings, config.format.into(), config.output.as_deref())?;

    if config.fail_on_critical && report.has_critical() {
        anyhow::bail!(
            "{} circular dependenc{} found",
            report.circular.len(),
            if report.circular.len() == 1 { "y" } else { "ies" }
        );
    }

    Ok(())
}

fn validate_root(path: &Path) -> Result<PathBuf> {
    let root = path
        .canonicalize()
        .with_context(|| format!("path does not exist: {}", path.display()))?;
    if !io::dir_exists(&root) {
        anyhow::bail!("path is not a directory: {}", root.display());
    }
    Ok(root)
}

/// Build the dependency graph, run every enabled rule and score the result.
///
/// The returned report carries no trend; see [`record_history`].
pub fn analyze_project(root: &Path, config: &RepoDoctorConfig) -> Result<StructuralReport> {
    let files = io::find_project_files(root, config.get_ignore_patterns())?;
    log::info!("Analyzing {} source files in {}", files.len(), root.display());

    let facts = extract_sources(root, &files);
    let graph = build_graph(&facts);
    log::debug!(
        "Dependency graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let findings = run_graph_rules(&graph);

    let size = if config.rules.enable_size_rule {
        let sizes: Vec<FileSize> = facts.iter().map(|f| f.size.clone()).collect();
        check_sizes(&sizes, &config.size)
    } else {
        Vec::new()
    };

    let god_object = if config.rules.enable_god_object_rule {
        let inventories: Vec<TypeInventory> = facts.iter().map(|f| f.types.clone()).collect();
        check_god_objects(&inventories, &config.god_object)
    } else {
        Vec::new()
    };

    let counts = ViolationCounts::new(
        findings.circular.len(),
        findings.layer.len(),
        size.len(),
        god_object.len(),
    );
    let score = calculate_score(counts, &config.scoring);
    log::info!(
        "Structural score {:.1} with {} violations",
        score.total_score,
        score.violation_count
    );

    Ok(StructuralReport::new(
        root,
        score,
        findings.circular,
        findings.layer,
        size,
        god_object,
    ))
}

fn build_graph(facts: &[SourceFacts]) -> DependencyGraph {
    let imports: Vec<ModuleImports> = facts.iter().map(|f| f.imports.clone()).collect();
    DependencyGraph::from_imports(&imports)
}

/// Attach the trend against the previous run, then record this run
pub fn record_history(root: &Path, report: StructuralReport) -> Result<StructuralReport> {
    let mut history = TrendAnalyzer::load(root)?;
    let trend = history.calculate_delta(report.score.total_score);
    history.append_score(report.score.total_score)?;
    Ok(report.with_trend(trend))
}

fn write_report(
    report: &StructuralReport,
    settings: &RepoDoctorConfig,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    if output.is_some() {
        colored::control::set_override(false);
    }

    let mut buffer = Vec::new();
    {
        let mut writer: Box<dyn OutputWriter + '_> = match format {
            OutputFormat::Json => Box::new(JsonWriter::new(&mut buffer)),
            OutputFormat::Terminal => {
                Box::new(TerminalWriter::new(&mut buffer).with_weights(settings.scoring))
            }
        };
        writer.write_report(report)?;
    }

    match output {
        Some(path) => {
            let content = String::from_utf8(buffer).context("report is not valid UTF-8")?;
            io::write_file(path, &content)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            log::info!("Report written to {}", path.display());
        }
        None => {
            use std::io::Write;
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(&buffer)?;
            handle.flush()?;
        }
    }

    Ok(())
}
