//! NestForge command-line interface.
//!
//! A thin shell over `nestforge_engine`: argument parsing, console output,
//! and the choice of sink. All generation semantics live in the engine.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};

use nestforge_engine::codegen::project::scaffold_project;
use nestforge_engine::model::demo_blueprint;
use nestforge_engine::{
    ArchitectureMode, ArtifactSink, Blueprint, Cardinality, Entity, FieldType, FsSink,
    GenerationReport, GenerationSession, GeneratorConfig, GeneratorError, MemorySink, OrmProfile,
    RelationDecl,
};

mod ui;

#[derive(Parser)]
#[command(name = "nestforge")]
#[command(version)]
#[command(about = "Scaffold clean-architecture NestJS backends from an entity graph")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a new project frame, optionally generating blueprint entities
    New {
        /// Project name
        name: String,

        /// Output directory (defaults to the project name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Blueprint whose entities are generated into the fresh project
        #[arg(short, long)]
        blueprint: Option<PathBuf>,

        #[command(flatten)]
        options: ConfigArgs,
    },

    /// Generate one entity module into an existing project
    #[command(alias = "g")]
    Generate {
        /// Entity name, singular (e.g. `post`)
        name: String,

        /// Comma-separated field list, e.g. "title:string,body:text"
        #[arg(short, long, default_value = "")]
        fields: String,

        /// Relation as target:cardinality, e.g. "post:n-1"
        #[arg(short, long)]
        relation: Option<String>,

        /// Project directory
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// List what would change without touching the project
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        options: ConfigArgs,
    },

    /// Generate every entity of a blueprint into an existing project
    Apply {
        /// Blueprint file
        blueprint: PathBuf,

        /// Project directory
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// List what would change without touching the project
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        options: ConfigArgs,
    },

    /// Run a blueprint against an in-memory project and report findings
    Check {
        /// Blueprint file
        blueprint: PathBuf,

        #[command(flatten)]
        options: ConfigArgs,
    },

    /// Write a starter blueprint to edit and apply
    Demo {
        /// Where to write the blueprint
        #[arg(short, long, default_value = "nestforge.json")]
        output: PathBuf,
    },
}

/// Generator options shared by the generating commands. A blueprint's
/// configuration section overrides these flags.
#[derive(Args)]
struct ConfigArgs {
    /// ORM profile: typeorm, mongoose, or prisma
    #[arg(long, default_value = "typeorm")]
    orm: String,

    /// Folder layout: full or light
    #[arg(long, default_value = "full")]
    architecture: String,

    /// Annotate DTOs and bootstrap Swagger
    #[arg(long)]
    api_docs: bool,

    /// Inject user and session entities
    #[arg(long)]
    auth: bool,

    /// Emit Dockerfile and docker-compose.yml with the project frame
    #[arg(long)]
    docker: bool,
}

impl ConfigArgs {
    fn resolve(&self) -> Result<GeneratorConfig, GeneratorError> {
        Ok(GeneratorConfig {
            orm: OrmProfile::parse(&self.orm)?,
            architecture: ArchitectureMode::parse(&self.architecture)?,
            api_docs: self.api_docs,
            auth: self.auth,
            docker: self.docker,
        })
    }
}

/// Sink for `--dry-run`: reads fall through to the project on disk so
/// relation targets and patch anchors resolve, writes stay in memory.
struct DryRunSink {
    disk: FsSink,
    staged: MemorySink,
}

impl DryRunSink {
    fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            disk: FsSink::new(root),
            staged: MemorySink::new(),
        }
    }
}

impl ArtifactSink for DryRunSink {
    fn ensure_dir(&mut self, path: &str) -> Result<(), GeneratorError> {
        self.staged.ensure_dir(path)
    }

    fn write_file(&mut self, path: &str, content: &str) -> Result<(), GeneratorError> {
        self.staged.write_file(path, content)
    }

    fn read_file(&self, path: &str) -> Result<Option<String>, GeneratorError> {
        match self.staged.read_file(path)? {
            Some(content) => Ok(Some(content)),
            None => self.disk.read_file(path),
        }
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    ui::init();

    match cli.command {
        Commands::New {
            name,
            output,
            blueprint,
            options,
        } => new_project(&name, output, blueprint.as_deref(), &options),

        Commands::Generate {
            name,
            fields,
            relation,
            path,
            dry_run,
            options,
        } => generate_entity(&name, &fields, relation.as_deref(), &path, dry_run, &options),

        Commands::Apply {
            blueprint,
            path,
            dry_run,
            options,
        } => apply_blueprint(&blueprint, &path, dry_run, &options),

        Commands::Check { blueprint, options } => check_blueprint(&blueprint, &options),

        Commands::Demo { output } => write_demo_blueprint(&output),
    }
}

/// Scaffold the project frame, then generate blueprint entities into it.
fn new_project(
    name: &str,
    output: Option<PathBuf>,
    blueprint: Option<&Path>,
    options: &ConfigArgs,
) -> miette::Result<()> {
    let start = Instant::now();
    ui::header(env!("CARGO_PKG_VERSION"));

    let mut config = options.resolve()?;
    let entities = match blueprint {
        Some(path) => {
            let doc = load_blueprint(path)?;
            if let Some(section) = &doc.config {
                config = config.merged_with(section)?;
            }
            Some(doc.into_entities()?)
        }
        None => None,
    };

    let root = output.unwrap_or_else(|| PathBuf::from(name));
    let spinner = ui::spinner("Writing project frame...");
    let mut sink = FsSink::new(&root);
    let frame = scaffold_project(name, &config);
    for (path, content) in &frame.files {
        sink.write_file(path, content)?;
    }
    spinner.finish_and_clear();
    ui::success(&format!(
        "Project frame ready: {} in {}",
        ui::counted(frame.files.len(), "file"),
        root.display()
    ));

    if let Some(entities) = entities {
        println!();
        let spinner = ui::spinner("Generating entity modules...");
        match GenerationSession::new(&mut sink, config).generate_batch(&entities) {
            Ok(report) => {
                spinner.finish_and_clear();
                render_report(&report);
            }
            Err(e) => {
                spinner.finish_and_clear();
                return Err(e.into());
            }
        }
    }

    println!();
    ui::timing("Done", start.elapsed().as_millis());
    println!();
    ui::info("Next steps:");
    ui::dim(&format!("cd {}", root.display()));
    ui::dim("npm install");
    if config.orm == OrmProfile::Prisma {
        ui::dim("npm run prisma:generate");
    }
    ui::dim("npm run start:dev");
    Ok(())
}

/// Generate a single entity into the project at `path`.
fn generate_entity(
    name: &str,
    fields: &str,
    relation: Option<&str>,
    path: &Path,
    dry_run: bool,
    options: &ConfigArgs,
) -> miette::Result<()> {
    let start = Instant::now();
    let config = options.resolve()?;
    let entity = build_entity(name, fields, relation)?;

    if dry_run {
        let mut sink = DryRunSink::new(path);
        let report = GenerationSession::new(&mut sink, config).generate(&entity)?;
        ui::entity_line(&report.entity, report.artifacts.len(), report.warnings.len());
        for warning in &report.warnings {
            ui::warn(&warning.to_string());
        }
        println!();
        ui::info("Dry run; these files would be created or modified:");
        for staged in sink.staged.paths() {
            ui::artifact_line(staged);
        }
        return Ok(());
    }

    let spinner = ui::spinner(&format!("Generating {name}..."));
    let mut sink = FsSink::new(path);
    match GenerationSession::new(&mut sink, config).generate(&entity) {
        Ok(report) => {
            spinner.finish_and_clear();
            ui::entity_line(&report.entity, report.artifacts.len(), report.warnings.len());
            for warning in &report.warnings {
                ui::warn(&warning.to_string());
            }
            println!();
            ui::timing("Done", start.elapsed().as_millis());
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            Err(e.into())
        }
    }
}

/// Generate a whole blueprint into the project at `path`.
fn apply_blueprint(
    blueprint: &Path,
    path: &Path,
    dry_run: bool,
    options: &ConfigArgs,
) -> miette::Result<()> {
    let start = Instant::now();
    let doc = load_blueprint(blueprint)?;
    let mut config = options.resolve()?;
    if let Some(section) = &doc.config {
        config = config.merged_with(section)?;
    }
    let entities = doc.into_entities()?;

    if dry_run {
        let mut sink = DryRunSink::new(path);
        let report = GenerationSession::new(&mut sink, config).generate_batch(&entities)?;
        render_report(&report);
        println!();
        ui::info("Dry run; these files would be created or modified:");
        for staged in sink.staged.paths() {
            ui::artifact_line(staged);
        }
        return Ok(());
    }

    let spinner = ui::spinner("Generating entity modules...");
    let mut sink = FsSink::new(path);
    match GenerationSession::new(&mut sink, config).generate_batch(&entities) {
        Ok(report) => {
            spinner.finish_and_clear();
            render_report(&report);
            println!();
            ui::timing("Done", start.elapsed().as_millis());
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            Err(e.into())
        }
    }
}

/// Run the full pipeline against an in-memory project; nothing is written.
fn check_blueprint(blueprint: &Path, options: &ConfigArgs) -> miette::Result<()> {
    let doc = load_blueprint(blueprint)?;
    let mut config = options.resolve()?;
    if let Some(section) = &doc.config {
        config = config.merged_with(section)?;
    }
    let entities = doc.into_entities()?;

    let spinner = ui::spinner("Checking blueprint...");
    let mut sink = MemorySink::new();
    match GenerationSession::new(&mut sink, config).generate_batch(&entities) {
        Ok(report) => {
            spinner.finish_and_clear();
            render_report(&report);
            println!();
            if report.warning_count() == 0 {
                ui::success("Blueprint is clean.");
            } else {
                ui::warn(&format!(
                    "{} to review",
                    ui::counted(report.warning_count(), "finding")
                ));
            }
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            Err(e.into())
        }
    }
}

/// Write the built-in starter blueprint for editing.
fn write_demo_blueprint(output: &Path) -> miette::Result<()> {
    let mut text = demo_blueprint().to_json_pretty();
    text.push('\n');
    std::fs::write(output, text)
        .map_err(|e| miette::miette!("Failed to write {}: {e}", output.display()))?;

    ui::success(&format!("Starter blueprint written to {}", output.display()));
    ui::dim("Edit it, then run:");
    ui::dim(&format!("nestforge apply {}", output.display()));
    Ok(())
}

fn load_blueprint(path: &Path) -> miette::Result<Blueprint> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| miette::miette!("Failed to read blueprint {}: {e}", path.display()))?;
    Ok(Blueprint::from_json(&text)?)
}

/// Builds an entity from flag spellings. Field types parse permissively
/// (unknown spellings render as `any`); cardinalities do not.
fn build_entity(
    name: &str,
    fields: &str,
    relation: Option<&str>,
) -> Result<Entity, GeneratorError> {
    let mut entity = Entity::new(name);
    if name.eq_ignore_ascii_case("user") {
        entity.is_principal = true;
    }
    for spec in fields.split(',') {
        let spec = spec.trim();
        if spec.is_empty() {
            continue;
        }
        let (field, typ) = spec.split_once(':').unwrap_or((spec, "string"));
        entity = entity.with_field(field.trim(), FieldType::parse(typ));
    }
    if let Some(spec) = relation {
        entity.relation = Some(parse_relation(spec)?);
    }
    Ok(entity)
}

fn parse_relation(spec: &str) -> Result<RelationDecl, GeneratorError> {
    let (target, cardinality) = spec.split_once(':').unwrap_or((spec, ""));
    let parsed =
        Cardinality::parse(cardinality).ok_or_else(|| GeneratorError::UnknownCardinality {
            cardinality: cardinality.to_string(),
        })?;
    Ok(RelationDecl {
        target: target.trim().to_string(),
        cardinality: parsed,
    })
}

fn render_report(report: &GenerationReport) {
    for entity in &report.entities {
        ui::entity_line(&entity.entity, entity.artifacts.len(), entity.warnings.len());
        for warning in &entity.warnings {
            ui::warn(&warning.to_string());
        }
    }
    println!();
    ui::success(&format!(
        "{} across {}",
        ui::counted(report.artifact_count(), "artifact"),
        ui::counted(report.entities.len(), "entity")
    ));
}
