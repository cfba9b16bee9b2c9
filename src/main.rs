use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use plansheet::{
    ExportBuilder, ExportConfig, ExportError, Exporter, PageOrientation, PaperSize,
    PrintScope, load_tree_file,
};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Export curriculum plans as print-ready HTML or paginated PDF.
#[derive(Parser, Debug)]
#[command(name = "plansheet", version, about)]
struct Cli {
    /// Curriculum tree JSON.
    #[arg(long, short = 'd', global = true, default_value = "curriculum.json")]
    data: PathBuf,

    /// Directory the document is written to.
    #[arg(long, short = 'o', global = true, default_value = ".")]
    out_dir: PathBuf,

    #[command(flatten)]
    overrides: ConfigOverrides,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ConfigOverrides {
    /// JSON export configuration; the flags below override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true, value_enum)]
    page_size: Option<PaperSize>,
    #[arg(long, global = true, value_enum)]
    orientation: Option<PageOrientation>,
    #[arg(long, global = true)]
    margin_mm: Option<f32>,
    #[arg(long, global = true)]
    line_height_mm: Option<f32>,
    #[arg(long, global = true)]
    title: Option<String>,
    /// Stamp documents with this date (YYYY-MM-DD).
    #[arg(long, global = true)]
    generated_on: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Weekly PDF for download.
    Pdf {
        #[arg(long)]
        week: String,
    },
    /// Print-ready HTML.
    Print {
        #[command(subcommand)]
        scope: ScopeArg,
    },
    /// The weekly block document as Markdown, on stdout.
    Markdown {
        #[arg(long)]
        week: String,
    },
}

#[derive(Subcommand, Debug)]
enum ScopeArg {
    Term { id: String },
    Week { id: String },
    Daily { week_id: String },
    Day { day_id: String },
}

impl From<ScopeArg> for PrintScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Term { id } => PrintScope::Term { id },
            ScopeArg::Week { id } => PrintScope::Week { id },
            ScopeArg::Daily { week_id } => PrintScope::Daily { week_id },
            ScopeArg::Day { day_id } => PrintScope::SingleDay { day_id },
        }
    }
}

impl ConfigOverrides {
    fn apply(&self, mut config: ExportConfig) -> ExportConfig {
        if let Some(size) = self.page_size {
            config.page_size = size;
        }
        if let Some(orientation) = self.orientation {
            config.orientation = orientation;
        }
        if let Some(margin) = self.margin_mm {
            config.margin_mm = margin;
        }
        if let Some(line_height) = self.line_height_mm {
            config.line_height_mm = line_height;
        }
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        config
    }

    fn exporter(&self) -> Result<Exporter, ExportError> {
        let mut builder = ExportBuilder::new();
        if let Some(path) = &self.config {
            builder = builder.with_config_file(path)?;
        }
        if let Some(date) = self.generated_on {
            builder = builder.with_generated_on(date);
        }
        builder.map_config(|config| self.apply(config)).build()
    }
}

fn run(cli: Cli) -> Result<(), ExportError> {
    let exporter = cli.overrides.exporter()?;
    let tree = load_tree_file(&cli.data)?;

    match cli.command {
        Command::Pdf { week } => {
            fs::create_dir_all(&cli.out_dir)?;
            let (path, document) = exporter.save_pdf(&tree, &week, &cli.out_dir)?;
            for warning in &document.warnings {
                eprintln!("warning: {}", warning);
            }
            println!("{} ({} pages)", path.display(), document.page_count);
        }
        Command::Print { scope } => {
            fs::create_dir_all(&cli.out_dir)?;
            let (path, document) = exporter.save_print(&tree, &scope.into(), &cli.out_dir)?;
            for warning in &document.warnings {
                eprintln!("warning: {}", warning);
            }
            println!("{}", path.display());
        }
        Command::Markdown { week } => {
            print!("{}", exporter.project_week(&tree, &week)?.to_markdown());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.user_message());
            eprintln!("Caused by: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_flags_override_the_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::try_parse_from([
            "plansheet",
            "pdf",
            "--week",
            "week-1",
            "--page-size",
            "letter",
            "--line-height-mm",
            "7.5",
            "--margin-mm",
            "18",
        ])?;
        let exporter = cli.overrides.exporter()?;
        let config = exporter.config();
        assert_eq!(config.page_size, PaperSize::Letter);
        assert_eq!(config.line_height_mm, 7.5);
        assert_eq!(config.margin_mm, 18.0);
        assert_eq!(config.orientation, PageOrientation::Portrait);
        Ok(())
    }

    #[test]
    fn invalid_line_height_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::try_parse_from(["plansheet", "markdown", "--week", "w", "--line-height-mm", "0"])?;
        assert!(matches!(cli.overrides.exporter(), Err(ExportError::Config(_))));
        Ok(())
    }
}
