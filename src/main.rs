//! plazo CLI: deadline extraction from Spanish office memos.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use plazo::analyze::Analyzer;
use plazo::config::AnalyzerConfig;
use plazo::error::NerError;
use plazo::ner::EntityExtractor;
use plazo::pdf;
use plazo::resolve;

#[derive(Parser)]
#[command(name = "plazo", version, about = "Deadline extraction from Spanish office memos")]
struct Cli {
    /// TOML config with keyword/cue overrides.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a memo (PDF or plain text) and print the findings.
    Analyze {
        /// Path to a .pdf or text file.
        file: PathBuf,

        /// Print the analysis as JSON.
        #[arg(long)]
        json: bool,

        /// Also run the model-backed entity extraction.
        #[arg(long)]
        ai: bool,

        /// Directory with model.onnx + tokenizer.json for --ai.
        #[arg(long)]
        model_dir: Option<PathBuf>,

        /// Write the derived calendar event to an .ics file (needs the
        /// `calendar` feature).
        #[arg(long)]
        ics: Option<PathBuf>,
    },

    /// Print the keyword hits for a memo.
    Keywords {
        /// Path to a .pdf or text file.
        file: PathBuf,
    },

    /// Resolve the deadline for raw text given on the command line.
    Deadline {
        /// Memo text.
        text: String,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };

    match cli.command {
        Commands::Analyze {
            file,
            json,
            ai,
            model_dir,
            ics,
        } => {
            let text = read_document(&file)?;
            let name = file_name(&file);

            let analyzer = Analyzer::new(config.clone())?;
            let analysis = analyzer.analyze(&name, &text);

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis).into_diagnostic()?);
            } else {
                println!("Documento:  {}", analysis.source);
                println!(
                    "Asunto:     {}",
                    analysis.subject.as_deref().unwrap_or("No detectado")
                );
                println!(
                    "Encargado:  {}",
                    analysis.responsible.as_deref().unwrap_or("No detectado")
                );
                println!("Acción:     {}", analysis.action);
                println!(
                    "Fecha límite: {} {}",
                    analysis.deadline.format("%d/%m/%Y"),
                    if analysis.detected.is_some() {
                        "(detectada)"
                    } else {
                        "(por defecto)"
                    }
                );
                println!("Agenda:     {}", analysis.agenda.format("%d/%m/%Y"));
                if !analysis.keywords.is_empty() {
                    println!("Palabras clave: {}", analysis.keywords.join(", "));
                }
            }

            if ai {
                let extractor =
                    EntityExtractor::with_default_loader(model_dir.or(config.model_dir));
                match extractor.extract(&text) {
                    Ok(extraction) => {
                        println!(
                            "Responsable (IA): {}",
                            extraction.responsible.as_deref().unwrap_or("No detectado")
                        );
                        match extraction.deadline {
                            Some(d) => println!("Fecha (IA): {}", d.format("%d/%m/%Y")),
                            None => println!("Fecha (IA): No detectada"),
                        }
                    }
                    Err(NerError::MissingModel) => {
                        eprintln!(
                            "Modelo NER no disponible; se omiten los campos de IA."
                        );
                    }
                    Err(e) => return Err(plazo::error::PlazoError::from(e).into()),
                }
            }

            if let Some(path) = ics {
                #[cfg(feature = "calendar")]
                {
                    std::fs::write(&path, analysis.event_spec().to_ics()).into_diagnostic()?;
                    println!("Evento escrito en {}", path.display());
                }
                #[cfg(not(feature = "calendar"))]
                {
                    let _ = path;
                    eprintln!("--ics requiere compilar con la feature `calendar`.");
                }
            }
        }

        Commands::Keywords { file } => {
            let text = read_document(&file)?;
            for hit in plazo::cues::scan_keywords(&text, &config.keywords) {
                println!("{hit}");
            }
        }

        Commands::Deadline { text } => {
            let cues = resolve::CueSet::new(&config.cue_phrases)?;
            match resolve::resolve_deadline_with(&text, &cues) {
                Some(date) => println!("{}", date.format("%d/%m/%Y")),
                None => {
                    let today = chrono::Local::now().date_naive();
                    let fallback =
                        resolve::fallback_deadline_after(None, today, config.grace_period_days);
                    println!("{} (por defecto)", fallback.format("%d/%m/%Y"));
                }
            }
        }
    }

    Ok(())
}

/// Read a document as text: PDFs through the extractor, anything else as
/// plain UTF-8.
fn read_document(path: &Path) -> Result<String> {
    let is_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        Ok(pdf::extract_text(path).map_err(plazo::error::PlazoError::from)?)
    } else {
        std::fs::read_to_string(path).into_diagnostic()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
