use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use specular_gen::Outputs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "specular")]
#[command(author, version, about = "Reflection metadata generator for Clang AST dumps")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate descriptor registrations from an AST dump
    Generate {
        /// AST dump file (clang -ast-dump=json output)
        input: PathBuf,

        /// Destination for descriptor registrations
        #[arg(long)]
        output_meta: Option<PathBuf>,

        /// Destination for enum display conversions
        #[arg(long)]
        output_enum_display: Option<PathBuf>,

        /// Print generated text to stdout
        #[arg(long)]
        print: bool,
    },

    /// Ingest an AST dump and report what it contains, without generating
    Check {
        /// AST dump file to check
        input: PathBuf,
    },

    /// Print the classified element tree of an AST dump
    Dump {
        /// AST dump file to dump
        input: PathBuf,
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
    }))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output_meta,
            output_enum_display,
            print,
        } => {
            if output_meta.is_none() && output_enum_display.is_none() && !print {
                return Err(miette::miette!(
                    "nothing to do: pass --output-meta, --output-enum-display, or --print"
                ));
            }

            let outputs = Outputs {
                meta: output_meta,
                enum_display: output_enum_display,
            };
            let report = specular_gen::generate_file(&input, &outputs).into_diagnostic()?;

            if print {
                println!("{}", report.code.meta);
                println!("{}", report.code.enum_display);
            }
            for path in &report.written {
                println!("Wrote {}", path.display());
            }
            if !report.failed.is_empty() {
                for (path, error) in &report.failed {
                    eprintln!("{}: {}", path.display(), error);
                }
                return Err(miette::miette!(
                    "{} output destination(s) could not be written",
                    report.failed.len()
                ));
            }
        }

        Commands::Check { input } => {
            let arena = specular_gen::ingest_file(&input).into_diagnostic()?;
            let code = specular_gen::generate(&arena);
            println!(
                "{}: OK ({} elements, {} types, {} enums)",
                input.display(),
                arena.len(),
                code.type_count,
                code.enum_count
            );
        }

        Commands::Dump { input } => {
            let arena = specular_gen::ingest_file(&input).into_diagnostic()?;
            println!("{:#?}", arena);
        }
    }

    Ok(())
}
