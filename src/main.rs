use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};
use std::path::PathBuf;

use cgpa_calc::cgpa::{BundleEntry, ComputationResult, CourseEntry};
use cgpa_calc::config::{self, CourseSheet};
use cgpa_calc::form::Form;
use cgpa_calc::output;
use cgpa_calc::scheme::SchemeId;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Step through an interactive course form (default if no subcommand)
    Interactive,
    /// List grading schemes with their grade-point tables
    Schemes,
    /// List the grades of one scheme in order
    Grades {
        /// Scheme name, e.g. NWU or BRAC/NSU
        scheme: String,
    },
    /// Compute a CGPA from courses given as flags or a YAML sheet
    Compute {
        /// Grading scheme (defaults to the sheet's, then the config's)
        #[arg(short, long)]
        scheme: Option<String>,

        /// Course as CREDIT:GRADE, e.g. 3:A or 1.5:B+ (repeatable)
        #[arg(long = "course", value_name = "CREDIT:GRADE")]
        courses: Vec<String>,

        /// Previously earned credit as CREDIT:GRADE
        #[arg(short, long, value_name = "CREDIT:GRADE")]
        bundle: Option<String>,

        /// YAML course sheet to read courses from
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Show how each row was counted
        #[arg(long)]
        breakdown: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "cgpa-calc")]
#[command(about = "Credit-weighted CGPA calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/cgpa-calc/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let command = cli.command.unwrap_or(Commands::Interactive);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // validate_config already checked the scheme name
    let default_scheme = config.scheme().unwrap_or(config::DEFAULT_SCHEME);
    let use_colors = output::should_use_colors(config.color_mode());
    debug!("Default scheme {}, colors {}", default_scheme, use_colors);

    match command {
        Commands::Interactive => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let mut form = Form::new(stdin.lock(), stdout.lock(), use_colors);
            if let Err(e) = form.run(default_scheme, &config.batch_credits()) {
                eprintln!("Error: {:#}", e);
                std::process::exit(EXIT_INPUT);
            }
        }
        Commands::Schemes => {
            println!("{}", output::format_scheme_list(use_colors));
        }
        Commands::Grades { scheme } => match scheme.parse::<SchemeId>() {
            Ok(id) => println!("{}", output::format_grades(id)),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(EXIT_INPUT);
            }
        },
        Commands::Compute {
            scheme,
            courses,
            bundle,
            file,
            json,
            breakdown,
        } => {
            let scheme_override = match scheme.as_deref().map(str::parse::<SchemeId>).transpose() {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            let sheet = match file {
                Some(path) => match config::load_sheet(&path) {
                    Ok(s) => s,
                    Err(e) => {
                        eprintln!("Sheet error: {:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                },
                None => CourseSheet::default(),
            };

            let mut session = match sheet.into_session(scheme_override, default_scheme) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            // Command-line courses append to the sheet; a bundle flag replaces it
            for pair in &courses {
                session.push_course(CourseEntry::from_pair(pair));
            }
            if let Some(pair) = bundle {
                session.set_bundle(BundleEntry::from_pair(&pair));
            }

            let result = session.compute();

            if json {
                match output::format_json(&result) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("Error: {:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                }
            } else {
                println!("{}", render_text(&result, breakdown, use_colors));
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Plain compute output. The per-row detail is only shown for `--breakdown`.
fn render_text(result: &ComputationResult, breakdown: bool, use_colors: bool) -> String {
    let summary = output::format_result(result, use_colors);
    if breakdown {
        format!("{}\n{}", output::format_breakdown(result, use_colors), summary)
    } else {
        summary
    }
}
