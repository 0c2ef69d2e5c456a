use crate::analysis::types::HealthCondition;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// OCR-powered ingredient label analysis for product safety reports
#[derive(Parser, Debug)]
#[command(
    name = "labelscan",
    about = "OCR-powered ingredient label analysis for product safety reports",
    version,
    long_about = "labelscan extracts text from a photographed product label, isolates the \
                  ingredient list, flags harmful or condition-restricted ingredients, and \
                  identifies the likely brand and product category."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Increase verbosity")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Analyze a product label image",
        long_about = "Runs OCR on the image, tokenizes the ingredient list, and produces a \
                      safety report with brand and category identification.\n\n\
                      Examples:\n  \
                      labelscan analyze label.jpg\n  \
                      labelscan analyze label.jpg --condition \"High Blood Pressure\"\n  \
                      labelscan analyze label.jpg --format json --no-lookup"
    )]
    Analyze(AnalyzeArgs),

    #[command(
        about = "Check collaborator availability",
        long_about = "Probes the OCR binary, the harmful-ingredient table, and the \
                      definition-lookup service.\n\n\
                      Examples:\n  \
                      labelscan health\n  \
                      labelscan health --format json"
    )]
    Health(HealthArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(value_name = "IMAGE", help = "Path to the label image")]
    pub image: PathBuf,

    #[arg(
        short = 'c',
        long = "condition",
        value_name = "CONDITION",
        value_parser = parse_condition,
        help = "Health condition to screen for (repeatable)"
    )]
    pub conditions: Vec<HealthCondition>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        long,
        value_name = "SECONDS",
        help = "Override the OCR timeout in seconds"
    )]
    pub timeout: Option<u64>,

    #[arg(long, help = "Skip network definition lookups")]
    pub no_lookup: bool,

    #[arg(
        long,
        value_name = "FILE",
        help = "Override the harmful-ingredient table path"
    )]
    pub harmful_table: Option<PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct HealthArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

fn parse_condition(s: &str) -> Result<HealthCondition, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_analyze_args() {
        let args = CliArgs::parse_from(["labelscan", "analyze", "label.jpg"]);
        match args.command {
            Commands::Analyze(analyze_args) => {
                assert_eq!(analyze_args.image, PathBuf::from("label.jpg"));
                assert_eq!(analyze_args.format, OutputFormatArg::Human);
                assert!(analyze_args.conditions.is_empty());
                assert!(analyze_args.timeout.is_none());
                assert!(!analyze_args.no_lookup);
                assert!(analyze_args.output.is_none());
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_analyze_with_conditions() {
        let args = CliArgs::parse_from([
            "labelscan",
            "analyze",
            "label.jpg",
            "--condition",
            "High Blood Pressure",
            "--condition",
            "Diabetes",
        ]);
        match args.command {
            Commands::Analyze(analyze_args) => {
                assert_eq!(
                    analyze_args.conditions,
                    vec![
                        HealthCondition::HighBloodPressure,
                        HealthCondition::Diabetes
                    ]
                );
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_analyze_rejects_unknown_condition() {
        let result = CliArgs::try_parse_from([
            "labelscan",
            "analyze",
            "label.jpg",
            "--condition",
            "Lactose Intolerance",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_analyze_with_options() {
        let args = CliArgs::parse_from([
            "labelscan",
            "analyze",
            "label.jpg",
            "--format",
            "json",
            "--timeout",
            "120",
            "--no-lookup",
            "--harmful-table",
            "/data/table.xlsx",
        ]);

        match args.command {
            Commands::Analyze(analyze_args) => {
                assert_eq!(analyze_args.format, OutputFormatArg::Json);
                assert_eq!(analyze_args.timeout, Some(120));
                assert!(analyze_args.no_lookup);
                assert_eq!(
                    analyze_args.harmful_table,
                    Some(PathBuf::from("/data/table.xlsx"))
                );
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_health_command() {
        let args = CliArgs::parse_from(["labelscan", "health"]);
        match args.command {
            Commands::Health(health_args) => {
                assert_eq!(health_args.format, OutputFormatArg::Human);
            }
            _ => panic!("Expected Health command"),
        }
    }

    #[test]
    fn test_global_verbose_flag() {
        let args = CliArgs::parse_from(["labelscan", "-v", "analyze", "label.jpg"]);
        assert!(args.verbose);
        assert!(!args.quiet);
    }

    #[test]
    fn test_global_quiet_flag() {
        let args = CliArgs::parse_from(["labelscan", "-q", "health"]);
        assert!(!args.verbose);
        assert!(args.quiet);
    }

    #[test]
    fn test_log_level_flag() {
        let args = CliArgs::parse_from(["labelscan", "--log-level", "debug", "health"]);
        assert_eq!(args.log_level, Some("debug".to_string()));
    }
}
