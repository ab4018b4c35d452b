// FILE: src/cli/mod.rs

mod config;
mod handlers;

use crate::error::Result;
use crate::{GeneratorOptions, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueEnum};

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub struct Cli {
    config: config::ConfigFile,
}

impl Cli {
    pub fn new() -> Self {
        Self {
            config: config::ConfigFile::default(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let matches = self.build_cli().get_matches();
        self.run_with_matches(&matches)
    }

    pub fn run_with_matches(&mut self, matches: &ArgMatches) -> Result<()> {
        self.setup_logging(matches.get_count("verbose"));

        if let Some(config_path) = matches.get_one::<String>("config") {
            self.config = config::load(config_path)?;
        }

        match matches.subcommand() {
            Some(("generate", sub_matches)) => handlers::handle_generate_command(self, sub_matches),
            Some(("check", sub_matches)) => handlers::handle_check_command(self, sub_matches),
            Some(("analyze", sub_matches)) => handlers::handle_analyze_command(self, sub_matches),
            _ => handlers::generate_with_defaults(self),
        }
    }

    pub fn build_cli(&self) -> Command {
        let input_arg = || {
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Component model JSON file")
        };
        let output_arg = || {
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Generated TSX file")
        };

        Command::new(crate::NAME)
            .version(crate::VERSION)
            .about(crate::DESCRIPTION)
            .author("Gauntlet Development Team")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path (.json or .toml)")
                    .global(true)
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .help("Increase verbosity (can be used multiple times)")
                    .global(true)
                    .action(ArgAction::Count),
            )
            .subcommand(
                Command::new("generate")
                    .about("Generate the component bindings module")
                    .arg(input_arg())
                    .arg(output_arg())
                    .arg(Arg::new("namespace").long("namespace").value_name("NS").help("JSX namespace of host elements"))
                    .arg(Arg::new("import-source").long("import-source").value_name("MODULE").help("Module to import React types from"))
                    .arg(Arg::new("no-internal").long("no-internal").help("Do not mark the intrinsic registry @internal").action(ArgAction::SetTrue))
                    .arg(Arg::new("debug").short('d').long("debug").help("Log every generation phase").action(ArgAction::SetTrue))
                    .arg(Arg::new("stats").long("stats").help("Show detailed generation statistics").action(ArgAction::SetTrue))
                    .arg(Arg::new("watch").short('w').long("watch").help("Watch the model for changes and regenerate").action(ArgAction::SetTrue)),
            )
            .subcommand(
                Command::new("check")
                    .about("Fail if the generated file is missing or out of date")
                    .arg(input_arg())
                    .arg(output_arg()),
            )
            .subcommand(
                Command::new("analyze")
                    .about("Show how each component's properties are placed")
                    .arg(input_arg())
                    .arg(Arg::new("format").short('f').long("format").value_parser(clap::value_parser!(OutputFormat)).default_value("text").help("Analysis output format")),
            )
    }

    fn setup_logging(&self, verbose_count: u8) {
        let log_level = match verbose_count {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        // A second initialisation (tests, embedding) keeps the first logger
        let _ = env_logger::Builder::from_default_env()
            .filter_level(log_level)
            .format_timestamp_secs()
            .try_init();
    }

    /// Input path: flag, then config file, then the fixed default
    pub fn input_path(&self, matches: &ArgMatches) -> String {
        matches
            .try_get_one::<String>("input")
            .ok()
            .flatten()
            .cloned()
            .or_else(|| self.config.input.clone())
            .unwrap_or_else(|| DEFAULT_INPUT_PATH.to_string())
    }

    /// Output path: flag, then config file, then the fixed default
    pub fn output_path(&self, matches: &ArgMatches) -> String {
        matches
            .try_get_one::<String>("output")
            .ok()
            .flatten()
            .cloned()
            .or_else(|| self.config.output.clone())
            .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string())
    }

    /// Options from config file and defaults, without command line overrides
    pub fn base_options(&self) -> GeneratorOptions {
        let mut options = GeneratorOptions::default();
        if let Some(namespace) = &self.config.element_namespace {
            options.element_namespace = namespace.clone();
        }
        if let Some(import_source) = &self.config.import_source {
            options.import_source = import_source.clone();
        }
        if let Some(mark_internal) = self.config.mark_internal {
            options.mark_internal = mark_internal;
        }
        options
    }

    pub fn build_generator_options(&self, matches: &ArgMatches) -> GeneratorOptions {
        let mut options = self.base_options();
        if let Some(namespace) = matches.get_one::<String>("namespace") {
            options.element_namespace = namespace.clone();
        }
        if let Some(import_source) = matches.get_one::<String>("import-source") {
            options.import_source = import_source.clone();
        }
        if matches.get_flag("no-internal") {
            options.mark_internal = false;
        }
        options.debug_mode = matches.get_flag("debug");
        options
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_matches(cli: &Cli, args: &[&str]) -> ArgMatches {
        let matches = cli.build_cli().get_matches_from(args);
        let (_, sub_matches) = matches.subcommand().unwrap();
        sub_matches.clone()
    }

    #[test]
    fn test_command_definition_is_valid() {
        Cli::new().build_cli().debug_assert();
    }

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::new();
        let matches = generate_matches(&cli, &["tsxgen", "generate"]);
        assert_eq!(cli.input_path(&matches), DEFAULT_INPUT_PATH);
        assert_eq!(cli.output_path(&matches), DEFAULT_OUTPUT_PATH);
        assert_eq!(cli.build_generator_options(&matches), GeneratorOptions::default());
    }

    #[test]
    fn test_flags_override_config() {
        let mut cli = Cli::new();
        cli.config = config::ConfigFile {
            input: Some("from-config.json".into()),
            output: Some("from-config.tsx".into()),
            element_namespace: Some("config".into()),
            import_source: None,
            mark_internal: Some(true),
        };

        let matches = generate_matches(
            &cli,
            &["tsxgen", "generate", "-o", "flag.tsx", "--namespace", "flag", "--no-internal"],
        );
        assert_eq!(cli.input_path(&matches), "from-config.json");
        assert_eq!(cli.output_path(&matches), "flag.tsx");

        let options = cli.build_generator_options(&matches);
        assert_eq!(options.element_namespace, "flag");
        assert_eq!(options.import_source, "react");
        assert!(!options.mark_internal);
    }

    #[test]
    fn test_analyze_has_no_output_argument() {
        let cli = Cli::new();
        let matches = generate_matches(&cli, &["tsxgen", "analyze", "-i", "model.json", "-f", "json"]);
        assert_eq!(cli.input_path(&matches), "model.json");
        assert_eq!(cli.output_path(&matches), DEFAULT_OUTPUT_PATH);
        assert!(matches!(matches.get_one::<OutputFormat>("format"), Some(OutputFormat::Json)));
    }

    #[test]
    fn test_run_reads_paths_from_config() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let input = temp_dir.path().join("model.json");
        let output = temp_dir.path().join("gen").join("components.tsx");
        let config_path = temp_dir.path().join("tsxgen.toml");
        std::fs::write(
            &input,
            r#"[{ "type": "root", "sharedTypes": {} },
               { "type": "standard", "name": "Text", "internalName": "text", "props": [], "children": { "type": "string" } }]"#,
        )
        .unwrap();
        std::fs::write(
            &config_path,
            format!(
                "input = {:?}\noutput = {:?}\nelement_namespace = \"host\"\n",
                input.to_str().unwrap(),
                output.to_str().unwrap()
            ),
        )
        .unwrap();

        let mut cli = Cli::new();
        let matches = cli
            .build_cli()
            .get_matches_from(["tsxgen", "-v", "-c", config_path.to_str().unwrap(), "generate"]);
        cli.run_with_matches(&matches).unwrap();

        assert_eq!(cli.config.element_namespace.as_deref(), Some("host"));
        let generated = std::fs::read_to_string(&output).unwrap();
        assert!(generated.contains("<host:text>"), "{}", generated);
    }
}
