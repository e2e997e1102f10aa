//! Tests for CLI argument parsing.

use std::path::PathBuf;

use super::cli::{Cli, Command};

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_args() {
        let cli = Cli::parse_from_iter(["layerseg-config", "--data-dir", "scans"]);

        assert_eq!(cli.data_dir, Some(PathBuf::from("scans")));
        assert!(cli.label_dir.is_none());
        assert!(cli.files.is_empty());
        assert!(!cli.json);
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_config_sources() {
        let cli = Cli::parse_from_iter([
            "layerseg-config",
            "--config",
            "base.toml",
            "--overrides",
            "sweep-03.toml",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("base.toml")));
        assert_eq!(cli.overrides, Some(PathBuf::from("sweep-03.toml")));
    }

    #[test]
    fn parse_short_flags() {
        let cli = Cli::parse_from_iter(["layerseg-config", "-c", "a.toml", "-o", "b.toml", "-v"]);

        assert_eq!(cli.config, Some(PathBuf::from("a.toml")));
        assert_eq!(cli.overrides, Some(PathBuf::from("b.toml")));
        assert!(cli.verbose);
    }

    #[test]
    fn files_accumulate_in_order() {
        let cli = Cli::parse_from_iter([
            "layerseg-config",
            "--file",
            "vol02.txt",
            "--file",
            "vol01.txt",
        ]);

        assert_eq!(cli.files, vec!["vol02.txt", "vol01.txt"]);
    }

    #[test]
    fn parse_directories_and_output_mode() {
        let cli = Cli::parse_from_iter([
            "layerseg-config",
            "--data-dir",
            "scans",
            "--label-dir",
            "truth",
            "--json",
        ]);

        assert_eq!(cli.label_dir, Some(PathBuf::from("truth")));
        assert!(cli.json);
    }
}

mod init_command {
    use super::*;

    #[test]
    fn init_uses_default_output() {
        let cli = Cli::parse_from_iter(["layerseg-config", "init"]);

        assert!(cli.is_init());
        match cli.command {
            Some(Command::Init { output }) => assert_eq!(output, PathBuf::from("layerseg.toml")),
            None => panic!("expected init command"),
        }
    }

    #[test]
    fn init_accepts_output_path() {
        let cli = Cli::parse_from_iter(["layerseg-config", "init", "--output", "custom.toml"]);

        match cli.command {
            Some(Command::Init { output }) => assert_eq!(output, PathBuf::from("custom.toml")),
            None => panic!("expected init command"),
        }
    }

    #[test]
    fn run_mode_is_not_init() {
        let cli = Cli::parse_from_iter(["layerseg-config", "--data-dir", "scans"]);

        assert!(!cli.is_init());
    }
}
