//! Tests for configuration system

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::error::DsmError;
    use crate::models::config::{OutputFormat, PartialSettings};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_partial_settings_merge() {
        let mut base = PartialSettings {
            project_root: Some(PathBuf::from("/base")),
            exclude_patterns: Some(vec!["sandbox".to_string()]),
            ..Default::default()
        };

        let override_settings = PartialSettings {
            project_root: Some(PathBuf::from("/override")),
            threads: Some(5),
            ..Default::default()
        };

        base.merge_from(override_settings);

        assert_eq!(base.project_root, Some(PathBuf::from("/override")));
        assert_eq!(base.exclude_patterns, Some(vec!["sandbox".to_string()]));
        assert_eq!(base.threads, Some(5));
    }

    #[test]
    fn test_config_builder() {
        let dir = tempdir().unwrap();

        let first = PartialSettings {
            project_root: Some(PathBuf::from("/does/not/matter")),
            exclude_patterns: Some(vec!["legacy".to_string()]),
            ..Default::default()
        };
        let second = PartialSettings {
            project_root: Some(dir.path().to_path_buf()),
            output_format: Some(OutputFormat::Text),
            ..Default::default()
        };

        let settings = ConfigBuilder::new().merge(first).merge(second).build().unwrap();

        // Last merge wins for the root, earlier fields survive
        assert_eq!(settings.project_root, dir.path());
        assert_eq!(settings.exclude_patterns, vec!["legacy".to_string()]);
        assert_eq!(settings.output_format, OutputFormat::Text);
        assert!(settings.parallel);
    }

    #[test]
    fn test_config_builder_validates() {
        let dir = tempdir().unwrap();
        let result = ConfigBuilder::new()
            .merge(PartialSettings {
                project_root: Some(dir.path().join("missing")),
                ..Default::default()
            })
            .build();
        assert!(matches!(result, Err(DsmError::InvalidPath { .. })));
    }

    #[test]
    fn test_file_config_source() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("dsm.toml");
        fs::write(&config_path, "source_root = \"java\"\nfollow_links = true\n").unwrap();

        let file_config = FileConfig::with_path(&config_path);
        assert!(file_config.is_available());
        assert_eq!(file_config.priority(), 20);

        let partial = file_config.load().unwrap();
        assert_eq!(partial.source_root.as_deref(), Some("java"));
        assert_eq!(partial.follow_links, Some(true));
    }

    #[test]
    fn test_file_config_not_found() {
        let dir = tempdir().unwrap();
        let file_config = FileConfig::with_path(dir.path().join("absent.toml"));
        assert!(!file_config.is_available());
        assert!(matches!(file_config.load(), Err(DsmError::ConfigNotFound { .. })));

        let result = ConfigBuilder::new().add_config_file(&dir.path().join("absent.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_env_config_source() {
        std::env::set_var("DSMTESTENV_PROJECT_ROOT", "/env/shop");
        std::env::set_var("DSMTESTENV_MODULES", "core, web ,");
        std::env::set_var("DSMTESTENV_EXCLUDE", "legacy-*,sandbox");
        std::env::set_var("DSMTESTENV_OUTPUT_FORMAT", "csv");
        std::env::set_var("DSMTESTENV_THREADS", "3");

        let env_config = EnvConfig::new("DSMTESTENV");
        assert!(env_config.is_available());
        assert_eq!(env_config.priority(), 10);

        let partial = env_config.load().unwrap();

        std::env::remove_var("DSMTESTENV_PROJECT_ROOT");
        std::env::remove_var("DSMTESTENV_MODULES");
        std::env::remove_var("DSMTESTENV_EXCLUDE");
        std::env::remove_var("DSMTESTENV_OUTPUT_FORMAT");
        std::env::remove_var("DSMTESTENV_THREADS");

        assert_eq!(partial.project_root, Some(PathBuf::from("/env/shop")));
        assert_eq!(partial.modules, Some(vec!["core".to_string(), "web".to_string()]));
        assert_eq!(
            partial.exclude_patterns,
            Some(vec!["legacy-*".to_string(), "sandbox".to_string()])
        );
        assert_eq!(partial.output_format, Some(OutputFormat::Csv));
        assert_eq!(partial.threads, Some(3));
    }

    #[test]
    fn test_env_config_rejects_bad_values() {
        std::env::set_var("DSMTESTBAD_OUTPUT_FORMAT", "xml");
        let result = EnvConfig::new("DSMTESTBAD").load();
        std::env::remove_var("DSMTESTBAD_OUTPUT_FORMAT");
        assert!(matches!(result, Err(DsmError::InvalidOutputFormat { .. })));

        std::env::set_var("DSMTESTBAD2_THREADS", "lots");
        let result = EnvConfig::new("DSMTESTBAD2").load();
        std::env::remove_var("DSMTESTBAD2_THREADS");
        assert!(matches!(result, Err(DsmError::Config { .. })));
    }

    #[test]
    fn test_config_builder_load_from() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("dsm.toml");
        fs::write(&config_path, "exclude_patterns = [\"sandbox\"]\nthreads = 2\n").unwrap();

        let settings = ConfigBuilder::new()
            .merge(PartialSettings {
                project_root: Some(dir.path().to_path_buf()),
                ..Default::default()
            })
            .load_from(&FileConfig::with_path(&config_path))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(settings.exclude_patterns, vec!["sandbox".to_string()]);
        assert_eq!(settings.threads, Some(2));

        // A broken source is skipped by try_load_from
        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "threads = 0\n").unwrap();
        let settings = ConfigBuilder::new()
            .merge(PartialSettings {
                project_root: Some(dir.path().to_path_buf()),
                ..Default::default()
            })
            .try_load_from(&FileConfig::with_path(&broken))
            .build()
            .unwrap();
        assert_eq!(settings.threads, None);
    }

    #[test]
    fn test_config_builder_layers_sources_by_priority() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("dsm.toml");
        fs::write(&config_path, "exclude_patterns = [\"from-file\"]\nthreads = 2\n").unwrap();

        let cli = CliConfig::new(CliArgs {
            path: Some(dir.path().to_path_buf()),
            exclude: Some(vec!["from-cli".to_string()]),
            ..Default::default()
        });

        // Loaded highest first; the file still only fills what the command line leaves open
        let settings = ConfigBuilder::new()
            .load_from(&cli)
            .unwrap()
            .add_config_file(&config_path)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(settings.exclude_patterns, vec!["from-cli".to_string()]);
        assert_eq!(settings.threads, Some(2));
    }

    #[test]
    fn test_load_config_with_env_prefix() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("dsm.toml");
        fs::write(
            &config_path,
            "exclude_patterns = [\"from-file\"]\nsource_root = \"java\"\noutput_format = \"text\"\n",
        )
        .unwrap();

        std::env::set_var("DSMTESTLAYER_OUTPUT_FORMAT", "json");
        std::env::set_var("DSMTESTLAYER_EXCLUDE", "from-env");

        let cli_args = CliArgs {
            path: Some(dir.path().to_path_buf()),
            exclude: Some(vec!["from-cli".to_string()]),
            config: Some(config_path.clone()),
            ..Default::default()
        };

        let result = load_config_with_env_prefix(cli_args, "DSMTESTLAYER");

        std::env::remove_var("DSMTESTLAYER_OUTPUT_FORMAT");
        std::env::remove_var("DSMTESTLAYER_EXCLUDE");

        let settings = result.unwrap();

        assert_eq!(settings.project_root, dir.path());
        // Command line beats environment beats file
        assert_eq!(settings.exclude_patterns, vec!["from-cli".to_string()]);
        assert_eq!(settings.output_format, OutputFormat::Json);
        assert_eq!(settings.source_root, "java");
    }

    #[test]
    fn test_load_config_missing_explicit_file() {
        let dir = tempdir().unwrap();
        let cli_args = CliArgs {
            path: Some(dir.path().to_path_buf()),
            config: Some(dir.path().join("absent.toml")),
            ..Default::default()
        };

        let result = load_config_with_env_prefix(cli_args, "DSMTESTMISSING");
        assert!(matches!(result, Err(DsmError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_file_config_create_default() {
        let dir = tempdir().unwrap();
        let file_config = FileConfig::with_path(dir.path().join(DEFAULT_CONFIG_FILE));
        file_config.create_default().unwrap();

        assert!(file_config.is_available());
        assert_eq!(file_config.load().unwrap(), PartialSettings::default());
    }
}
