#[cfg(test)]
mod tests {
    use heures::libs::config::{
        ApiConfig, Config, DatabaseConfig, InvoiceConfig, ProfileConfig, ServerConfig, DEFAULT_SESSION_TTL_HOURS, PORT_ENV,
    };
    use heures::libs::data_storage::DataStorage;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Config file inside a throwaway data directory.
    struct ConfigTestContext {
        _temp_dir: TempDir,
        path: PathBuf,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let path = DataStorage::at(temp_dir.path().join("heures")).get_path("config.json").unwrap();
            ConfigTestContext { _temp_dir: temp_dir, path }
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.server.is_none());
        assert!(config.api.is_none());
        assert!(config.invoice.is_none());

        let server = config.server_or_default();
        assert_eq!(server.port, 4000);
        assert_eq!(server.session_ttl_hours, DEFAULT_SESSION_TTL_HOURS);
        assert_eq!(server.addr(), "127.0.0.1:4000");
        assert_eq!(config.api_or_default().base_url, "http://localhost:4000");
        assert_eq!(config.fallback_rate(), 0.0);
        assert_eq!(config.user_id(), "local");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(ctx: &mut ConfigTestContext) {
        assert!(!ctx.path.exists());
        assert_eq!(Config::read_from(&ctx.path).unwrap(), Config::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let config = Config {
            server: Some(ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                session_ttl_hours: 12,
            }),
            api: Some(ApiConfig {
                base_url: "https://heures.example.com".to_string(),
            }),
            invoice: Some(InvoiceConfig { fallback_rate: 45.0 }),
            profile: Some(ProfileConfig {
                user_id: "u_me".to_string(),
            }),
            database: Some(DatabaseConfig {
                path: Some(PathBuf::from("/tmp/heures-test.db")),
            }),
        };
        config.save_to(&ctx.path).unwrap();

        let read_config = Config::read_from(&ctx.path).unwrap();
        assert_eq!(read_config, config);
        assert_eq!(read_config.fallback_rate(), 45.0);
        assert_eq!(read_config.user_id(), "u_me");
        assert_eq!(read_config.database_path().unwrap(), PathBuf::from("/tmp/heures-test.db"));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_config_uses_defaults(ctx: &mut ConfigTestContext) {
        std::fs::write(&ctx.path, r#"{ "server": { "host": "localhost", "port": 5000 } }"#).unwrap();

        let config = Config::read_from(&ctx.path).unwrap();
        let server = config.server_or_default();
        assert_eq!(server.port, 5000);
        assert_eq!(server.session_ttl_hours, DEFAULT_SESSION_TTL_HOURS);
        assert!(config.invoice.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_invalid_config_is_an_error(ctx: &mut ConfigTestContext) {
        std::fs::write(&ctx.path, "{ not json").unwrap();
        assert!(Config::read_from(&ctx.path).is_err());
    }

    #[test]
    fn test_port_env_override() {
        std::env::set_var(PORT_ENV, "4555");
        let server = ServerConfig::default().with_env_overrides();
        std::env::remove_var(PORT_ENV);
        assert_eq!(server.port, 4555);
    }
}
