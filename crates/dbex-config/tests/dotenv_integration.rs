//! `.env` values flow through the full figment chain.

use dbex_config::DbexConfig;
use figment::Jail;

#[test]
fn dotenv_values_reach_the_config() {
    Jail::expect_with(|jail| {
        jail.create_file(
            ".env",
            "DBEX_FIXTURES__RETRIEVAL__AUTHORS=42\nDBEX_STORE__KEEP_ARTIFACTS=true\n",
        )?;

        let config = DbexConfig::load_with_dotenv().expect("config loads");
        assert_eq!(config.fixtures.retrieval.authors, 42);
        assert!(config.store.keep_artifacts);
        Ok(())
    });
}

#[test]
fn process_env_beats_dotenv() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "DBEX_STORE__LOCATION=from-dotenv\n")?;
        jail.set_env("DBEX_STORE__LOCATION", "from-env");

        let config = DbexConfig::load_with_dotenv().expect("config loads");
        assert_eq!(config.store.location, "from-env");
        Ok(())
    });
}

#[test]
fn nearest_dotenv_above_start_is_used() {
    Jail::expect_with(|jail| {
        jail.create_dir("project/nested")?;
        jail.create_file(".env", "DBEX_FIXTURES__NOTIFICATION__USERS=7\n")?;

        let start = jail.directory().join("project/nested");
        let loaded = DbexConfig::load_dotenv(&start).expect("finds .env");
        assert_eq!(loaded, jail.directory().join(".env"));

        let config = DbexConfig::load().expect("config loads");
        assert_eq!(config.fixtures.notification.users, 7);
        Ok(())
    });
}
