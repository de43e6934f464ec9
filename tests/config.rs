use leafdb::config::{Config, DATABASE_FILE};
use std::path::PathBuf;

#[test]
fn first_argument_is_database_path() {
    let args = vec!["leafdb".to_string(), "mydb.db".to_string()];
    assert_eq!(Config::from_args(args).db_path, PathBuf::from("mydb.db"));
}

#[test]
fn falls_back_to_default_file() {
    let config = Config::from_args(vec!["leafdb".to_string()]);
    assert_eq!(config, Config::default());
    assert_eq!(config.db_path, PathBuf::from(DATABASE_FILE));
}
