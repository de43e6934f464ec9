use std::path::PathBuf;

pub const DATABASE_FILE: &str = "data.leafdb";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
}

impl Config {
    /// Build from process arguments (program name first). The first real
    /// argument names the database file; without one, `DATABASE_FILE` is used.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        let db_path = args
            .into_iter()
            .nth(1)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILE));
        Config { db_path }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config { db_path: PathBuf::from(DATABASE_FILE) }
    }
}
