use std::path::PathBuf;

use clap::Parser;

/// Default listening address for the HTTP API
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Default storage file, relative to the working directory
pub const DEFAULT_STORAGE_PATH: &str = "products.json";

/// Command line options for the catalog service
#[derive(Debug, Parser)]
#[command(name = "catalogd", version, about = "File-backed product catalog HTTP service")]
pub struct Options {
    /// Address to listen on
    #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: String,

    /// Path of the JSON storage file
    #[arg(long, default_value = DEFAULT_STORAGE_PATH)]
    pub storage: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::try_parse_from(["catalogd"]).unwrap();
        assert_eq!(options.listen, DEFAULT_LISTEN_ADDR);
        assert_eq!(options.storage, PathBuf::from(DEFAULT_STORAGE_PATH));
    }

    #[test]
    fn test_overrides() {
        let options = Options::try_parse_from([
            "catalogd",
            "--listen",
            "127.0.0.1:9090",
            "--storage",
            "/tmp/catalog.json",
        ])
        .unwrap();
        assert_eq!(options.listen, "127.0.0.1:9090");
        assert_eq!(options.storage, PathBuf::from("/tmp/catalog.json"));
    }
}
