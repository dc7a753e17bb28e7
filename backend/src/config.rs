//! Server configuration.
//!
//! Every option can be given on the command line or through a `MECHANIC_*`
//! environment variable; the command line wins.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "mechanic-board", about = "Mechanic service request backend")]
pub struct Config {
    /// Interface to bind.
    #[arg(long, env = "MECHANIC_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind.
    #[arg(long, env = "MECHANIC_PORT", default_value_t = 5000)]
    pub port: u16,

    /// SQLite database file.
    #[arg(long, env = "MECHANIC_DB", default_value = "mechanic.sqlite")]
    pub db: PathBuf,

    /// Open the dashboard in the default browser once the server is up.
    #[arg(long, env = "MECHANIC_OPEN_BROWSER")]
    pub open_browser: bool,

    /// Insert a demo mechanic (token `demo-token`) and a few requests.
    #[arg(long, env = "MECHANIC_SEED_DEMO")]
    pub seed_demo: bool,
}

impl Config {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_origin() {
        let config = Config::parse_from(["mechanic-board"]);
        assert_eq!(config.url(), "http://127.0.0.1:5000");
        assert_eq!(config.db, PathBuf::from("mechanic.sqlite"));
        assert!(!config.seed_demo);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::parse_from([
            "mechanic-board",
            "--port",
            "8081",
            "--db",
            "/tmp/x.sqlite",
            "--seed-demo",
        ]);
        assert_eq!(config.port, 8081);
        assert!(config.seed_demo);
    }
}
