//! Application configuration.
//!
//! One immutable struct, built once in `main` and passed down — the view
//! engine, the public root, and the log path all travel through it instead
//! of living in module-level state.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Settings for one server process.
#[derive(Clone, Debug)]
pub struct Config {
    /// TCP port to listen on. Overridable via the `PORT` environment
    /// variable; anything absent or unparseable falls back to 3000.
    pub port: u16,
    /// Root directory for static assets.
    pub public_dir: PathBuf,
    /// Directory of handlebars templates (with a `partials/` subdirectory).
    pub views_dir: PathBuf,
    /// Append-only request log.
    pub log_file: PathBuf,
}

impl Config {
    /// Reads the environment (just `PORT`) and fills in the conventional
    /// paths relative to the working directory.
    pub fn from_env() -> Self {
        Self {
            port: port_from(std::env::var("PORT").ok()),
            public_dir: PathBuf::from("public"),
            views_dir: PathBuf::from("views"),
            log_file: PathBuf::from("server.log"),
        }
    }

    /// The address to bind: all interfaces, configured port.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn port_from(raw: Option<String>) -> u16 {
    raw.and_then(|value| value.parse().ok()).unwrap_or(3000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_to_3000() {
        assert_eq!(port_from(None), 3000);
        assert_eq!(port_from(Some("not-a-port".to_owned())), 3000);
        assert_eq!(port_from(Some("70000".to_owned())), 3000);
    }

    #[test]
    fn port_honours_a_valid_override() {
        assert_eq!(port_from(Some("8080".to_owned())), 8080);
    }
}
