//! Server configuration assembled from the environment.

use std::env;
use std::net::SocketAddr;

use backend::outbound::store::StoreSettings;
use tracing::warn;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_API_KEY_FILE: &str = "/var/run/secrets/store_api_key";

/// Configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    /// Remote record store settings; `None` selects the in-memory fallback.
    pub(crate) store: Option<StoreSettings>,
}

impl ServerConfig {
    /// Read configuration from the environment.
    ///
    /// `BIND_ADDR` sets the listen address. `STORE_URL` selects the remote
    /// record store; its key is read from `STORE_API_KEY_FILE` (or the
    /// `STORE_API_KEY` variable as a dev fallback). Without `STORE_URL` the
    /// server runs against the in-memory store.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when an address or URL fails to parse, or
    /// when a store URL is configured but no key can be read.
    pub fn from_env() -> std::io::Result<Self> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned())
            .parse::<SocketAddr>()
            .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

        let store = match env::var("STORE_URL") {
            Ok(raw) => {
                let url = Url::parse(&raw)
                    .map_err(|e| std::io::Error::other(format!("invalid STORE_URL: {e}")))?;
                Some(StoreSettings::new(url, read_api_key()?))
            }
            Err(_) => None,
        };

        Ok(Self { bind_addr, store })
    }

    /// The socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

fn read_api_key() -> std::io::Result<String> {
    let key_path =
        env::var("STORE_API_KEY_FILE").unwrap_or_else(|_| DEFAULT_API_KEY_FILE.to_owned());
    match std::fs::read_to_string(&key_path) {
        Ok(contents) => Ok(contents.trim().to_owned()),
        Err(e) => {
            if let Ok(key) = env::var("STORE_API_KEY") {
                warn!(path = %key_path, error = %e, "using STORE_API_KEY from the environment (dev only)");
                Ok(key)
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read store API key at {key_path}: {e}"
                )))
            }
        }
    }
}
