// Connection target models

use std::time::Duration;

use mongodb::options::{ClientOptions, Credential, ServerAddress};

use crate::error::{Error, Result};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 27017;

const APP_NAME: &str = "mongo-index-stats";

/// Username/password pair for an authenticated server
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
    /// Authentication database, driver default when `None`
    pub auth_source: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"*****")
            .field("auth_source", &self.auth_source)
            .finish()
    }
}

/// The server a run samples
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionTarget {
    pub host: String,
    pub port: u16,
    pub credentials: Option<Credentials>,
    /// How long the driver looks for a usable server, driver default when `None`
    pub server_selection_timeout: Option<Duration>,
}

impl ConnectionTarget {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port, credentials: None, server_selection_timeout: None }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = Some(timeout);
        self
    }

    /// `host:port`, bracketing IPv6 literals
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Driver options for this target. Credentials go through a `Credential`
    /// so user names and passwords never need URI escaping.
    pub fn client_options(&self) -> Result<ClientOptions> {
        let address = ServerAddress::parse(self.address())
            .map_err(|e| Error::Config(format!("invalid address {}: {e}", self.address())))?;

        let credential = self.credentials.as_ref().map(|creds| {
            Credential::builder()
                .username(creds.user.clone())
                .password(creds.password.clone())
                .source(creds.auth_source.clone())
                .build()
        });

        Ok(ClientOptions::builder()
            .hosts(vec![address])
            .credential(credential)
            .server_selection_timeout(self.server_selection_timeout)
            .app_name(APP_NAME.to_string())
            .build())
    }
}

impl Default for ConnectionTarget {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl std::fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.credentials {
            Some(creds) => write!(f, "mongodb://{}:*****@{}", creds.user, self.address()),
            None => write!(f, "mongodb://{}", self.address()),
        }
    }
}
