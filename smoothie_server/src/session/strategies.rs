//! The three ways a page can get hold of a database session.

use std::path::PathBuf;

use async_trait::async_trait;
use diesel_async::{AsyncConnection, AsyncPgConnection, SimpleAsyncConnection};

use super::{sources, AcquireFailure, AcquireStrategy, SessionHandle};

/// Opens sessions for the strategies and applies profile session settings.
#[async_trait]
pub trait Connector: Send + Sync {
    type Session: Send + 'static;

    async fn connect(&self, conninfo: &str) -> Result<Self::Session, AcquireFailure>;

    async fn apply_settings(&self, session: &mut Self::Session, sql: &str) -> Result<(), String>;
}

/// Connects to PostgreSQL with diesel-async.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgConnector;

#[async_trait]
impl Connector for PgConnector {
    type Session = SessionHandle;

    async fn connect(&self, conninfo: &str) -> Result<SessionHandle, AcquireFailure> {
        AsyncPgConnection::establish(conninfo)
            .await
            .map(SessionHandle::new)
            .map_err(|e| AcquireFailure::Connect(e.to_string()))
    }

    async fn apply_settings(&self, session: &mut SessionHandle, sql: &str) -> Result<(), String> {
        session
            .connection_mut()
            .batch_execute(sql)
            .await
            .map_err(|e| e.to_string())
    }
}

/// Named profile from the connections file.
///
/// A profile may carry session settings (role, search path, application
/// name). If the server rejects them the established connection is still
/// handed out as-is.
pub struct ConnectionProfileStrategy<C = PgConnector> {
    path: PathBuf,
    profile: String,
    connector: C,
}

impl ConnectionProfileStrategy {
    pub fn new(path: PathBuf, profile: String) -> Self {
        Self::with_connector(path, profile, PgConnector)
    }
}

impl<C: Connector> ConnectionProfileStrategy<C> {
    pub fn with_connector(path: PathBuf, profile: String, connector: C) -> Self {
        Self {
            path,
            profile,
            connector,
        }
    }
}

#[async_trait]
impl<C: Connector> AcquireStrategy<C::Session> for ConnectionProfileStrategy<C> {
    fn name(&self) -> &'static str {
        "connection profile"
    }

    async fn attempt(&self) -> Result<C::Session, AcquireFailure> {
        let profile = sources::load_profile(&self.path, &self.profile)?;
        let mut session = self.connector.connect(&profile.url).await?;

        let statements = profile.session_statements();
        if !statements.is_empty() {
            let sql = statements.join("; ");
            if let Err(e) = self.connector.apply_settings(&mut session, &sql).await {
                tracing::warn!(
                    profile = %self.profile,
                    error = %e,
                    "Profile session settings rejected, using the bare connection"
                );
            }
        }

        Ok(session)
    }
}

/// Session injected by the hosting runtime, e.g. `DATABASE_URL`.
pub struct ActiveSessionStrategy<C = PgConnector> {
    url: Option<String>,
    connector: C,
}

impl ActiveSessionStrategy {
    pub fn new(url: Option<String>) -> Self {
        Self::with_connector(url, PgConnector)
    }
}

impl<C: Connector> ActiveSessionStrategy<C> {
    pub fn with_connector(url: Option<String>, connector: C) -> Self {
        Self {
            url: url.filter(|u| !u.trim().is_empty()),
            connector,
        }
    }
}

#[async_trait]
impl<C: Connector> AcquireStrategy<C::Session> for ActiveSessionStrategy<C> {
    fn name(&self) -> &'static str {
        "active session"
    }

    async fn attempt(&self) -> Result<C::Session, AcquireFailure> {
        let url = self.url.as_deref().ok_or_else(|| {
            AcquireFailure::NotConfigured("no active session provided by the runtime".to_string())
        })?;

        self.connector.connect(url).await
    }
}

/// Explicit credentials from the secrets file.
pub struct SecretsStrategy<C = PgConnector> {
    path: PathBuf,
    key: String,
    connector: C,
}

impl SecretsStrategy {
    pub fn new(path: PathBuf, key: String) -> Self {
        Self::with_connector(path, key, PgConnector)
    }
}

impl<C: Connector> SecretsStrategy<C> {
    pub fn with_connector(path: PathBuf, key: String, connector: C) -> Self {
        Self {
            path,
            key,
            connector,
        }
    }
}

#[async_trait]
impl<C: Connector> AcquireStrategy<C::Session> for SecretsStrategy<C> {
    fn name(&self) -> &'static str {
        "secrets"
    }

    async fn attempt(&self) -> Result<C::Session, AcquireFailure> {
        let secrets = sources::load_secrets(&self.path, &self.key)?;
        self.connector.connect(&secrets.connection_string()).await
    }
}
