//! Database session acquisition.
//!
//! A page load owns exactly one [`SessionHandle`]. It is produced by the
//! [`SessionAcquirer`], which walks an ordered list of strategies and keeps
//! a diagnostic for every strategy that did not work out. The handle is
//! dropped, closing the connection, when the page's request finishes.

pub mod acquirer;
pub mod sources;
pub mod strategies;

use diesel_async::AsyncPgConnection;

use crate::config::OrderConfig;

pub use acquirer::{
    AcquireError, AcquireFailure, AcquireStrategy, Acquired, Diagnostic, SessionAcquirer,
};
use strategies::{ActiveSessionStrategy, ConnectionProfileStrategy, SecretsStrategy};

/// A live connection owned by a single page load.
pub struct SessionHandle {
    conn: AsyncPgConnection,
}

impl SessionHandle {
    pub fn new(conn: AsyncPgConnection) -> Self {
        Self { conn }
    }

    pub fn connection_mut(&mut self) -> &mut AsyncPgConnection {
        &mut self.conn
    }
}

/// Build the production chain: connection profile, then the runtime-injected
/// session, then credentials from the secrets file.
pub fn default_acquirer(
    config: &OrderConfig,
    active_session_url: Option<String>,
) -> SessionAcquirer<SessionHandle> {
    SessionAcquirer::new()
        .with_strategy(ConnectionProfileStrategy::new(
            config.connections_file.clone(),
            config.connection_profile.clone(),
        ))
        .with_strategy(ActiveSessionStrategy::new(active_session_url))
        .with_strategy(SecretsStrategy::new(
            config.secrets_file.clone(),
            config.secrets_key.clone(),
        ))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrderConfig;

    #[test]
    fn default_chain_tries_profile_then_active_then_secrets() {
        let config = OrderConfig::from_lookup(|_| None);
        let acquirer = default_acquirer(&config, None);
        assert_eq!(
            acquirer.strategy_names(),
            vec!["connection profile", "active session", "secrets"]
        );
    }
}
