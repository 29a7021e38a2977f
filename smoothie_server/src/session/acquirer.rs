//! Ordered fallback over session acquisition strategies.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::store::OrderStore;

/// Why a single strategy did not yield a usable session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquireFailure {
    #[error("not configured: {0}")]
    NotConfigured(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("session unusable: {0}")]
    Unusable(String),
}

/// One entry of the acquisition log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub strategy: &'static str,
    pub reason: AcquireFailure,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.strategy, self.reason)
    }
}

/// Every strategy failed. Holds one diagnostic per attempt, in attempt order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no database session could be acquired ({count} strategies failed)", count = .diagnostics.len())]
pub struct AcquireError {
    pub diagnostics: Vec<Diagnostic>,
}

#[async_trait]
pub trait AcquireStrategy<S>: Send + Sync {
    fn name(&self) -> &'static str;

    async fn attempt(&self) -> Result<S, AcquireFailure>;
}

/// A probed session plus the log of the strategies that were passed over.
#[derive(Debug)]
pub struct Acquired<S> {
    pub handle: S,
    pub source: &'static str,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct SessionAcquirer<S> {
    strategies: Vec<Box<dyn AcquireStrategy<S>>>,
}

impl<S> Default for SessionAcquirer<S> {
    fn default() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }
}

impl<S: OrderStore> SessionAcquirer<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a strategy; strategies are tried in the order they were added.
    pub fn with_strategy(mut self, strategy: impl AcquireStrategy<S> + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Try each strategy in turn and return the first handle that passes a probe.
    pub async fn acquire(&self) -> Result<Acquired<S>, AcquireError> {
        let mut diagnostics = Vec::new();

        for strategy in &self.strategies {
            let name = strategy.name();

            let reason = match strategy.attempt().await {
                Ok(mut handle) => match handle.probe().await {
                    Ok(()) => {
                        crate::metrics::session_acquired(name);
                        tracing::info!(
                            source = name,
                            skipped = diagnostics.len(),
                            "Database session acquired"
                        );
                        return Ok(Acquired {
                            handle,
                            source: name,
                            diagnostics,
                        });
                    }
                    Err(e) => AcquireFailure::Unusable(e.to_string()),
                },
                Err(reason) => reason,
            };

            tracing::warn!(strategy = name, reason = %reason, "Session strategy failed");
            crate::metrics::session_attempt_failed(name);
            diagnostics.push(Diagnostic {
                strategy: name,
                reason,
            });
        }

        crate::metrics::session_exhausted();
        tracing::error!(
            attempts = diagnostics.len(),
            "No database session could be acquired"
        );
        Err(AcquireError { diagnostics })
    }
}
