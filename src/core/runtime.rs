//! Node runtime.
//!
//! Owns the bootstrap [`Context`] for the life of the process:
//! - Start: validate config → build context → [`Context::init`]
//! - Run: wait for Ctrl-C or a shutdown request
//! - Stop: signal shutdown; engines are released when the runtime is dropped

use crate::core::config::Config;
use crate::core::context::Context;
use anyhow::{Context as _, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Node runtime holding the initialized context.
pub struct Runtime {
    /// Context built from configuration; initialized by [`Runtime::start`].
    context: Context,

    /// Whether the runtime is running.
    running: Arc<AtomicBool>,

    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,

    /// Shutdown signal receiver.
    shutdown_rx: watch::Receiver<bool>,
}

impl Runtime {
    /// Create a new runtime with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate().context("invalid configuration")?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Ok(Self {
            context: config.to_context(),
            running: Arc::new(AtomicBool::new(false)),
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Get the bootstrap context.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Check if the runtime is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Get a shutdown receiver for graceful shutdown coordination.
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    /// Initialize the context.
    ///
    /// An error here is fatal: the caller should exit rather than retry.
    pub fn start(&mut self) -> Result<()> {
        tracing::info!(
            addr = %self.context.addr,
            stores = %self.context.stores,
            gossip = %self.context.gossip_bootstrap,
            "starting node"
        );

        self.context.init().context("node initialization failed")?;

        self.running.store(true, Ordering::Release);
        tracing::info!(
            engines = self.context.engines().len(),
            resolvers = self.context.gossip_bootstrap_resolvers().len(),
            linearizable = self.context.linearizable,
            "node started"
        );
        Ok(())
    }

    /// Trigger graceful shutdown.
    pub fn shutdown(&self) {
        tracing::info!("shutdown requested");
        let _ = self.shutdown_tx.send(true);
    }

    /// Start, then wait for Ctrl-C or a shutdown request, then stop.
    pub async fn run(&mut self) -> Result<()> {
        self.start()?;

        let mut shutdown_rx = self.shutdown_rx.clone();
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::warn!("shutdown signal received (SIGINT)");
            }
            _ = async {
                while !*shutdown_rx.borrow() {
                    if shutdown_rx.changed().await.is_err() {
                        break;
                    }
                }
            } => {
                tracing::info!("shutdown requested by component");
            }
        }

        self.stop();
        Ok(())
    }

    /// Stop the runtime.
    pub fn stop(&mut self) {
        tracing::info!("stopping node");
        self.running.store(false, Ordering::Release);
        let _ = self.shutdown_tx.send(true);
        tracing::info!("node stopped");
    }
}
