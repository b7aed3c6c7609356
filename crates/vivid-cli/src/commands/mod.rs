use anyhow::{Context as _, Result};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use vivid_core::ClientError;
use vivid_core::config::ClientConfig;
use vivid_core::gateway::ContentGateway;
use vivid_core::session::SessionStore;
use vivid_infrastructure::paths::VividPaths;
use vivid_infrastructure::{ConfigService, FileSessionStore, HttpContentGateway};

pub mod auth;
pub mod comments;
pub mod posts;

/// Everything a command needs: resolved config, the persisted session and a
/// gateway that reads its token from that session.
pub struct Context {
    pub config: ClientConfig,
    pub store: Arc<dyn SessionStore>,
    pub gateway: Arc<dyn ContentGateway>,
}

impl Context {
    pub fn load() -> Result<Self> {
        let paths = VividPaths::platform().context("Failed to locate the config directory")?;
        let config_service = ConfigService::new(&paths);
        let config = config_service.load()?;
        let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&paths));
        let gateway: Arc<dyn ContentGateway> =
            Arc::new(HttpContentGateway::new(&config, store.clone()));

        tracing::debug!(
            "[CLI] Using backend {} (config: {})",
            config.api_base_url,
            config_service.config_path().display()
        );
        Ok(Self {
            config,
            store,
            gateway,
        })
    }
}

/// Turns a command result into the process outcome.
///
/// Exit code 2 means the session is gone and the user should run
/// `vivid login`; 3 is an ownership denial.
pub fn report(outcome: Result<()>) -> Result<()> {
    let Err(err) = outcome else {
        return Ok(());
    };

    if let Some(client_err) = err.downcast_ref::<ClientError>() {
        if client_err.requires_login() {
            eprintln!("{}. Run `vivid login` to sign in again.", client_err);
            std::process::exit(2);
        }
        if client_err.is_not_owner() {
            eprintln!("{}. Only the author can change it.", client_err);
            std::process::exit(3);
        }
    }
    Err(err)
}

/// Reads one line from stdin after printing `label`.
pub fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
