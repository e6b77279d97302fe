use crate::conf::GeoipmapConfig;
use crate::conf::types::ServerConfig;
use crate::geo::{GeoResolver, MaxMindResolver};
use crate::ingest::{IngestLoop, IngestReport};
use crate::server::{MapGateway, PidFile, ServeError};
use crate::store::AggregateStore;
use anyhow::{Context, Result};
use pingora::prelude::*;
use pingora::server::Server;
use pingora::server::configuration::ServerConf;
use std::io;
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const BROWSER_WAIT: Duration = Duration::from_secs(10);

/// Open the geo database, start ingesting stdin, and serve until killed.
pub fn run(config: GeoipmapConfig) -> Result<()> {
    // No geo database, no ingest and no listener.
    let resolver = MaxMindResolver::from_config(&config.geoip)
        .context("failed to open the geo database")?;

    let store = Arc::new(AggregateStore::new());
    let ingest = IngestLoop::from_config(&config.ingest, resolver, Arc::clone(&store));

    // Attempt to write pid file (best-effort)
    let pid_file = config
        .server
        .pid_file
        .as_ref()
        .and_then(|path| match PidFile::create(path) {
            Ok(pid) => {
                tracing::info!(pid_file = %path.display(), "pid file written");
                Some(pid)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to write pid file; continuing");
                None
            }
        });

    let server = build_pingora_server(&config.server, store)?;

    if let Some(pid_file) = pid_file {
        ctrlc::set_handler(move || {
            tracing::info!("shutdown requested, removing pid file");
            pid_file.remove();
            std::process::exit(0);
        })?;
    }

    spawn_ingest(ingest).context("failed to start ingest thread")?;

    let url = format!("http://{}", config.server.listen);
    println!("{url}");

    if config.server.open_browser {
        open_when_listening(url, config.server.listen_addr()?);
    }

    server.run_forever();
}

/// Open `url` in the default browser once `addr` accepts connections.
fn open_when_listening(url: String, addr: SocketAddr) {
    let spawned = thread::Builder::new()
        .name("browser".to_string())
        .spawn(move || {
            let deadline = Instant::now() + BROWSER_WAIT;
            while TcpStream::connect(addr).is_err() {
                if Instant::now() > deadline {
                    tracing::warn!(%addr, "listener not ready, not opening browser");
                    return;
                }
                thread::sleep(Duration::from_millis(50));
            }

            if let Err(e) = open::that(&url) {
                tracing::warn!(error = %e, url = %url, "failed to open browser");
            }
        });

    if let Err(e) = spawned {
        tracing::warn!(error = %e, "failed to start browser thread");
    }
}

/// Run `ingest` over stdin on its own thread.
pub fn spawn_ingest<R>(ingest: IngestLoop<R>) -> io::Result<JoinHandle<IngestReport>>
where
    R: GeoResolver + 'static,
{
    thread::Builder::new()
        .name("ingest".to_string())
        .spawn(move || ingest.run(io::stdin().lock()))
}

/// Build the Pingora server answering map requests from `store`.
pub fn build_pingora_server(
    config: &ServerConfig,
    store: Arc<AggregateStore>,
) -> Result<Server, ServeError> {
    let listen = config.listen_addr()?;

    let mut server = if let Some(threads) = config.threads {
        tracing::debug!(
            threads,
            "Creating Pingora server with overridden worker threads"
        );
        let mut conf = ServerConf::new().ok_or(ServeError::ServerConf)?;
        conf.threads = threads;
        Server::new_with_opt_and_conf(None, conf)
    } else {
        // "None" is required here to truly tell Pingora to use its default settings.
        Server::new(None)?
    };

    server.bootstrap();

    let gateway = MapGateway::new(store, config.title.as_deref())?;

    let mut svc = http_proxy_service(&server.configuration, gateway);
    svc.add_tcp(&listen.to_string());

    server.add_service(svc);

    Ok(server)
}
