use crate::conf::{ConfigError, GeoipmapConfig, load_config};
use std::path::PathBuf;

pub fn check(path: PathBuf) -> anyhow::Result<()> {
    match load_config(&path) {
        Ok(cfg) => {
            print_summary(&cfg);
            Ok(())
        }
        Err(err) => {
            print_config_error(&err);
            std::process::exit(1);
        }
    }
}

fn print_summary(cfg: &GeoipmapConfig) {
    println!("✔ Config loaded successfully");
    println!("✔ listening on {}", cfg.server.listen);
    println!("✔ city database {}", cfg.geoip.city_db.display());
    match cfg.ingest.sentinel_ip {
        Some(ip) => println!("✔ ignoring own address {ip}"),
        None => println!("✔ no own address configured"),
    }
    println!(
        "✔ {} automated traffic signatures ({} extra)",
        crate::ingest::AUTOMATED_TRAFFIC_SIGNATURES.len() + cfg.ingest.extra_signatures.len(),
        cfg.ingest.extra_signatures.len()
    );
}

fn print_config_error(err: &ConfigError) {
    eprintln!("{err}");
    if let Some(hint) = config_error_hint(err) {
        eprintln!();
        eprintln!("{hint}");
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        //---------------------------------------------------------------------
        // Server
        //---------------------------------------------------------------------
        ConfigError::InvalidListenAddr { .. } => Some(
            "`listen` must be an IP address and port.\n\
             \n\
             Example:\n\
             \n\
             server {\n\
             \x20 listen = \"127.0.0.1:8080\"\n\
             }",
        ),

        ConfigError::InvalidThreads => Some(
            "Remove `threads` to let the server pick a default, or set it to 1 or more.",
        ),

        //---------------------------------------------------------------------
        // GeoIP
        //---------------------------------------------------------------------
        ConfigError::MissingCityDb => Some(
            "Point `city_db` at a MaxMind city database.\n\
             \n\
             Example:\n\
             \n\
             geoip {\n\
             \x20 city_db = \"db/GeoLite2-City.mmdb\"\n\
             }",
        ),

        ConfigError::MissingLocale => Some(
            "`locale` selects the name language, e.g. \"en\", \"de\" or \"ja\".",
        ),

        //---------------------------------------------------------------------
        // Ingest
        //---------------------------------------------------------------------
        ConfigError::EmptySignature { .. } => Some(
            "An empty signature would match every line. Remove it from `extra_signatures`.",
        ),

        //---------------------------------------------------------------------
        // Everything else: no hint
        //---------------------------------------------------------------------
        _ => None,
    }
}
