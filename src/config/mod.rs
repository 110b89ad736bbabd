use std::{env, process, str::FromStr, time::Duration};

pub struct Config {
    pub base_url: String,
    pub database_url: String,
    pub server_addr: String,
    pub max_connections: u32,
    pub request_timeout: Duration,
    pub public_dir: String,
}

impl Config {
    pub fn load() -> Self {
        let database_url = get_env("DATABASE_URL");
        let server_addr = get_env_or("SERVER_ADDRESS", "0.0.0.0:3000");
        let base_url = env::var("BASE_URL").unwrap_or_else(|_| {
            tracing::warn!(
                "BASE_URL environment variable not set, using default: {}",
                &server_addr
            );
            format!("http://{}", server_addr)
        });
        let max_connections = get_parsed_or("DB_MAX_CONNECTIONS", 10);
        let request_timeout = Duration::from_secs(get_parsed_or("REQUEST_TIMEOUT_SECS", 30));
        let public_dir = get_env_or("PUBLIC_DIR", "public");
        Self {
            base_url,
            database_url,
            server_addr,
            max_connections,
            request_timeout,
            public_dir,
        }
    }
}

fn get_env(var: &str) -> String {
    env::var(var).unwrap_or_else(|_| {
        tracing::error!("{} environment variable is required but not set.", var);
        process::exit(1);
    })
}

fn get_env_or(var: &str, default: &str) -> String {
    env::var(var).unwrap_or_else(|_| {
        tracing::warn!(
            "{} environment variable not set, using default: {}",
            var,
            default
        );
        default.to_string()
    })
}

fn get_parsed_or<T>(var: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match env::var(var) {
        Ok(raw) => parse_or(var, &raw, default),
        Err(_) => default,
    }
}

fn parse_or<T>(var: &str, raw: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(
            "{} has invalid value {:?}, using default: {}",
            var,
            raw,
            default
        );
        default
    })
}
