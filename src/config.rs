use std::{env, net::SocketAddr, path::PathBuf};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_UPLOAD_LIMIT: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub db_path: PathBuf,
    pub public_dir: PathBuf,
    pub upload_limit: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let db_path = env::var("GOAL_DB_PATH").unwrap_or_else(|_| "data/goals.db".into());
        let public_dir = env::var("GOAL_PUBLIC_DIR").unwrap_or_else(|_| "public".into());
        let upload_limit = env::var("GOAL_UPLOAD_LIMIT_BYTES")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .unwrap_or(DEFAULT_UPLOAD_LIMIT);

        Self {
            port,
            db_path: PathBuf::from(db_path),
            public_dir: PathBuf::from(public_dir),
            upload_limit,
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// Uploaded images live under the public root so they are served as-is.
    pub fn upload_dir(&self) -> PathBuf {
        self.public_dir.join("images")
    }
}
