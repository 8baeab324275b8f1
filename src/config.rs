use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime configuration, read from flags or the matching environment variables.
#[derive(Parser, Debug, Clone)]
#[command(name = "student-records")]
#[command(about = "File-backed student record service", long_about = None)]
pub struct ServerConfig {
    /// Address the HTTP server listens on.
    #[arg(long, env = "STUDENTS_BIND", default_value = "127.0.0.1:5678")]
    pub bind: SocketAddr,

    /// Directory holding one JSON file per record.
    #[arg(long, env = "STUDENTS_DATA_DIR", default_value = "students")]
    pub data_dir: PathBuf,

    /// Directory of static files served for paths outside the API.
    #[arg(long, env = "STUDENTS_PUBLIC_DIR")]
    pub public_dir: Option<PathBuf>,

    /// Answer write failures with 200 instead of 500.
    #[arg(long, env = "STUDENTS_LEGACY_WRITE_STATUS")]
    pub legacy_write_status: bool,
}
