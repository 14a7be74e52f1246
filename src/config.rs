use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize)]
pub struct Paths {
    /// Root of the static site. `data/` and `public/` live below it.
    pub site_dir: PathBuf,
    pub template_dir: PathBuf,
}

#[derive(Deserialize)]
pub struct Defaults {
    pub recent_post_count: Option<usize>,
    pub scroll_delay_ms: Option<u64>,
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub paths: Paths,
    pub defaults: Option<Defaults>,
    pub server: Server,
    pub log: Option<Log>,
}

pub const DEFAULT_RECENT_POST_COUNT: usize = 8;
pub const DEFAULT_SCROLL_DELAY_MS: u64 = 50;

impl Config {
    pub fn recent_post_count(&self) -> usize {
        self.defaults.as_ref()
            .and_then(|d| d.recent_post_count)
            .unwrap_or(DEFAULT_RECENT_POST_COUNT)
    }

    pub fn scroll_delay(&self) -> Duration {
        let ms = self.defaults.as_ref()
            .and_then(|d| d.scroll_delay_ms)
            .unwrap_or(DEFAULT_SCROLL_DELAY_MS);
        Duration::from_millis(ms)
    }
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if !path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent()
        .ok_or(io::Error::new(ErrorKind::NotFound, "Executable has no parent directory"))?;
    let str_path = path.to_string_lossy();
    Ok(PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy())))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        site_dir: parse_path(cfg.paths.site_dir)?,
        template_dir: parse_path(cfg.paths.template_dir)?,
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
