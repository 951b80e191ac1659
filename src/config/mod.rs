use std::{
    collections::HashMap,
    env,
    fs,
    io::{BufRead, BufReader},
    path::PathBuf,
    time::Duration,
};

use directories::BaseDirs;

pub const DEFAULT_NOTEBOOK_PATH: &str = "L9_Pareto_CaseStudy_Homework.ipynb";
pub const DEFAULT_TIMEOUT_SECS: u64 = 240;
pub const DEFAULT_TEST_NAME: &str = "Heat Sink Multi-Objective Optimization";

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(default_config_path())
    }

    /// Defaults, then the rc file at `config_path`, then environment variables.
    pub fn load_from(config_path: PathBuf) -> Self {
        let mut map = default_map();

        if config_path.exists() {
            if let Ok(file) = fs::File::open(&config_path) {
                let reader = BufReader::new(file);
                for line in reader.lines().map_while(Result::ok) {
                    if let Some((k, v)) = parse_line(&line) {
                        map.insert(k, v);
                    }
                }
            }
        }

        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map, config_path }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }

    /// Explicit overrides (CLI flags) win over everything loaded.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.inner.insert(key.to_string(), value.into());
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.trim().parse::<u64>().ok())
    }

    pub fn get_path(&self, key: &str) -> Option<PathBuf> {
        self.get(key).map(PathBuf::from)
    }

    pub fn notebook_path(&self) -> PathBuf {
        self.get_path("NOTEBOOK_PATH")
            .unwrap_or_else(|| PathBuf::from(DEFAULT_NOTEBOOK_PATH))
    }

    pub fn interpreter(&self) -> String {
        self.get("PYTHON_INTERPRETER")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "python3".to_string())
    }

    /// A missing, zero or unparsable value falls back to the 240 s default.
    pub fn execution_timeout(&self) -> Duration {
        let secs = self
            .get_u64("EXECUTION_TIMEOUT")
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn test_name(&self) -> String {
        self.get("TEST_NAME")
            .unwrap_or_else(|| DEFAULT_TEST_NAME.to_string())
    }

    pub fn log_filter(&self) -> String {
        self.get("NBGRADE_LOG").unwrap_or_else(|| "warn".to_string())
    }
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (k, v) = line.split_once('=')?;
    Some((k.trim().to_string(), v.trim().to_string()))
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &[
        "NOTEBOOK_PATH",
        "PYTHON_INTERPRETER",
        "EXECUTION_TIMEOUT",
        "TEST_NAME",
    ];

    KEYS.contains(&k) || k.starts_with("NBGRADE_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("nbgrade").join(".nbgraderc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert("NOTEBOOK_PATH".into(), DEFAULT_NOTEBOOK_PATH.into());
    m.insert("PYTHON_INTERPRETER".into(), "python3".into());
    m.insert("EXECUTION_TIMEOUT".into(), DEFAULT_TIMEOUT_SECS.to_string());
    m.insert("TEST_NAME".into(), DEFAULT_TEST_NAME.into());
    m.insert("NBGRADE_LOG".into(), "warn".into());
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_line_skips_comments_and_blanks() {
        assert_eq!(parse_line("# comment"), None);
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("no equals sign"), None);
        assert_eq!(
            parse_line(" EXECUTION_TIMEOUT = 30 "),
            Some(("EXECUTION_TIMEOUT".to_string(), "30".to_string()))
        );
    }

    #[test]
    fn test_rc_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".nbgraderc");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "# local overrides").unwrap();
        writeln!(f, "TEST_NAME=Practice run").unwrap();
        drop(f);

        let cfg = Config::load_from(path);
        if env::var("TEST_NAME").is_err() {
            assert_eq!(cfg.test_name(), "Practice run");
        }
    }

    #[test]
    fn test_timeout_falls_back_on_bad_values() {
        let mut cfg = Config::load_from(PathBuf::from("/nonexistent/.nbgraderc"));
        cfg.set("EXECUTION_TIMEOUT", "soon");
        assert_eq!(cfg.execution_timeout(), Duration::from_secs(240));
        cfg.set("EXECUTION_TIMEOUT", "0");
        assert_eq!(cfg.execution_timeout(), Duration::from_secs(240));
        cfg.set("EXECUTION_TIMEOUT", "5");
        assert_eq!(cfg.execution_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_set_overrides_loaded_value() {
        let mut cfg = Config::load_from(PathBuf::from("/nonexistent/.nbgraderc"));
        cfg.set("PYTHON_INTERPRETER", "/opt/python/bin/python");
        assert_eq!(cfg.interpreter(), "/opt/python/bin/python");
    }
}
