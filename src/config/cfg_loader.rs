//! File-backed config loader using the classic INI layout.
//!
//! ```text
//! [WLBB_CONFIG]
//! fallback = value
//!
//! [DEVICES]
//! count = 3
//! names = first
//!     second
//! ```
//!
//! Entries of the `WLBB_CONFIG` section are inherited by every other section
//! that does not set them itself.

use std::fs;
use std::path::{Path, PathBuf};

use super::loader::ConfigLoader;
use super::types::{ConfigDict, ConfigValue, SectionDict, value_to_text};
use crate::error::{Result, WlbbError};
use crate::paths::{create_dir, create_file, delete_file};

/// File extension of configurations handled by [`CfgConfigLoader`].
pub const CFG_EXTENSION: &str = "cfg";

/// Section whose entries act as fallback values for every other section.
pub const FALLBACK_SECTION: &str = "WLBB_CONFIG";

/// A config loader storing each configuration as `<dir>/<name>.cfg`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CfgConfigLoader;

impl CfgConfigLoader {
    pub fn new() -> Self {
        Self
    }

    /// Get the file path for a configuration.
    pub fn config_path(&self, dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}.{}", name, CFG_EXTENSION))
    }
}

impl ConfigLoader for CfgConfigLoader {
    fn get_config_list(&self, dir: &Path) -> Result<Vec<String>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == CFG_EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn create_config(&self, dir: &Path, name: &str) -> Result<()> {
        create_dir(dir)?;
        create_file(&self.config_path(dir, name))
    }

    fn delete_config(&self, dir: &Path, name: &str) -> Result<()> {
        if !dir.is_dir() {
            return Ok(());
        }
        delete_file(&self.config_path(dir, name))
    }

    fn load_config(&self, dir: &Path, name: &str) -> Result<ConfigDict> {
        let path = self.config_path(dir, name);
        if !path.is_file() {
            log::debug!("No config file at {}", path.display());
            return Ok(ConfigDict::new());
        }

        let text = fs::read_to_string(&path)?;
        let dict = parse_cfg(&text, &path)?;
        log::debug!("Loaded {} section(s) from {}", dict.len(), path.display());
        Ok(dict)
    }

    fn save_config(&self, dict: &ConfigDict, dir: &Path, name: &str) -> Result<()> {
        check_cfg(dict)?;
        self.create_config(dir, name)?;

        let path = self.config_path(dir, name);
        fs::write(&path, render_cfg(dict))?;
        log::debug!("Saved {} section(s) to {}", dict.len(), path.display());
        Ok(())
    }
}

/// Parse INI text into a config dictionary. `path` is only used in errors.
pub fn parse_cfg(text: &str, path: &Path) -> Result<ConfigDict> {
    let error = |line: usize, message: String| WlbbError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    };

    let mut dict = ConfigDict::new();
    let mut section: Option<String> = None;
    let mut last_key: Option<String> = None;
    // Blank lines seen since the last value line; kept only if the value goes on
    let mut blank_lines = 0;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() {
            if last_key.is_some() {
                blank_lines += 1;
            }
            continue;
        }
        if line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        // Indented line: continuation of the previous value
        if raw.starts_with([' ', '\t']) {
            if let (Some(sec), Some(key)) = (&section, &last_key) {
                if let Some(ConfigValue::String(value)) = dict.get_mut(sec).and_then(|s| s.get_mut(key)) {
                    value.push_str(&"\n".repeat(blank_lines + 1));
                    value.push_str(line);
                    blank_lines = 0;
                    continue;
                }
            }
        }
        blank_lines = 0;

        if let Some(inner) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = inner.trim();
            if name.is_empty() {
                return Err(error(line_no, "empty section name".to_string()));
            }
            if dict.contains_key(name) {
                return Err(error(line_no, format!("duplicate section {:?}", name)));
            }
            dict.insert(name.to_string(), SectionDict::new());
            section = Some(name.to_string());
            last_key = None;
            continue;
        }

        let Some(sec) = &section else {
            return Err(error(line_no, "missing section header".to_string()));
        };
        let Some(split) = line.find(['=', ':']) else {
            return Err(error(line_no, format!("expected 'key = value', got {:?}", line)));
        };

        let key = line[..split].trim();
        let value = line[split + 1..].trim();
        if key.is_empty() {
            return Err(error(line_no, "empty parameter name".to_string()));
        }

        let params = dict.entry(sec.clone()).or_default();
        if params.contains_key(key) {
            return Err(error(line_no, format!("duplicate parameter {:?} in section {:?}", key, sec)));
        }
        params.insert(key.to_string(), ConfigValue::String(value.to_string()));
        last_key = Some(key.to_string());
    }

    if let Some(fallback) = dict.remove(FALLBACK_SECTION) {
        for params in dict.values_mut() {
            for (key, value) in &fallback {
                params.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }
        if !fallback.is_empty() {
            dict.insert(FALLBACK_SECTION.to_string(), fallback);
        }
    }

    Ok(dict)
}

/// Check that every section name, key and value of `dict` reads back
/// unchanged from the text written by [`render_cfg`].
///
/// Values are compared as text; fallback inheritance is not considered.
pub fn check_cfg(dict: &ConfigDict) -> Result<()> {
    for (name, params) in dict {
        if !is_writable_section(name) {
            return Err(WlbbError::Unrepresentable(format!("section name {:?}", name)));
        }
        for (key, value) in params {
            if !is_writable_key(key) {
                return Err(WlbbError::Unrepresentable(format!("key {:?} in section {:?}", key, name)));
            }
            if !is_writable_value(&value_to_text(value)) {
                return Err(WlbbError::Unrepresentable(format!(
                    "value of {:?} in section {:?}",
                    key, name
                )));
            }
        }
    }
    Ok(())
}

fn is_writable_section(name: &str) -> bool {
    !name.is_empty() && name.trim() == name && !name.contains([']', '\n', '\r'])
}

fn is_writable_key(key: &str) -> bool {
    !key.is_empty()
        && key.trim() == key
        && !key.contains(['=', ':', '\n', '\r'])
        && !key.starts_with(['#', ';', '['])
}

fn is_writable_value(text: &str) -> bool {
    if text.contains('\r') {
        return false;
    }

    let mut lines = text.split('\n');
    let first = lines.next().unwrap_or_default();
    let rest: Vec<&str> = lines.collect();

    first.trim() == first
        && rest.last().is_none_or(|last| !last.is_empty())
        && rest
            .iter()
            .all(|line| line.trim() == *line && !line.starts_with(['#', ';']))
}

/// Render a config dictionary as INI text.
pub fn render_cfg(dict: &ConfigDict) -> String {
    let mut out = String::new();

    if let Some(fallback) = dict.get(FALLBACK_SECTION) {
        render_section(&mut out, FALLBACK_SECTION, fallback);
    }
    for (name, params) in dict {
        if name != FALLBACK_SECTION {
            render_section(&mut out, name, params);
        }
    }

    out
}

fn render_section(out: &mut String, name: &str, params: &SectionDict) {
    out.push_str(&format!("[{}]\n", name));
    for (key, value) in params {
        let text = value_to_text(value);
        let mut lines = text.split('\n');
        out.push_str(&format!("{} = {}\n", key, lines.next().unwrap_or_default()));
        for line in lines {
            out.push_str(&format!("\t{}\n", line));
        }
    }
    out.push('\n');
}
