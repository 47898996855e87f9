//! Shared utilities for command handlers

use crate::config::{is_yaml_path, Config};
use crate::error::{Error, Result};
use jsonmap_core::Template;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path that stands for stdin
const STDIN: &str = "-";

/// Read a JSON or YAML document from a file, or from stdin for `-`
pub fn read_document(path: &Path) -> Result<Value> {
    if path.as_os_str() == STDIN {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        debug!(bytes = content.len(), "Read document from stdin");
        return parse_any(&content, path);
    }

    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "Read document");
    parse_document(&content, path)
}

/// Parse by file extension
fn parse_document(content: &str, path: &Path) -> Result<Value> {
    if is_yaml_path(path) {
        serde_yaml::from_str(content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
        })
    } else {
        serde_json::from_str(content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
        })
    }
}

/// Parse stdin, which carries no extension: JSON first, then YAML
fn parse_any(content: &str, path: &Path) -> Result<Value> {
    serde_json::from_str::<Value>(content)
        .or_else(|_| serde_yaml::from_str::<Value>(content))
        .map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON or YAML".to_string(),
        })
}

/// Locate a template by path, or by name inside `templates_dir`
pub fn find_template(name: &str, config: &Config) -> Result<PathBuf> {
    let direct = Path::new(name);
    if direct.exists() {
        return Ok(direct.to_path_buf());
    }

    let Some(dir) = config.templates_dir.as_ref() else {
        return Err(Error::TemplateNotFound {
            name: name.to_string(),
        });
    };

    ["json", "yaml", "yml"]
        .iter()
        .map(|ext| dir.join(format!("{}.{}", name, ext)))
        .chain(std::iter::once(dir.join(name)))
        .find(|candidate| candidate.exists())
        .ok_or_else(|| Error::TemplateNotFound {
            name: name.to_string(),
        })
}

/// Find, read and parse a data-only template
pub fn load_template(name: &str, config: &Config) -> Result<(PathBuf, Template)> {
    let path = find_template(name, config)?;
    let document = read_document(&path)?;
    let template = Template::from_json(&document)?;
    debug!(path = %path.display(), fields = template.len(), "Loaded template");
    Ok((path, template))
}
