use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    settings: HashMap<String, String>,
    layouts: HashMap<String, String>,
    slides: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Carousel settings objects as the authoring surface stores them.
pub mod settings {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.settings.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.settings, "settings", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.settings, "settings", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.settings, "settings", name)?;
        Ok(resolve_path(rel))
    }
}

/// Measured layouts: container width, per-slide content widths and spacing.
pub mod layouts {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.layouts.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.layouts, "layout", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.layouts, "layout", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.layouts, "layout", name)?;
        Ok(resolve_path(rel))
    }
}

/// Slide descriptions (kind, ratio, media) plus the height they render at.
pub mod slides {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.slides.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.slides, "slides", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.slides, "slides", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.slides, "slides", name)?;
        Ok(resolve_path(rel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn every_manifest_entry_loads() {
        for name in settings::keys() {
            settings::load::<Value>(&name).unwrap();
        }
        for name in layouts::keys() {
            layouts::load::<Value>(&name).unwrap();
        }
        for name in slides::keys() {
            assert!(slides::path(&name).unwrap().is_file());
            slides::load::<Value>(&name).unwrap();
        }
        assert!(slides::keys().contains(&"hero-mixed".to_string()));
    }

    #[test]
    fn unknown_names_are_errors() {
        let err = slides::json("missing").unwrap_err();
        assert!(err.to_string().contains("unknown slides fixture 'missing'"));
        assert!(layouts::path("missing").is_err());
    }
}
