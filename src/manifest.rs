//! Forest manifest parsing
//!
//! Parses `forest.toml` files describing named trees and extra links

use crate::address::Address;
use crate::error::{Error, Rejection, Result};
use crate::forest::Forest;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Load a manifest from a file
pub fn load(path: &Path) -> Result<ForestManifest> {
    let manifest = read(path)?;
    manifest.validate()?;
    Ok(manifest)
}

/// Load and merge multiple manifests
///
/// Files are merged in order: trees with the same name are replaced by the
/// later definition, links accumulate, and config fields set later win.
pub fn load_merged(paths: &[PathBuf]) -> Result<ForestManifest> {
    let mut merged: Option<ForestManifest> = None;

    for path in paths {
        let manifest = read(path)?;
        merged = Some(match merged {
            None => manifest,
            Some(base) => base.merge(manifest),
        });
    }

    let manifest = merged
        .ok_or_else(|| Error::ConfigValidation("No manifest files provided".into()))?;
    manifest.validate()?;
    Ok(manifest)
}

fn read(path: &Path) -> Result<ForestManifest> {
    let content = fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Root manifest structure
#[derive(Debug, Default, Deserialize)]
pub struct ForestManifest {
    /// Global settings
    #[serde(default)]
    pub config: GlobalConfig,

    /// Trees, merged into one forest in order
    #[serde(default)]
    pub trees: Vec<TreeDef>,

    /// Links applied after every tree is merged
    #[serde(default)]
    pub links: Vec<LinkDef>,
}

/// Global manifest settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalConfig {
    /// Log filter used when RUST_LOG is unset
    pub log: Option<String>,

    /// Abort on the first rejected tree or link instead of skipping it
    pub strict: Option<bool>,
}

impl GlobalConfig {
    pub fn log_filter(&self) -> &str {
        self.log.as_deref().unwrap_or("warn")
    }

    pub fn is_strict(&self) -> bool {
        self.strict.unwrap_or(false)
    }

    fn merge(self, other: GlobalConfig) -> GlobalConfig {
        GlobalConfig {
            log: other.log.or(self.log),
            strict: other.strict.or(self.strict),
        }
    }
}

/// A named tree in bracket notation
#[derive(Debug, Clone, Deserialize)]
pub struct TreeDef {
    pub name: String,
    pub notation: String,
}

impl TreeDef {
    fn build(&self) -> Result<Forest> {
        Forest::parse(&self.notation)
            .map_err(|e| Error::ConfigValidation(format!("tree '{}': {}", self.name, e)))
    }
}

/// An extra link between members of different trees
#[derive(Debug, Clone, Deserialize)]
pub struct LinkDef {
    pub from: Address,
    pub to: Address,
}

/// A manifest entry that was skipped during assembly
#[derive(Debug, Clone)]
pub struct Skipped {
    pub entry: String,
    pub reason: Rejection,
}

/// Result of assembling a manifest
#[derive(Debug)]
pub struct Assembly {
    pub forest: Forest,
    pub skipped: Vec<Skipped>,
}

impl ForestManifest {
    /// Parse and validate manifest text
    pub fn from_toml(content: &str) -> Result<Self> {
        let manifest: ForestManifest = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(Error::ConfigValidation("No trees defined".into()));
        }

        let mut names = HashSet::new();
        for tree in &self.trees {
            if !names.insert(&tree.name) {
                return Err(Error::ConfigValidation(format!(
                    "Duplicate tree name: {}",
                    tree.name
                )));
            }
            if tree.notation.trim().is_empty() {
                return Err(Error::ConfigValidation(format!(
                    "Tree '{}' has an empty notation",
                    tree.name
                )));
            }
        }

        for link in &self.links {
            if link.from == link.to {
                return Err(Error::ConfigValidation(format!(
                    "Link from {} to itself",
                    link.from
                )));
            }
        }

        Ok(())
    }

    /// Merge another manifest into this one
    pub fn merge(mut self, other: ForestManifest) -> ForestManifest {
        self.config = self.config.merge(other.config);

        for tree in other.trees {
            if let Some(existing) = self.trees.iter_mut().find(|t| t.name == tree.name) {
                *existing = tree;
            } else {
                self.trees.push(tree);
            }
        }

        self.links.extend(other.links);
        self
    }

    /// Build one forest from every tree and link
    ///
    /// The first tree seeds the forest; later trees are merged and links are
    /// connected in order. Rejected entries abort in strict mode and are
    /// skipped otherwise.
    pub fn assemble(&self) -> Result<Assembly> {
        let mut trees = self.trees.iter();
        let first = trees
            .next()
            .ok_or_else(|| Error::ConfigValidation("No trees defined".into()))?;

        let mut forest = first.build()?;
        let mut skipped = Vec::new();

        for tree in trees {
            let other = tree.build()?;
            if let Err(reason) = forest.union(&other) {
                self.skip(format!("tree '{}'", tree.name), reason, &mut skipped)?;
            }
        }

        for link in &self.links {
            if let Err(reason) = forest.connect(&link.from, &link.to) {
                self.skip(
                    format!("link {} - {}", link.from, link.to),
                    reason,
                    &mut skipped,
                )?;
            }
        }

        Ok(Assembly { forest, skipped })
    }

    fn skip(&self, entry: String, reason: Rejection, skipped: &mut Vec<Skipped>) -> Result<()> {
        if self.config.is_strict() {
            return Err(Error::ConfigValidation(format!(
                "{} rejected: {}",
                entry, reason
            )));
        }
        warn!(%entry, %reason, "skipping manifest entry");
        skipped.push(Skipped { entry, reason });
        Ok(())
    }
}
