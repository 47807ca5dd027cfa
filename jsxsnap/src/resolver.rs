//! Compiler configuration resolution.
//!
//! Builds the full swc configuration for one fixture from three sources:
//! defaults inferred from the input file extension, the fixture's `.swcrc`
//! override, and the plugin payload from `config.json`.
//!
//! Merge targets, each a shallow overlay where override fields win:
//! - the document root
//! - `jsc`
//! - `jsc.parser` (over the extension defaults)
//! - `jsc.transform`
//! - `jsc.transform.react` (over the classic-runtime defaults)
//!
//! `jsc.experimental` is never merged. It is rebuilt on every call and holds
//! exactly one plugin entry, so an override cannot remove or reorder it.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{json, Map, Value};

/// File name of the compiled plugin, looked up in the working directory.
pub const PLUGIN_FILE_NAME: &str = "swc_plugin_import_jsx_pragma.wasm";

/// Default element factory for the classic runtime.
pub const DEFAULT_PRAGMA: &str = "createElement";

/// Default fragment factory for the classic runtime.
pub const DEFAULT_PRAGMA_FRAG: &str = "Fragment";

/// Source flavour inferred from an input file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `.ts`
    TypeScript,
    /// `.tsx`
    Tsx,
    /// `.js`, parsed with JSX enabled.
    JavaScript,
    /// `.jsx`
    Jsx,
    /// Any other extension: plain ECMAScript without markup.
    Other,
}

impl SourceKind {
    /// Classify an extension, with or without its leading dot.
    pub fn from_extension(extension: &str) -> Self {
        match extension.strip_prefix('.').unwrap_or(extension) {
            "ts" => Self::TypeScript,
            "tsx" => Self::Tsx,
            "js" => Self::JavaScript,
            "jsx" => Self::Jsx,
            _ => Self::Other,
        }
    }

    /// Whether the TypeScript parser is required.
    pub fn is_typescript(self) -> bool {
        matches!(self, Self::TypeScript | Self::Tsx)
    }

    /// Parser syntax name understood by swc.
    pub fn syntax(self) -> &'static str {
        if self.is_typescript() {
            "typescript"
        } else {
            "ecmascript"
        }
    }

    /// Typed markup flag (`jsc.parser.tsx`).
    pub fn tsx(self) -> bool {
        self == Self::Tsx
    }

    /// Markup flag (`jsc.parser.jsx`).
    ///
    /// Plain `.js` counts as markup-capable: fixtures written as `.js` are
    /// expected to contain JSX unless their `.swcrc` turns it off.
    pub fn jsx(self) -> bool {
        matches!(self, Self::JavaScript | Self::Jsx)
    }
}

/// A fully merged compiler configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedConfig(Value);

impl ResolvedConfig {
    /// The configuration document.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Pretty JSON rendering, as handed to the backend.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.0)
    }

    pub fn syntax(&self) -> Option<&str> {
        self.0.pointer("/jsc/parser/syntax").and_then(Value::as_str)
    }

    pub fn tsx(&self) -> Option<bool> {
        self.0.pointer("/jsc/parser/tsx").and_then(Value::as_bool)
    }

    pub fn jsx(&self) -> Option<bool> {
        self.0.pointer("/jsc/parser/jsx").and_then(Value::as_bool)
    }

    pub fn runtime(&self) -> Option<&str> {
        self.0
            .pointer("/jsc/transform/react/runtime")
            .and_then(Value::as_str)
    }

    pub fn pragma(&self) -> Option<&str> {
        self.0
            .pointer("/jsc/transform/react/pragma")
            .and_then(Value::as_str)
    }

    pub fn pragma_frag(&self) -> Option<&str> {
        self.0
            .pointer("/jsc/transform/react/pragmaFrag")
            .and_then(Value::as_str)
    }

    /// Plugin invocations as `(plugin path, plugin config)` pairs.
    pub fn plugins(&self) -> Vec<(&str, &Value)> {
        self.0
            .pointer("/jsc/experimental/plugins")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| match entry.as_array()?.as_slice() {
                        [path, config] => Some((path.as_str()?, config)),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Derives compiler configurations for fixtures.
#[derive(Debug, Clone)]
pub struct Resolver {
    plugin_path: String,
}

impl Resolver {
    /// Create a resolver that points every configuration at `plugin_path`.
    pub fn new(plugin_path: impl Into<String>) -> Self {
        Self {
            plugin_path: plugin_path.into(),
        }
    }

    /// Create a resolver from a filesystem path.
    ///
    /// The path is embedded in a JSON document, so it must be valid UTF-8.
    pub fn from_path(plugin_path: PathBuf) -> std::io::Result<Self> {
        match plugin_path.into_os_string().into_string() {
            Ok(path) => Ok(Self::new(path)),
            Err(path) => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("plugin path is not valid UTF-8: {}", Path::new(&path).display()),
            )),
        }
    }

    /// Create a resolver for `plugin_file` inside the working directory.
    pub fn from_current_dir(plugin_file: &str) -> std::io::Result<Self> {
        Self::from_path(std::env::current_dir()?.join(plugin_file))
    }

    /// Location of the plugin binary used in every plugin entry.
    pub fn plugin_path(&self) -> &Path {
        Path::new(&self.plugin_path)
    }

    /// Resolve the configuration for an input with `extension`.
    ///
    /// Non-object override values are ignored at the level where they
    /// appear; everything else is carried through untouched and left for the
    /// backend to validate.
    pub fn resolve(
        &self,
        extension: &str,
        host_override: Option<&Value>,
        plugin_config: Option<&Value>,
    ) -> ResolvedConfig {
        let kind = SourceKind::from_extension(extension);

        let root_override = host_override.and_then(Value::as_object);
        let jsc_override = root_override.and_then(|root| object_field(root, "jsc"));
        let parser_override = jsc_override.and_then(|jsc| object_field(jsc, "parser"));
        let transform_override = jsc_override.and_then(|jsc| object_field(jsc, "transform"));
        let react_override = transform_override.and_then(|t| object_field(t, "react"));

        let parser = overlay(parser_defaults(kind), parser_override);
        let react = overlay(react_defaults(), react_override);

        let mut transform = overlay(Map::new(), transform_override);
        transform.insert("react".to_string(), Value::Object(react));

        let mut jsc = overlay(Map::new(), jsc_override);
        jsc.insert("parser".to_string(), Value::Object(parser));
        jsc.insert("transform".to_string(), Value::Object(transform));
        jsc.insert("experimental".to_string(), self.experimental(plugin_config));

        let mut root = overlay(Map::new(), root_override);
        root.insert("jsc".to_string(), Value::Object(jsc));

        ResolvedConfig(Value::Object(root))
    }

    fn experimental(&self, plugin_config: Option<&Value>) -> Value {
        let config = plugin_config
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));
        json!({
            "plugins": [[self.plugin_path.as_str(), config]]
        })
    }
}

fn parser_defaults(kind: SourceKind) -> Map<String, Value> {
    let mut parser = Map::new();
    parser.insert("syntax".to_string(), Value::from(kind.syntax()));
    parser.insert("tsx".to_string(), Value::from(kind.tsx()));
    parser.insert("jsx".to_string(), Value::from(kind.jsx()));
    parser
}

fn react_defaults() -> Map<String, Value> {
    let mut react = Map::new();
    react.insert("runtime".to_string(), Value::from("classic"));
    react.insert("pragma".to_string(), Value::from(DEFAULT_PRAGMA));
    react.insert("pragmaFrag".to_string(), Value::from(DEFAULT_PRAGMA_FRAG));
    react
}

fn object_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    map.get(key).and_then(Value::as_object)
}

/// Copy `base`, then let every field of `overrides` replace its counterpart.
fn overlay(mut base: Map<String, Value>, overrides: Option<&Map<String, Value>>) -> Map<String, Value> {
    if let Some(overrides) = overrides {
        for (key, value) in overrides {
            base.insert(key.clone(), value.clone());
        }
    }
    base
}
