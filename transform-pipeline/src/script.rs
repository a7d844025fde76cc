//! One-way script transformer: compiles modern script sources through the
//! external transpiler before they are pushed to the server.
//!
//! The compiled output cannot be losslessly inverted, so the reverse
//! direction always suppresses: a pull from the server never overwrites the
//! authoritative source files on disk.

use crate::transformer::Transformer;
use crate::transpiler::{Transpiler, TranspilerError};
use async_trait::async_trait;
use serde::Deserialize;
use transform_core::ExtensionFilter;
use transform_types::{Encoding, Outcome, TransformError, Unit, UnitOrigin};

/// Configuration for [`ScriptTransformer`].
///
/// Read-only after construction. Loadable from a TOML fragment:
///
/// ```toml
/// extension = "js"
/// presets = ["es2015", "react"]
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ScriptConfig {
    /// Path extension of eligible units (default: `js`).
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Named presets passed to the transpiler (default: `["es2015"]`).
    #[serde(default = "default_presets")]
    pub presets: Vec<String>,
}

fn default_extension() -> String {
    "js".to_string()
}

fn default_presets() -> Vec<String> {
    vec!["es2015".to_string()]
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            presets: default_presets(),
        }
    }
}

impl ScriptConfig {
    /// Parse a configuration from a TOML string.
    pub fn from_toml_str(toml: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml)
    }

    /// Set the eligible extension.
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.to_string();
        self
    }

    /// Set the preset names.
    pub fn with_presets(mut self, presets: &[&str]) -> Self {
        self.presets = presets.iter().map(|p| p.to_string()).collect();
        self
    }
}

/// One-way transformer compiling scripts through the transpiler boundary.
///
/// Forward ([`to_server`](Transformer::to_server)): decode the unit's
/// content per the encoding hint, compile it under the configured presets,
/// and emit a copy of the unit carrying the compiled content. Reverse
/// ([`to_filesystem`](Transformer::to_filesystem)): suppress.
pub struct ScriptTransformer<T: Transpiler> {
    config: ScriptConfig,
    filter: ExtensionFilter,
    transpiler: T,
}

impl<T: Transpiler> ScriptTransformer<T> {
    /// Create a transformer with the default configuration.
    pub fn new(transpiler: T) -> Self {
        Self::with_config(transpiler, ScriptConfig::default())
    }

    /// Create a transformer with an explicit configuration.
    pub fn with_config(transpiler: T, config: ScriptConfig) -> Self {
        let filter = ExtensionFilter::new(&config.extension);
        Self {
            config,
            filter,
            transpiler,
        }
    }

    /// The transformer's configuration.
    pub fn config(&self) -> &ScriptConfig {
        &self.config
    }

    /// Decode the unit's content per the host's encoding hint.
    fn decode<'a>(&self, unit: &'a Unit, encoding: &Encoding) -> Result<&'a str, TransformError> {
        match encoding {
            Encoding::Utf8 => unit.content_str().ok_or_else(|| invalid_encoding(unit, encoding)),
            // Script sources must be text
            Encoding::Binary | Encoding::Other(_) => Err(invalid_encoding(unit, encoding)),
        }
    }
}

fn invalid_encoding(unit: &Unit, encoding: &Encoding) -> TransformError {
    TransformError::InvalidEncoding {
        path: unit.path.to_string(),
        encoding: format!("{:?}", encoding),
    }
}

/// Map a transpiler failure onto the pipeline error channel, keeping the
/// offending unit's path in the diagnostic.
fn transpiler_error(unit: &Unit, error: TranspilerError) -> TransformError {
    match error {
        TranspilerError::Syntax(message) => TransformError::Transpile {
            path: unit.path.to_string(),
            message,
        },
        TranspilerError::UnsupportedPreset(preset) => TransformError::UnsupportedPreset(preset),
        TranspilerError::Unavailable(message) => TransformError::Internal(message),
    }
}

#[async_trait]
impl<T: Transpiler> Transformer for ScriptTransformer<T> {
    fn is_eligible(&self, unit: &Unit) -> bool {
        self.filter.matches(unit)
    }

    async fn to_server(
        &self,
        unit: &Unit,
        encoding: Encoding,
    ) -> Result<Outcome, TransformError> {
        if !self.is_eligible(unit) {
            return Ok(Outcome::Emit(unit.clone()));
        }

        let source = self.decode(unit, &encoding)?;
        let compiled = self
            .transpiler
            .compile(source, &self.config.presets)
            .await
            .map_err(|e| transpiler_error(unit, e))?;

        Ok(Outcome::Emit(
            unit.replacing_content(compiled.into_bytes(), UnitOrigin::Server),
        ))
    }

    async fn to_filesystem(
        &self,
        unit: &Unit,
        _encoding: Encoding,
    ) -> Result<Outcome, TransformError> {
        if !self.is_eligible(unit) {
            return Ok(Outcome::Emit(unit.clone()));
        }

        // Compiled output has no inverse; never regenerate over the source.
        Ok(Outcome::Suppress)
    }
}
