//! Scheduler options with TOML preset support.
//!
//! Global tuning (master switch, speed factor, default curve), debug toggles
//! and named animation presets are consolidated here. Options serialize
//! to/from TOML so hosts can keep them next to their own configuration.

mod animation;
mod debug;

use std::collections::BTreeMap;
use std::path::Path;

pub use animation::AnimationOptions;
pub use debug::DebugOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::AnimationSpec;
use crate::error::AnimError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[animation]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Global animation tuning.
    pub animation: AnimationOptions,
    /// Diagnostic toggles.
    pub debug: DebugOptions,
    /// Named animations effect code can trigger by name.
    pub presets: BTreeMap<String, AnimationSpec>,
}

impl Options {
    /// Generate JSON Schema for the options file, presets included.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AnimError::Io`] if the file cannot be read,
    /// [`AnimError::OptionsParse`] if it is not valid options TOML, and
    /// [`AnimError::InvalidArgument`] if it fails [`Options::validate`].
    pub fn load(path: &Path) -> Result<Self, AnimError> {
        let content = std::fs::read_to_string(path).map_err(AnimError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| AnimError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`AnimError::OptionsParse`] if serialization fails or
    /// [`AnimError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), AnimError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AnimError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(AnimError::Io)?;
        }
        std::fs::write(path, content).map_err(AnimError::Io)
    }

    /// Reject values the scheduler cannot use.
    ///
    /// # Errors
    ///
    /// Returns [`AnimError::InvalidArgument`] for a negative or non-finite
    /// duration factor, or a malformed default curve.
    pub fn validate(&self) -> Result<(), AnimError> {
        let factor = self.animation.duration_factor;
        if !factor.is_finite() || factor < 0.0 {
            return Err(AnimError::InvalidArgument(format!(
                "duration factor must be a non-negative number, got {factor}"
            )));
        }
        self.animation.default_curve.validate()
    }

    /// Look up a named preset.
    ///
    /// # Errors
    ///
    /// Returns [`AnimError::InvalidArgument`] if no preset has that name.
    pub fn preset(&self, name: &str) -> Result<&AnimationSpec, AnimError> {
        self.presets.get(name).ok_or_else(|| {
            AnimError::InvalidArgument(format!("unknown animation preset '{name}'"))
        })
    }

    /// Names of the presets defined in this file, in sorted order.
    pub fn preset_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.presets.keys().map(String::as_str)
    }

    /// Stems of the `.toml` files in `dir`, sorted. Unreadable directories
    /// yield an empty list.
    #[must_use]
    pub fn list_option_files(dir: &Path) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut stems: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .filter_map(|path| {
                path.file_stem().and_then(|s| s.to_str()).map(str::to_owned)
            })
            .collect();
        stems.sort_unstable();
        stems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Attribute, FPx2};
    use crate::util::easing::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[animation]
duration_factor = 0.5
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.animation.duration_factor, 0.5);
        assert!(opts.animation.enabled);
        assert_eq!(opts.animation.default_curve, EasingFunction::DEFAULT);
        assert!(!opts.debug.trace_records);
        assert!(opts.presets.is_empty());
    }

    #[test]
    fn presets_parse_and_round_trip() {
        let toml_str = r#"
[presets.fade_in]
attribute = "Opacity"
duration_ms = 200
from = 0.0
to = 1.0
curve = { kind = "quadratic_out" }

[presets.slide]
attribute = "Translation"
duration_ms = 150
to = [0.0, -40.0]
keep_at_target = true
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        let fade = opts.preset("fade_in").unwrap();
        assert_eq!(fade.attribute, Attribute::Opacity);
        assert_eq!(fade.from, Some(FPx2::splat(0.0)));
        assert!(opts.preset("slide").unwrap().keep_at_target);
        assert_eq!(
            opts.preset_names().collect::<Vec<_>>(),
            vec!["fade_in", "slide"]
        );
        assert!(matches!(
            opts.preset("wobble"),
            Err(AnimError::InvalidArgument(_))
        ));

        let again: Options =
            toml::from_str(&toml::to_string_pretty(&opts).unwrap()).unwrap();
        assert_eq!(again, opts);
    }

    #[test]
    fn validate_rejects_bad_factor() {
        let mut opts = Options::default();
        opts.animation.duration_factor = -1.0;
        assert!(opts.validate().is_err());
        opts.animation.duration_factor = f32::INFINITY;
        assert!(opts.validate().is_err());
        opts.animation.duration_factor = 0.0;
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir()
            .join(format!("winanim-options-{}", std::process::id()));
        let path = dir.join("tuning.toml");
        let mut opts = Options::default();
        opts.animation.enabled = false;
        opts.debug.trace_records = true;
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        std::fs::write(dir.join("notes.txt"), "not options").unwrap();
        assert_eq!(Options::list_option_files(&dir), vec!["tuning".to_owned()]);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = std::env::temp_dir()
            .join(format!("winanim-bad-options-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.toml");
        std::fs::write(&path, "[animation\nenabled = ").unwrap();
        assert!(matches!(
            Options::load(&path),
            Err(AnimError::OptionsParse(_))
        ));
        std::fs::remove_dir_all(&dir).unwrap();
        assert!(matches!(
            Options::load(&dir.join("missing.toml")),
            Err(AnimError::Io(_))
        ));
        assert!(Options::list_option_files(&dir).is_empty());
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("animation"));
        assert!(props.contains_key("debug"));
        assert!(props.contains_key("presets"));

        let animation = &props["animation"]["properties"];
        assert!(animation.get("enabled").is_some());
        assert!(animation.get("duration_factor").is_some());
        assert!(animation.get("default_curve").is_some());

        let spec = &schema_value["$defs"]["AnimationSpec"]["properties"];
        for field in ["attribute", "duration_ms", "to", "from", "window_types"] {
            assert!(spec.get(field).is_some(), "missing {field}");
        }
    }
}
