use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Global animation tuning applied by the scheduler.
pub struct AnimationOptions {
    /// Master switch. When off, animations jump straight to their target.
    #[schemars(title = "Enable Animations")]
    pub enabled: bool,
    /// Multiplier applied to every duration and delay passed to `animate`.
    #[schemars(title = "Speed Factor", range(min = 0.0, max = 10.0), extend("step" = 0.05))]
    pub duration_factor: f32,
    /// Curve used when an animation does not name one.
    #[schemars(title = "Default Curve")]
    pub default_curve: EasingFunction,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_factor: 1.0,
            default_curve: EasingFunction::DEFAULT,
        }
    }
}
