//! Animatable window properties and the window kinds an animation targets.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::value::FPx2;
use crate::error::AnimError;

/// A window property that can be animated.
///
/// The set is closed; [`Attribute::index`] gives each variant a dense slot
/// for enumeration-keyed tables.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
)]
pub enum Attribute {
    /// Window opacity.
    Opacity,
    /// Brightness multiplier.
    Brightness,
    /// Color saturation multiplier.
    Saturation,
    /// Scale factor, per axis.
    Scale,
    /// Offset from the window's laid-out position, per axis.
    Translation,
    /// Rotation angle in degrees.
    Rotation,
    /// Absolute position, per axis.
    Position,
    /// Size, per axis.
    Size,
    /// Visible fraction of the window, per axis.
    Clip,
}

impl Attribute {
    /// Number of attributes.
    pub const COUNT: usize = 9;

    /// Every attribute, in index order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Opacity,
        Self::Brightness,
        Self::Saturation,
        Self::Scale,
        Self::Translation,
        Self::Rotation,
        Self::Position,
        Self::Size,
        Self::Clip,
    ];

    /// Dense index in `0..COUNT`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name used in diagnostics and configuration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Opacity => "Opacity",
            Self::Brightness => "Brightness",
            Self::Saturation => "Saturation",
            Self::Scale => "Scale",
            Self::Translation => "Translation",
            Self::Rotation => "Rotation",
            Self::Position => "Position",
            Self::Size => "Size",
            Self::Clip => "Clip",
        }
    }

    /// Resting value of the property, used when an animation does not say
    /// where to start from.
    #[must_use]
    pub const fn neutral(self) -> FPx2 {
        match self {
            Self::Translation | Self::Rotation | Self::Position => {
                FPx2::splat(0.0)
            }
            Self::Opacity
            | Self::Brightness
            | Self::Saturation
            | Self::Scale
            | Self::Size
            | Self::Clip => FPx2::splat(1.0),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = AnimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                AnimError::InvalidArgument(format!("unknown attribute '{s}'"))
            })
    }
}

/// The kind of a managed window.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum WindowType {
    /// Ordinary top-level window.
    Normal,
    /// Desktop background.
    Desktop,
    /// Panel or dock.
    Dock,
    /// Torn-off toolbar.
    Toolbar,
    /// Torn-off menu.
    Menu,
    /// Dialog window.
    Dialog,
    /// Utility window such as a palette.
    Utility,
    /// Splash screen.
    Splash,
    /// Drop-down menu.
    DropdownMenu,
    /// Popup / context menu.
    PopupMenu,
    /// Tooltip.
    Tooltip,
    /// Notification bubble.
    Notification,
    /// Combo box popup.
    ComboBox,
    /// Drag-and-drop icon.
    DragAndDrop,
    /// On-screen display.
    OnScreenDisplay,
}

impl WindowType {
    /// The single-bit mask for this window type.
    #[must_use]
    pub const fn mask(self) -> WindowTypeMask {
        match self {
            Self::Normal => WindowTypeMask::NORMAL,
            Self::Desktop => WindowTypeMask::DESKTOP,
            Self::Dock => WindowTypeMask::DOCK,
            Self::Toolbar => WindowTypeMask::TOOLBAR,
            Self::Menu => WindowTypeMask::MENU,
            Self::Dialog => WindowTypeMask::DIALOG,
            Self::Utility => WindowTypeMask::UTILITY,
            Self::Splash => WindowTypeMask::SPLASH,
            Self::DropdownMenu => WindowTypeMask::DROPDOWN_MENU,
            Self::PopupMenu => WindowTypeMask::POPUP_MENU,
            Self::Tooltip => WindowTypeMask::TOOLTIP,
            Self::Notification => WindowTypeMask::NOTIFICATION,
            Self::ComboBox => WindowTypeMask::COMBO_BOX,
            Self::DragAndDrop => WindowTypeMask::DND_ICON,
            Self::OnScreenDisplay => WindowTypeMask::ON_SCREEN_DISPLAY,
        }
    }
}

bitflags! {
    /// Set of window types an animation applies to.
    ///
    /// The empty mask applies to every window type.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WindowTypeMask: u32 {
        /// Ordinary top-level windows.
        const NORMAL = 1 << 0;
        /// Desktop background.
        const DESKTOP = 1 << 1;
        /// Panels and docks.
        const DOCK = 1 << 2;
        /// Toolbars.
        const TOOLBAR = 1 << 3;
        /// Torn-off menus.
        const MENU = 1 << 4;
        /// Dialogs.
        const DIALOG = 1 << 5;
        // bits 6 and 7 are override-redirect and top menu, never animated
        /// Utility windows.
        const UTILITY = 1 << 8;
        /// Splash screens.
        const SPLASH = 1 << 9;
        /// Drop-down menus.
        const DROPDOWN_MENU = 1 << 10;
        /// Popup menus.
        const POPUP_MENU = 1 << 11;
        /// Tooltips.
        const TOOLTIP = 1 << 12;
        /// Notifications.
        const NOTIFICATION = 1 << 13;
        /// Combo box popups.
        const COMBO_BOX = 1 << 14;
        /// Drag-and-drop icons.
        const DND_ICON = 1 << 15;
        /// On-screen displays.
        const ON_SCREEN_DISPLAY = 1 << 16;
    }
}

impl WindowTypeMask {
    /// Whether an animation carrying this mask applies to `window_type`.
    #[must_use]
    pub const fn matches(self, window_type: WindowType) -> bool {
        self.is_empty() || self.contains(window_type.mask())
    }
}

impl Serialize for WindowTypeMask {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for WindowTypeMask {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let bits = u32::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

impl JsonSchema for WindowTypeMask {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "WindowTypeMask".into()
    }

    fn json_schema(
        generator: &mut schemars::SchemaGenerator,
    ) -> schemars::Schema {
        u32::json_schema(generator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_dense_and_ordered() {
        for (i, attribute) in Attribute::ALL.iter().enumerate() {
            assert_eq!(attribute.index(), i);
        }
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for attribute in Attribute::ALL {
            assert_eq!(attribute.name().parse::<Attribute>().unwrap(), attribute);
        }
        assert_eq!("opacity".parse::<Attribute>().unwrap(), Attribute::Opacity);
        assert!(matches!(
            "Wobble".parse::<Attribute>(),
            Err(AnimError::InvalidArgument(_))
        ));
    }

    #[test]
    fn neutral_values() {
        assert_eq!(Attribute::Opacity.neutral(), FPx2::splat(1.0));
        assert_eq!(Attribute::Translation.neutral(), FPx2::splat(0.0));
    }

    #[test]
    fn empty_mask_matches_everything() {
        let mask = WindowTypeMask::empty();
        assert!(mask.matches(WindowType::Normal));
        assert!(mask.matches(WindowType::Tooltip));
    }

    #[test]
    fn mask_restricts_window_types() {
        let mask = WindowTypeMask::NORMAL | WindowTypeMask::DIALOG;
        assert!(mask.matches(WindowType::Dialog));
        assert!(!mask.matches(WindowType::Dock));
    }

    #[test]
    fn mask_bits_follow_net_window_types() {
        assert_eq!(WindowType::Utility.mask().bits(), 1 << 8);
        assert_eq!(WindowType::Splash.mask().bits(), 1 << 9);
        assert_eq!(WindowType::DropdownMenu.mask().bits(), 1 << 10);
        assert_eq!(WindowType::DragAndDrop.mask().bits(), 1 << 15);
        assert_eq!(WindowType::OnScreenDisplay.mask().bits(), 1 << 16);
        let all = WindowTypeMask::all().bits();
        assert_eq!(all & (1 << 6 | 1 << 7), 0);
    }

    #[test]
    fn mask_serializes_as_bits() {
        let mask = WindowTypeMask::NORMAL | WindowTypeMask::DOCK;
        let json = serde_json::to_string(&mask).unwrap();
        assert_eq!(json, "5");
        let back: WindowTypeMask = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mask);
    }
}
