//! Setting descriptors.
//!
//! A descriptor says what a setting *is*: the id it is stored under,
//! the live-store key it maps to, its type and its valid range. How a
//! setting is displayed is not the core's concern.

use crate::core::error::{Error, Result};
use crate::core::ids::Domain;
use crate::core::value::{EnumTypeId, ValidRange, Value, ValueType};

/// Stable name of a setting, used as the key in the at-rest format.
///
/// Renaming one breaks previously saved data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SettingId(pub &'static str);

impl SettingId {
    /// Get the name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for SettingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Key family within the live store.
///
/// The UI domain is split across two families by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeySection {
    System,
    UiConfig,
    UiControl,
}

impl KeySection {
    /// The domain this key family belongs to.
    #[must_use]
    pub const fn domain(self) -> Domain {
        match self {
            KeySection::System => Domain::System,
            KeySection::UiConfig | KeySection::UiControl => Domain::Ui,
        }
    }
}

/// Opaque live-store key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExternalKey {
    pub section: KeySection,
    pub name: &'static str,
}

impl ExternalKey {
    #[must_use]
    pub const fn system(name: &'static str) -> Self {
        Self { section: KeySection::System, name }
    }

    #[must_use]
    pub const fn ui_config(name: &'static str) -> Self {
        Self { section: KeySection::UiConfig, name }
    }

    #[must_use]
    pub const fn ui_control(name: &'static str) -> Self {
        Self { section: KeySection::UiControl, name }
    }

    /// The domain this key belongs to.
    #[must_use]
    pub const fn domain(self) -> Domain {
        self.section.domain()
    }
}

impl std::fmt::Display for ExternalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}.{}", self.section, self.name)
    }
}

/// Static description of one managed setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Descriptor {
    /// Stable at-rest name.
    pub id: SettingId,

    /// Live-store key. Also determines the domain.
    pub key: ExternalKey,

    /// Declared value type.
    pub value_type: ValueType,

    /// Valid input range.
    pub range: ValidRange,

    /// Read-only settings are mirrored but never written.
    pub writable: bool,
}

impl Descriptor {
    /// A boolean toggle.
    #[must_use]
    pub const fn boolean(id: &'static str, key: ExternalKey) -> Self {
        Self {
            id: SettingId(id),
            key,
            value_type: ValueType::Bool,
            range: ValidRange::Any,
            writable: true,
        }
    }

    /// An unsigned integer with inclusive bounds.
    #[must_use]
    pub const fn uint(id: &'static str, key: ExternalKey, min: u32, max: u32) -> Self {
        Self {
            id: SettingId(id),
            key,
            value_type: ValueType::UInt,
            range: ValidRange::Numeric { min, max },
            writable: true,
        }
    }

    /// A string with inclusive length bounds.
    #[must_use]
    pub const fn string(id: &'static str, key: ExternalKey, min: usize, max: usize) -> Self {
        Self {
            id: SettingId(id),
            key,
            value_type: ValueType::Str,
            range: ValidRange::Length { min, max },
            writable: true,
        }
    }

    /// An enumeration with the given numeric variants.
    #[must_use]
    pub const fn enumeration(
        id: &'static str,
        key: ExternalKey,
        enum_type: EnumTypeId,
        variants: &'static [u32],
    ) -> Self {
        Self {
            id: SettingId(id),
            key,
            value_type: ValueType::Enum(enum_type),
            range: ValidRange::Variants(variants),
            writable: true,
        }
    }

    /// Mark as read-only.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// The domain this setting belongs to.
    #[must_use]
    pub const fn domain(&self) -> Domain {
        self.key.domain()
    }

    /// Validate a candidate value against type and range.
    pub fn check(&self, value: &Value) -> Result<()> {
        if !self.value_type.admits(value) {
            return Err(Error::TypeMismatch {
                setting: self.id.to_string(),
                expected: self.value_type,
                found: value.value_type(),
            });
        }
        if !self.range.contains(value) {
            return Err(Error::OutOfRange {
                setting: self.id.to_string(),
                value: value.clone(),
            });
        }
        Ok(())
    }
}
