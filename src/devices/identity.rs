use std::fmt;

/// Identity record at the root of every device: id, display name and power flag.
///
/// Ids are caller-supplied and never checked for uniqueness. The on/off flag
/// is only changed by the owning [`PowerUnit`](super::power::PowerUnit).
#[derive(Debug, PartialEq, Eq)]
pub struct DeviceIdentity {
    id: String,
    name: String,
    on: bool,
}

impl DeviceIdentity {
    pub(crate) fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            on: false,
        }
    }

    /// Identity for a duplicate: suffixed id and name, switched off.
    pub(crate) fn copy_of(other: &Self) -> Self {
        Self::new(format!("{}_copy", other.id), format!("{} (copy)", other.name))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub(crate) fn set_on(&mut self, on: bool) {
        self.on = on;
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Device: {} (ID: {})", self.name, self.id)
    }
}
