//! Point sound receivers.

use crate::math::Vec3;

/// A point sensor; one receiver produces one output channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Receiver {
    location: Vec3,
    name: String,
}

impl Receiver {
    pub fn new(location: Vec3, name: impl Into<String>) -> Self {
        Self {
            location,
            name: name.into(),
        }
    }

    pub fn location(&self) -> Vec3 {
        self.location
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
