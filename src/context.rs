//! Delivery context: validated credentials plus the user's device and sound
//! catalogue.

use std::collections::{HashMap, HashSet};

use crate::Credentials;

/// Credentials together with the devices and sounds the service reported for
/// them.
///
/// Built by [`PushClient::connect`](crate::PushClient::connect) and read-only
/// afterwards, so a single context can be shared between tasks.
#[derive(Debug, Clone)]
pub struct DeliveryContext {
    credentials: Credentials,
    devices: Vec<String>,
    device_set: HashSet<String>,
    sounds: HashMap<String, String>,
}

impl DeliveryContext {
    /// Build a context from an already known device list and sound catalogue.
    pub fn from_catalog<I, S>(
        credentials: Credentials,
        devices: I,
        sounds: HashMap<String, String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let devices: Vec<String> = devices.into_iter().map(Into::into).collect();
        let device_set = devices.iter().cloned().collect();
        Self {
            credentials,
            devices,
            device_set,
            sounds,
        }
    }

    /// The credentials this context was validated with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Devices registered for the user, in the order the service listed them.
    pub fn devices(&self) -> &[String] {
        &self.devices
    }

    /// Sound name to display label.
    pub fn sounds(&self) -> &HashMap<String, String> {
        &self.sounds
    }

    /// Check if the device is registered for the user.
    pub fn is_valid_device(&self, device: &str) -> bool {
        self.device_set.contains(device)
    }

    /// Check if the sound is in the service's catalogue.
    pub fn is_valid_sound(&self, sound: &str) -> bool {
        self.sounds.contains_key(sound)
    }
}
