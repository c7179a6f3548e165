//! Instances built from string properties.

use bindery_core::ConfigType;
use bindery_metadata::{ConfigurationError, valid_configuration_metadata};

use crate::assertions::Properties;

/// Build `T` from properties through its validated metadata.
///
/// Each attribute may be supplied through its current key or one legacy key,
/// never both.
pub fn new_instance<T: ConfigType>(properties: Properties<'_>) -> Result<T, ConfigurationError> {
    valid_configuration_metadata::<T>()?.instantiate(properties.iter().copied())
}
