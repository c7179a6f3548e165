//! Checks that a configuration class matches its own metadata.
//!
//! Every check has a `check_*` form returning [`AssertionError`] and an
//! `assert_*` form that panics with the same message.

use std::collections::{BTreeMap, BTreeSet};

use bindery_core::ConfigType;
use bindery_metadata::classify::attribute_name;
use bindery_metadata::{AttributeMetadata, ConfigurationMetadata, valid_configuration_metadata};
use serde_json::Value;

use crate::error::AssertionError;
use crate::recorder::RecordedConfig;

/// String properties as `(key, value)` pairs.
pub type Properties<'a> = &'a [(&'a str, &'a str)];

/// A default instance of `T` must hold exactly the expected attribute values.
///
/// Every expected attribute must exist and be current, and every attribute
/// must be listed.
pub fn check_defaults<T, K, I>(expected: I) -> Result<(), AssertionError>
where
    T: ConfigType,
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    let expected: BTreeMap<String, Value> = expected
        .into_iter()
        .map(|(name, value)| (name.into(), value))
        .collect();
    let metadata = valid_configuration_metadata::<T>()?;

    let deprecated = deprecated_attribute_names(&metadata);
    let (deprecated_used, unsupported): (Vec<String>, Vec<String>) = expected
        .keys()
        .filter(|name| metadata.attribute(name).is_none())
        .cloned()
        .partition(|name| deprecated.contains(name));
    if !unsupported.is_empty() {
        return Err(AssertionError::UnsupportedAttributes(unsupported));
    }
    if !deprecated_used.is_empty() {
        return Err(AssertionError::DeprecatedAttributes(deprecated_used));
    }

    let untested: Vec<String> = metadata
        .attributes()
        .keys()
        .filter(|name| !expected.contains_key(*name))
        .cloned()
        .collect();
    if !untested.is_empty() {
        return Err(AssertionError::UntestedAttributes(untested));
    }

    let instance = metadata.new_default()?;
    for attribute in metadata.attributes().values() {
        let actual = read(attribute, &instance)?;
        if let Some(value) = expected.get(attribute.name()) {
            if *value != actual {
                return Err(AssertionError::ValueMismatch {
                    attribute: attribute.name().to_string(),
                    expected: value.clone(),
                    actual,
                });
            }
        }
    }
    Ok(())
}

/// # Panics
///
/// Panics with the [`check_defaults`] failure.
pub fn assert_defaults<T, K, I>(expected: I)
where
    T: ConfigType,
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    if let Err(error) = check_defaults::<T, K, I>(expected) {
        panic!("{error}");
    }
}

/// `properties` must use every current key and no legacy key, change every
/// attribute away from its default, and produce an instance equal to `expected`.
pub fn check_full_mapping<T: ConfigType>(
    properties: Properties<'_>,
    expected: &T,
) -> Result<(), AssertionError> {
    let metadata = valid_configuration_metadata::<T>()?;
    check_current_keys(&metadata, properties)?;

    let supplied: BTreeSet<&str> = properties.iter().map(|(key, _)| *key).collect();
    let untested: Vec<String> = metadata
        .attributes()
        .values()
        .map(|attribute| attribute.injection_point().property())
        .filter(|property| !supplied.contains(property))
        .map(ToString::to_string)
        .collect();
    if !untested.is_empty() {
        return Err(AssertionError::UntestedProperties(untested));
    }

    let instance = metadata.instantiate(properties.iter().copied())?;
    let defaults = metadata.new_default()?;

    let mut unchanged = Vec::new();
    for attribute in metadata.attributes().values() {
        if read(attribute, &instance)? == read(attribute, &defaults)? {
            unchanged.push(attribute.name().to_string());
        }
    }
    if !unchanged.is_empty() {
        return Err(AssertionError::UnchangedDefaults(unchanged));
    }

    for attribute in metadata.attributes().values() {
        let actual = read(attribute, &instance)?;
        let wanted = read(attribute, expected)?;
        if actual != wanted {
            return Err(AssertionError::ValueMismatch {
                attribute: attribute.name().to_string(),
                expected: wanted,
                actual,
            });
        }
    }
    Ok(())
}

/// # Panics
///
/// Panics with the [`check_full_mapping`] failure.
pub fn assert_full_mapping<T: ConfigType>(properties: Properties<'_>, expected: &T) {
    if let Err(error) = check_full_mapping(properties, expected) {
        panic!("{error}");
    }
}

/// Every older property set must build an instance equal to the one built
/// from `current`, and together they must exercise every legacy key.
pub fn check_deprecated_equivalence<T: ConfigType>(
    current: Properties<'_>,
    older: &[Properties<'_>],
) -> Result<(), AssertionError> {
    let metadata = valid_configuration_metadata::<T>()?;
    check_current_keys(&metadata, current)?;

    for properties in older {
        let unsupported: Vec<String> = properties
            .iter()
            .filter(|(key, _)| metadata.binding(key).is_none())
            .map(|(key, _)| (*key).to_string())
            .collect();
        if !unsupported.is_empty() {
            return Err(AssertionError::UnsupportedProperties(unsupported));
        }
    }

    let exercised: BTreeSet<&str> = older
        .iter()
        .flat_map(|properties| properties.iter().map(|(key, _)| *key))
        .collect();
    let untested: Vec<String> = metadata
        .attributes()
        .values()
        .flat_map(AttributeMetadata::legacy_properties)
        .filter(|property| !exercised.contains(property))
        .map(ToString::to_string)
        .collect();
    if !untested.is_empty() {
        return Err(AssertionError::UntestedDeprecatedProperties(untested));
    }

    let reference = metadata.instantiate(current.iter().copied())?;
    for properties in older {
        let instance = metadata.instantiate(properties.iter().copied())?;
        for attribute in metadata.attributes().values() {
            let expected = read(attribute, &reference)?;
            let actual = read(attribute, &instance)?;
            if expected != actual {
                let keys: Vec<&str> = properties.iter().map(|(key, _)| *key).collect();
                return Err(AssertionError::NotEquivalent {
                    properties: keys.join(", "),
                    attribute: attribute.name().to_string(),
                    expected,
                    actual,
                });
            }
        }
    }
    Ok(())
}

/// # Panics
///
/// Panics with the [`check_deprecated_equivalence`] failure.
pub fn assert_deprecated_equivalence<T: ConfigType>(
    current: Properties<'_>,
    older: &[Properties<'_>],
) {
    if let Err(error) = check_deprecated_equivalence::<T>(current, older) {
        panic!("{error}");
    }
}

/// Only current setters may have been invoked; their recorded arguments must
/// then match the defaults as in [`check_defaults`].
pub fn check_recorded_defaults<T: ConfigType>(
    recorded: &RecordedConfig<T>,
) -> Result<(), AssertionError> {
    let metadata = valid_configuration_metadata::<T>()?;

    let mut expected = BTreeMap::new();
    for invocation in recorded.invocations() {
        let Some(argument) = &invocation.argument else {
            return Err(AssertionError::NonSetterInvoked(invocation.to_string()));
        };
        let current = metadata
            .attributes()
            .values()
            .find(|attribute| attribute.injection_point().setter().name == invocation.method);
        if let Some(attribute) = current {
            expected.insert(attribute.name().to_string(), argument.clone());
            continue;
        }
        let is_legacy = metadata
            .attributes()
            .values()
            .flat_map(AttributeMetadata::legacy_injection_points)
            .any(|point| point.setter().name == invocation.method);
        if is_legacy {
            return Err(AssertionError::LegacySetterInvoked {
                method: invocation.method.clone(),
                attribute: attribute_name(&invocation.method).unwrap_or_default(),
            });
        }
        return Err(AssertionError::NonSetterInvoked(invocation.to_string()));
    }

    check_defaults::<T, _, _>(expected)
}

/// # Panics
///
/// Panics with the [`check_recorded_defaults`] failure.
pub fn assert_recorded_defaults<T: ConfigType>(recorded: &RecordedConfig<T>) {
    if let Err(error) = check_recorded_defaults(recorded) {
        panic!("{error}");
    }
}

fn read<T>(attribute: &AttributeMetadata<T>, instance: &T) -> Result<Value, AssertionError> {
    attribute.read(instance).ok_or_else(|| AssertionError::MissingGetter {
        attribute: attribute.name().to_string(),
    })
}

/// Keys must be bound, and bound as the current property.
fn check_current_keys<T: 'static>(
    metadata: &ConfigurationMetadata<T>,
    properties: Properties<'_>,
) -> Result<(), AssertionError> {
    let mut unsupported = Vec::new();
    let mut deprecated = Vec::new();
    for (key, _) in properties {
        match metadata.binding(key) {
            None => unsupported.push((*key).to_string()),
            Some((attribute, point))
                if point.property() != attribute.injection_point().property() =>
            {
                deprecated.push((*key).to_string());
            }
            Some(_) => {}
        }
    }
    if !unsupported.is_empty() {
        return Err(AssertionError::UnsupportedProperties(unsupported));
    }
    if !deprecated.is_empty() {
        return Err(AssertionError::DeprecatedProperties(deprecated));
    }
    Ok(())
}

/// Attribute names of legacy setters that stand in for another attribute,
/// such as `HomePageUrl` for `set_home_page_url`.
fn deprecated_attribute_names<T: 'static>(
    metadata: &ConfigurationMetadata<T>,
) -> BTreeSet<String> {
    metadata
        .attributes()
        .values()
        .flat_map(AttributeMetadata::legacy_injection_points)
        .filter_map(|point| attribute_name(&point.setter().name))
        .filter(|name| metadata.attribute(name).is_none())
        .collect()
}
