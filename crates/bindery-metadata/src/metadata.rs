//! Immutable metadata records for configuration classes.

use std::any::TypeId;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use bindery_core::{ConfigClass, ConfigType, Constructor, GetterFn, MethodSignature, SetterFn};
use serde_json::Value;

use crate::error::ConfigurationError;
use crate::problems::{Monitor, ProblemKind, ProblemReporter, Problems};
use crate::resolve::resolve;

/// A property key bound to the setter that receives its value.
pub struct InjectionPoint<T> {
    property: String,
    setter: MethodSignature,
    invoker: SetterFn<T>,
}

impl<T> InjectionPoint<T> {
    pub(crate) fn new(property: String, setter: MethodSignature, invoker: SetterFn<T>) -> Self {
        Self {
            property,
            setter,
            invoker,
        }
    }

    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The annotated setter declaration this point binds through.
    #[must_use]
    pub const fn setter(&self) -> &MethodSignature {
        &self.setter
    }

    /// Convert `raw` and store it on `instance`.
    pub fn inject(&self, instance: &mut T, raw: &str) -> Result<(), ConfigurationError> {
        (self.invoker)(instance, raw).map_err(|source| ConfigurationError::Conversion {
            property: self.property.clone(),
            source,
        })
    }
}

impl<T> Clone for InjectionPoint<T> {
    fn clone(&self) -> Self {
        Self {
            property: self.property.clone(),
            setter: self.setter.clone(),
            invoker: self.invoker.clone(),
        }
    }
}

impl<T> fmt::Debug for InjectionPoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectionPoint")
            .field("property", &self.property)
            .field("setter", &self.setter)
            .finish_non_exhaustive()
    }
}

impl<T> PartialEq for InjectionPoint<T> {
    fn eq(&self, other: &Self) -> bool {
        self.property == other.property && self.setter == other.setter
    }
}

impl<T> Eq for InjectionPoint<T> {}

impl<T> Hash for InjectionPoint<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.property.hash(state);
        self.setter.hash(state);
    }
}

/// One configurable attribute: its getter, current binding and legacy aliases.
///
/// Equality and hashing ignore the invokers.
pub struct AttributeMetadata<T> {
    name: String,
    config_class: String,
    description: Option<String>,
    getter: Option<MethodSignature>,
    getter_fn: Option<GetterFn<T>>,
    injection_point: InjectionPoint<T>,
    legacy_injection_points: Vec<InjectionPoint<T>>,
}

impl<T> AttributeMetadata<T> {
    pub(crate) const fn new(
        name: String,
        config_class: String,
        description: Option<String>,
        getter: Option<MethodSignature>,
        getter_fn: Option<GetterFn<T>>,
        injection_point: InjectionPoint<T>,
        legacy_injection_points: Vec<InjectionPoint<T>>,
    ) -> Self {
        Self {
            name,
            config_class,
            description,
            getter,
            getter_fn,
            injection_point,
            legacy_injection_points,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The class whose metadata this attribute belongs to.
    #[must_use]
    pub fn config_class(&self) -> &str {
        &self.config_class
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub const fn getter(&self) -> Option<&MethodSignature> {
        self.getter.as_ref()
    }

    #[must_use]
    pub const fn injection_point(&self) -> &InjectionPoint<T> {
        &self.injection_point
    }

    #[must_use]
    pub fn legacy_injection_points(&self) -> &[InjectionPoint<T>] {
        &self.legacy_injection_points
    }

    /// The current injection point followed by the legacy ones.
    pub fn injection_points(&self) -> impl Iterator<Item = &InjectionPoint<T>> {
        std::iter::once(&self.injection_point).chain(&self.legacy_injection_points)
    }

    pub fn legacy_properties(&self) -> impl Iterator<Item = &str> {
        self.legacy_injection_points.iter().map(InjectionPoint::property)
    }

    /// Read the attribute through its getter.
    pub fn read(&self, instance: &T) -> Option<Value> {
        self.getter_fn.as_ref().map(|read| read(instance))
    }

    pub(crate) fn push_legacy(&mut self, point: InjectionPoint<T>) {
        self.legacy_injection_points.push(point);
    }
}

impl<T> Clone for AttributeMetadata<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            config_class: self.config_class.clone(),
            description: self.description.clone(),
            getter: self.getter.clone(),
            getter_fn: self.getter_fn.clone(),
            injection_point: self.injection_point.clone(),
            legacy_injection_points: self.legacy_injection_points.clone(),
        }
    }
}

impl<T> fmt::Debug for AttributeMetadata<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeMetadata")
            .field("name", &self.name)
            .field("config_class", &self.config_class)
            .field("description", &self.description)
            .field("getter", &self.getter)
            .field("injection_point", &self.injection_point)
            .field("legacy_injection_points", &self.legacy_injection_points)
            .finish_non_exhaustive()
    }
}

impl<T> PartialEq for AttributeMetadata<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.config_class == other.config_class
            && self.description == other.description
            && self.getter == other.getter
            && self.injection_point == other.injection_point
            && self.legacy_injection_points == other.legacy_injection_points
    }
}

impl<T> Eq for AttributeMetadata<T> {}

impl<T> Hash for AttributeMetadata<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.config_class.hash(state);
        self.description.hash(state);
        self.getter.hash(state);
        self.injection_point.hash(state);
        self.legacy_injection_points.hash(state);
    }
}

/// Everything the binder needs to know about a configuration class.
///
/// Equal when built for the same type with the same attributes.
pub struct ConfigurationMetadata<T> {
    type_id: TypeId,
    config_class: String,
    constructor: Option<Constructor<T>>,
    attributes: BTreeMap<String, AttributeMetadata<T>>,
    defunct: BTreeSet<String>,
    problems: Problems,
}

impl<T: ConfigType> ConfigurationMetadata<T> {
    /// Build fresh metadata for `T`, reporting problems to `monitor`.
    ///
    /// Bypasses the registry cache.
    pub fn inspect(monitor: &dyn Monitor) -> Self {
        Self::from_class(&T::describe(), monitor)
    }

    /// Like [`Self::inspect`], but fail when any error was recorded.
    pub fn inspect_valid(monitor: &dyn Monitor) -> Result<Self, ConfigurationError> {
        Self::inspect(monitor).validate(false)
    }
}

impl<T: 'static> ConfigurationMetadata<T> {
    pub fn from_class(class: &ConfigClass<T>, monitor: &dyn Monitor) -> Self {
        Self::assemble(class, ProblemReporter::new(class.name(), monitor))
    }

    /// Run every class and attribute check in one pass.
    pub fn assemble(class: &ConfigClass<T>, mut reporter: ProblemReporter<'_>) -> Self {
        let constructor = check_class(class, &mut reporter);
        let attributes = resolve(class, &mut reporter);
        tracing::debug!(
            class = class.name(),
            attributes = attributes.len(),
            errors = reporter.error_count(),
            "built configuration metadata"
        );
        Self {
            type_id: TypeId::of::<T>(),
            config_class: class.name().to_string(),
            constructor,
            attributes,
            defunct: class.defunct().iter().cloned().collect(),
            problems: reporter.finish(),
        }
    }

    /// Return `self` only when no errors (or, optionally, warnings) were recorded.
    pub fn validate(self, warnings_as_errors: bool) -> Result<Self, ConfigurationError> {
        self.problems.check(warnings_as_errors)?;
        Ok(self)
    }

    #[must_use]
    pub fn config_class(&self) -> &str {
        &self.config_class
    }

    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The public no-argument constructor, if the class has one.
    #[must_use]
    pub const fn constructor(&self) -> Option<&Constructor<T>> {
        self.constructor.as_ref()
    }

    #[must_use]
    pub const fn attributes(&self) -> &BTreeMap<String, AttributeMetadata<T>> {
        &self.attributes
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeMetadata<T>> {
        self.attributes.get(name)
    }

    #[must_use]
    pub const fn defunct(&self) -> &BTreeSet<String> {
        &self.defunct
    }

    #[must_use]
    pub const fn problems(&self) -> &Problems {
        &self.problems
    }

    /// The attribute and injection point bound to `property`.
    #[must_use]
    pub fn binding(&self, property: &str) -> Option<(&AttributeMetadata<T>, &InjectionPoint<T>)> {
        self.attributes.values().find_map(|attribute| {
            attribute
                .injection_points()
                .find(|point| point.property() == property)
                .map(|point| (attribute, point))
        })
    }

    /// A fresh instance from the no-argument constructor.
    pub fn new_default(&self) -> Result<T, ConfigurationError> {
        self.constructor
            .as_ref()
            .and_then(Constructor::instantiate)
            .ok_or_else(|| ConfigurationError::Instantiation {
                class: self.config_class.clone(),
                reason: "no public no-arg constructor".to_string(),
            })
    }

    /// Instantiate and populate from string properties.
    ///
    /// Every key must be bound by some attribute, and each attribute may be
    /// supplied through at most one of its keys.
    pub fn instantiate<'p, I>(&self, properties: I) -> Result<T, ConfigurationError>
    where
        I: IntoIterator<Item = (&'p str, &'p str)>,
    {
        let mut supplied: BTreeMap<&str, Vec<(&InjectionPoint<T>, &str)>> = BTreeMap::new();
        for (property, value) in properties {
            let Some((attribute, point)) = self.binding(property) else {
                return Err(ConfigurationError::UnknownProperty {
                    class: self.config_class.clone(),
                    property: property.to_string(),
                });
            };
            supplied.entry(attribute.name()).or_default().push((point, value));
        }

        let mut instance = self.new_default()?;
        for (attribute, values) in supplied {
            if let [(point, value)] = values.as_slice() {
                point.inject(&mut instance, value)?;
            } else {
                return Err(ConfigurationError::ConflictingProperties {
                    attribute: attribute.to_string(),
                    properties: values
                        .iter()
                        .map(|(point, _)| point.property().to_string())
                        .collect(),
                });
            }
        }
        Ok(instance)
    }
}

/// Class-level checks. Returns the usable no-argument constructor.
fn check_class<T: 'static>(
    class: &ConfigClass<T>,
    reporter: &mut ProblemReporter<'_>,
) -> Option<Constructor<T>> {
    let name = class.name();
    if !class.visibility().is_public() {
        reporter.error(
            ProblemKind::ClassShape,
            None,
            format!("Config class [{name}] is not public"),
        );
    }
    if class.is_abstract() {
        reporter.error(ProblemKind::ClassShape, None, format!("Config class [{name}] is abstract"));
    }
    match class.no_arg_constructor() {
        None => {
            reporter.error(
                ProblemKind::ClassShape,
                None,
                format!("Configuration class [{name}] does not have a no-arg constructor"),
            );
            None
        }
        Some(constructor) if !constructor.visibility().is_public() => {
            reporter.error(
                ProblemKind::ClassShape,
                None,
                format!("Constructor [{}] is not public", constructor.signature(name)),
            );
            None
        }
        Some(constructor) => Some(constructor.clone()),
    }
}

impl<T> Clone for ConfigurationMetadata<T> {
    fn clone(&self) -> Self {
        Self {
            type_id: self.type_id,
            config_class: self.config_class.clone(),
            constructor: self.constructor.clone(),
            attributes: self.attributes.clone(),
            defunct: self.defunct.clone(),
            problems: self.problems.clone(),
        }
    }
}

impl<T> fmt::Debug for ConfigurationMetadata<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationMetadata")
            .field("config_class", &self.config_class)
            .field("constructor", &self.constructor)
            .field("attributes", &self.attributes)
            .field("defunct", &self.defunct)
            .field("problems", &self.problems)
            .finish_non_exhaustive()
    }
}

impl<T> PartialEq for ConfigurationMetadata<T> {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.attributes == other.attributes
    }
}

impl<T> Eq for ConfigurationMetadata<T> {}

impl<T> Hash for ConfigurationMetadata<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
        self.attributes.hash(state);
    }
}
