//! Attribute resolution over a class hierarchy.
//!
//! Declarations are merged by shape (name + parameter types) in a fixed order:
//! the class itself, then its superclass chain, then implemented interfaces.
//! Interfaces are walked owner by owner in lineage order, each owner's
//! interfaces breadth-first, so an interface of the inspected class always
//! outranks one reached through a superclass. For each shape the most-derived
//! class declaration supplies the invoker and the most-derived declaration
//! carrying a property marker supplies the annotations. Two interfaces of one
//! owner at the same depth that annotate the same shape differently are a
//! conflict.

use std::collections::{BTreeMap, HashMap, HashSet};

use bindery_core::{ConfigClass, Interface, Method, MethodDecl, MethodSignature, SetterFn};

use crate::classify::{MethodKind, attribute_name, classify, getter_names, is_setter_name};
use crate::metadata::{AttributeMetadata, InjectionPoint};
use crate::problems::{ProblemKind, ProblemReporter};

type ShapeKey = (String, Vec<String>);

/// Every declaration of one method shape across the hierarchy.
struct Slot<'a, T> {
    /// Most-derived class declaration.
    concrete: Option<&'a Method<T>>,
    /// Most-derived declaration carrying `@Config` or `@LegacyConfig`.
    annotated: Option<&'a MethodDecl>,
    conflicted: bool,
}

/// An annotated setter that passed shape and marker checks.
struct Candidate<'a, T> {
    decl: &'a MethodDecl,
    signature: MethodSignature,
    invoker: &'a SetterFn<T>,
    attribute: String,
}

/// Resolve the attributes of `class`, reporting every problem found.
pub fn resolve<T: 'static>(
    class: &ConfigClass<T>,
    reporter: &mut ProblemReporter<'_>,
) -> BTreeMap<String, AttributeMetadata<T>> {
    let interfaces = interface_levels(class);
    let slots = collect_slots(class, &interfaces, reporter);
    report_ignored_descriptions(class, &interfaces, &slots, reporter);

    let mut current: Vec<Candidate<'_, T>> = Vec::new();
    let mut legacy_only: Vec<Candidate<'_, T>> = Vec::new();
    let mut orphans: Vec<&MethodDecl> = Vec::new();

    for slot in &slots {
        let Some(decl) = slot.annotated else { continue };
        let marker = marker_name(decl);
        let signature = decl.signature();

        if !decl.visibility.is_public() {
            reporter.error(
                ProblemKind::MethodShape,
                Some(&signature),
                format!("{marker} method [{signature}] is not public"),
            );
            continue;
        }
        if decl.is_static {
            reporter.error(
                ProblemKind::MethodShape,
                Some(&signature),
                format!("{marker} method [{signature}] is static"),
            );
            continue;
        }

        match classify(decl) {
            MethodKind::Setter => {}
            _ if is_setter_name(&decl.name) => {
                reporter.error(
                    ProblemKind::MethodShape,
                    Some(&signature),
                    format!(
                        "Configuration setter method [{signature}] does not have exactly one parameter"
                    ),
                );
                continue;
            }
            _ => {
                reporter.error(
                    ProblemKind::Annotation,
                    Some(&signature),
                    format!(
                        "Method [{signature}] is not a valid setter (set_<name> with one parameter) for {marker} annotation"
                    ),
                );
                if decl.annotations.config.is_none() {
                    orphans.push(decl);
                }
                continue;
            }
        }

        if !check_markers(decl, &signature, class, reporter) {
            continue;
        }

        let Some(invoker) = slot.concrete.and_then(Method::setter_fn) else {
            reporter.error(
                ProblemKind::MethodShape,
                Some(&signature),
                format!(
                    "{marker} method [{signature}] has no implementation in class [{}]",
                    class.name()
                ),
            );
            continue;
        };
        let Some(attribute) = attribute_name(&decl.name) else { continue };

        let candidate = Candidate {
            decl,
            signature,
            invoker,
            attribute,
        };
        if decl.annotations.config.is_some() {
            current.push(candidate);
        } else {
            legacy_only.push(candidate);
        }
    }

    let mut attributes = build_attributes(class, &slots, current, reporter);
    attach_legacy_setters(&mut attributes, legacy_only, reporter);

    for decl in orphans {
        let associated =
            attribute_name(&decl.name).is_some_and(|name| attributes.contains_key(&name));
        if !associated {
            report_unassociated(decl, reporter);
        }
    }

    check_unique_properties(&attributes, reporter);

    if attributes.is_empty() && !has_configuration_markers(class, &interfaces) {
        reporter.error(
            ProblemKind::NoAttributes,
            None,
            format!(
                "Configuration class [{}] does not have any @Config annotations",
                class.name()
            ),
        );
    }

    attributes
}

/// Implemented interfaces in precedence order, each interface visited once.
///
/// Every class in the lineage contributes its own breadth-first levels (its
/// direct interfaces, then their super-interfaces) after those of the classes
/// below it.
fn interface_levels<T: 'static>(class: &ConfigClass<T>) -> Vec<Vec<&Interface>> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut levels = Vec::new();
    for owner in class.lineage() {
        let mut level: Vec<&Interface> = owner.interfaces().iter().collect();
        while !level.is_empty() {
            level.retain(|iface| seen.insert(iface.name()));
            if level.is_empty() {
                break;
            }
            let next = level.iter().flat_map(|iface| iface.super_interfaces()).collect();
            levels.push(level);
            level = next;
        }
    }
    levels
}

fn collect_slots<'a, T: 'static>(
    class: &'a ConfigClass<T>,
    interfaces: &[Vec<&'a Interface>],
    reporter: &mut ProblemReporter<'_>,
) -> Vec<Slot<'a, T>> {
    let mut slots: Vec<Slot<'a, T>> = Vec::new();
    let mut index: HashMap<ShapeKey, usize> = HashMap::new();
    let mut slot_for = |decl: &MethodDecl, slots: &mut Vec<Slot<'a, T>>| -> usize {
        *index
            .entry((decl.name.clone(), decl.params.clone()))
            .or_insert_with(|| {
                slots.push(Slot {
                    concrete: None,
                    annotated: None,
                    conflicted: false,
                });
                slots.len() - 1
            })
    };

    for owner in class.lineage() {
        for method in owner.methods() {
            let decl = method.decl();
            let at = slot_for(decl, &mut slots);
            let slot = &mut slots[at];
            if slot.concrete.is_none() {
                slot.concrete = Some(method);
            }
            if slot.annotated.is_none() && decl.annotations.is_configuration() {
                slot.annotated = Some(decl);
            }
        }
    }

    for level in interfaces {
        let mut found: BTreeMap<usize, Vec<&'a MethodDecl>> = BTreeMap::new();
        for iface in level {
            for decl in iface.methods() {
                let at = slot_for(decl, &mut slots);
                let slot = &slots[at];
                let open = slot.annotated.is_none() && !slot.conflicted;
                if open && decl.annotations.is_configuration() {
                    found.entry(at).or_default().push(decl);
                }
            }
        }
        for (at, decls) in found {
            let first = decls[0];
            match decls.iter().find(|other| other.annotations != first.annotations) {
                Some(other) => {
                    let signature = first.signature();
                    reporter.error(
                        ProblemKind::Annotation,
                        Some(&signature),
                        format!(
                            "Method [{signature}] has conflicting annotations in interfaces [{}] and [{}]",
                            first.declaring, other.declaring
                        ),
                    );
                    slots[at].conflicted = true;
                }
                None => slots[at].annotated = Some(first),
            }
        }
    }

    slots
}

fn has_configuration_markers<T: 'static>(
    class: &ConfigClass<T>,
    interfaces: &[Vec<&Interface>],
) -> bool {
    class
        .lineage()
        .flat_map(ConfigClass::methods)
        .any(|method| method.decl().annotations.is_configuration())
        || interfaces
            .iter()
            .flatten()
            .flat_map(|iface| iface.methods())
            .any(|decl| decl.annotations.is_configuration())
}

/// Descriptions only mean something next to a property marker. A declaration
/// whose shape picks up a marker elsewhere in the hierarchy is not flagged.
fn report_ignored_descriptions<T: 'static>(
    class: &ConfigClass<T>,
    interfaces: &[Vec<&Interface>],
    slots: &[Slot<'_, T>],
    reporter: &mut ProblemReporter<'_>,
) {
    let marked: HashSet<(&str, &[String])> = slots
        .iter()
        .filter_map(|slot| slot.annotated)
        .map(|decl| (decl.name.as_str(), decl.params.as_slice()))
        .collect();
    let declarations = class
        .lineage()
        .flat_map(ConfigClass::methods)
        .map(Method::decl)
        .chain(interfaces.iter().flatten().flat_map(|iface| iface.methods()));
    for decl in declarations {
        if decl.annotations.description.is_none() || decl.annotations.is_configuration() {
            continue;
        }
        if marked.contains(&(decl.name.as_str(), decl.params.as_slice())) {
            continue;
        }
        let signature = decl.signature();
        reporter.warning(
            ProblemKind::Advisory,
            Some(&signature),
            format!(
                "@ConfigDescription on method [{signature}] is ignored: the method has no @Config annotation"
            ),
        );
    }
}

fn marker_name(decl: &MethodDecl) -> &'static str {
    if decl.annotations.config.is_some() {
        "@Config"
    } else {
        "@LegacyConfig"
    }
}

/// Validate property keys on an annotated setter. Returns `false` when the
/// setter must be rejected.
fn check_markers<T: 'static>(
    decl: &MethodDecl,
    signature: &MethodSignature,
    class: &ConfigClass<T>,
    reporter: &mut ProblemReporter<'_>,
) -> bool {
    let mut accepted = true;
    let mut reject = |reporter: &mut ProblemReporter<'_>, message: String| {
        reporter.error(ProblemKind::Annotation, Some(signature), message);
        accepted = false;
    };
    let is_defunct = |key: &str| class.defunct().iter().any(|defunct| defunct == key);

    let current = decl.annotations.config.as_deref();
    if let Some(key) = current {
        if key.trim().is_empty() {
            reject(
                reporter,
                format!("@Config method [{signature}] annotation has a null or empty value"),
            );
        } else if is_defunct(key) {
            reject(
                reporter,
                format!(
                    "@Config property '{key}' on method [{signature}] is defunct on class [{}]",
                    class.name()
                ),
            );
        }
    }

    if let Some(legacy) = &decl.annotations.legacy {
        if legacy.keys.is_empty() {
            reject(
                reporter,
                format!("@LegacyConfig method [{signature}] annotation contains an empty list"),
            );
        } else if legacy.keys.iter().any(|key| key.trim().is_empty()) {
            reject(
                reporter,
                format!("@LegacyConfig method [{signature}] annotation has null or empty value"),
            );
        } else {
            let repeated = |key: &&str| legacy.keys.iter().any(|legacy_key| legacy_key == key);
            if let Some(key) = current.filter(repeated) {
                reject(
                    reporter,
                    format!(
                        "@Config property '{key}' on method [{signature}] appears in @LegacyConfig"
                    ),
                );
            }
            let mut seen = HashSet::new();
            if let Some(duplicate) = legacy.keys.iter().find(|key| !seen.insert(key.as_str())) {
                reject(
                    reporter,
                    format!(
                        "@LegacyConfig method [{signature}] annotation contains duplicate property '{duplicate}'"
                    ),
                );
            }
            for key in legacy.keys.iter().filter(|key| is_defunct(key)) {
                reject(
                    reporter,
                    format!(
                        "@LegacyConfig property '{key}' on method [{signature}] is defunct on class [{}]",
                        class.name()
                    ),
                );
            }
        }
        let blank_replacement =
            legacy.replaced_by.as_deref().is_some_and(|key| key.trim().is_empty());
        if current.is_none() && blank_replacement {
            reject(
                reporter,
                format!(
                    "@LegacyConfig method [{signature}] annotation has an empty replaced_by value"
                ),
            );
        }
    }

    accepted
}

fn report_unassociated(decl: &MethodDecl, reporter: &mut ProblemReporter<'_>) {
    let signature = decl.signature();
    reporter.error(
        ProblemKind::Annotation,
        Some(&signature),
        format!(
            "@LegacyConfig method [{signature}] is not associated with any valid @Config setter"
        ),
    );
}

fn build_attributes<'a, T: 'static>(
    class: &'a ConfigClass<T>,
    slots: &[Slot<'a, T>],
    current: Vec<Candidate<'a, T>>,
    reporter: &mut ProblemReporter<'_>,
) -> BTreeMap<String, AttributeMetadata<T>> {
    let mut grouped: BTreeMap<String, Vec<Candidate<'a, T>>> = BTreeMap::new();
    for candidate in current {
        grouped.entry(candidate.attribute.clone()).or_default().push(candidate);
    }

    let mut attributes = BTreeMap::new();
    for (name, mut group) in grouped {
        if group.len() > 1 {
            let setters = group
                .iter()
                .map(|candidate| format!("[{}]", candidate.signature))
                .collect::<Vec<_>>()
                .join(", ");
            reporter.error(
                ProblemKind::Annotation,
                Some(&group[0].signature),
                format!("Attribute [{name}] has more than one @Config setter: {setters}"),
            );
            continue;
        }
        let Some(candidate) = group.pop() else { continue };
        let Some(property) = candidate.decl.annotations.config.clone() else { continue };

        let legacy_injection_points = candidate
            .decl
            .annotations
            .legacy
            .iter()
            .flat_map(|legacy| legacy.keys.iter())
            .map(|key| {
                InjectionPoint::new(
                    key.clone(),
                    candidate.signature.clone(),
                    candidate.invoker.clone(),
                )
            })
            .collect();
        let (getter, getter_fn) = match find_getter(slots, &candidate, reporter) {
            Some(method) => (Some(method.decl().signature()), method.getter_fn().cloned()),
            None => (None, None),
        };

        attributes.insert(
            name.clone(),
            AttributeMetadata::new(
                name,
                class.name().to_string(),
                candidate.decl.annotations.description.clone(),
                getter,
                getter_fn,
                InjectionPoint::new(property, candidate.signature, candidate.invoker.clone()),
                legacy_injection_points,
            ),
        );
    }
    attributes
}

/// Pair the setter with `get_<name>()` or `is_<name>()` of a compatible type.
fn find_getter<'a, T: 'static>(
    slots: &[Slot<'a, T>],
    setter: &Candidate<'a, T>,
    reporter: &mut ProblemReporter<'_>,
) -> Option<&'a Method<T>> {
    let param = setter.decl.params.first()?;
    let names = getter_names(&setter.decl.name)?;
    let mut unusable = Vec::new();

    for name in &names {
        for method in slots.iter().filter_map(|slot| slot.concrete) {
            let decl = method.decl();
            if &decl.name != name {
                continue;
            }
            let usable = decl.is_accessible()
                && matches!(classify(decl), MethodKind::Getter | MethodKind::PredicateGetter)
                && decl
                    .returns
                    .as_deref()
                    .is_some_and(|returns| returns_compatible(returns, param))
                && method.getter_fn().is_some();
            if usable {
                return Some(method);
            }
            unusable.push(format!("[{}]", decl.signature()));
        }
    }

    let message = if unusable.is_empty() {
        format!("No getter for @Config setter [{}]", setter.signature)
    } else {
        format!(
            "No getter for @Config setter [{}]; unusable getter candidates: {}",
            setter.signature,
            unusable.join(", ")
        )
    };
    reporter.error(ProblemKind::MethodShape, Some(&setter.signature), message);
    None
}

/// A getter may return the setter's parameter type or an `Option` of it.
fn returns_compatible(returns: &str, param: &str) -> bool {
    returns == param
        || returns
            .strip_prefix("Option<")
            .and_then(|inner| inner.strip_suffix('>'))
            .is_some_and(|inner| inner == param)
}

/// Attach standalone legacy setters to the attribute they stand in for.
fn attach_legacy_setters<T: 'static>(
    attributes: &mut BTreeMap<String, AttributeMetadata<T>>,
    legacy_only: Vec<Candidate<'_, T>>,
    reporter: &mut ProblemReporter<'_>,
) {
    for candidate in legacy_only {
        let replaced_by = candidate
            .decl
            .annotations
            .legacy
            .as_ref()
            .and_then(|legacy| legacy.replaced_by.as_deref());
        let target = match replaced_by {
            Some(property) => attributes
                .values_mut()
                .find(|attribute| attribute.injection_point().property() == property),
            None => attributes.get_mut(&candidate.attribute),
        };
        let Some(attribute) = target else {
            report_unassociated(candidate.decl, reporter);
            continue;
        };
        let keys = candidate.decl.annotations.legacy.iter().flat_map(|legacy| legacy.keys.iter());
        for key in keys {
            attribute.push_legacy(InjectionPoint::new(
                key.clone(),
                candidate.signature.clone(),
                candidate.invoker.clone(),
            ));
        }
    }
}

/// A property key may bind exactly one injection point.
fn check_unique_properties<T: 'static>(
    attributes: &BTreeMap<String, AttributeMetadata<T>>,
    reporter: &mut ProblemReporter<'_>,
) {
    let mut bound: HashMap<&str, &MethodSignature> = HashMap::new();
    for attribute in attributes.values() {
        for point in attribute.injection_points() {
            match bound.get(point.property()) {
                Some(first) => reporter.error(
                    ProblemKind::Annotation,
                    Some(point.setter()),
                    format!(
                        "Property '{}' is bound by both [{first}] and [{}]",
                        point.property(),
                        point.setter()
                    ),
                ),
                None => {
                    bound.insert(point.property(), point.setter());
                }
            }
        }
    }
}
