//! Method declarations, signatures and invokers.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::annotations::{Annotations, LegacyConfig};
use crate::errors::ConversionError;
use crate::naming::short_type_name;

/// Access level of a class, constructor or method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    /// Visible inside the declaring crate only (package-private).
    Crate,
    Private,
}

impl Visibility {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Crate => "crate",
            Self::Private => "private",
        }
    }

    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a declared method: declaring type, name and parameter types.
///
/// Rendered as `Declaring::name(Param, ...)`; this is the form used in problem
/// messages and recorder logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MethodSignature {
    pub declaring: String,
    pub name: String,
    pub params: Vec<String>,
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}({})", self.declaring, self.name, self.params.join(", "))
    }
}

/// The declared shape of a method, independent of any invoker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MethodDecl {
    /// Declaring type. Filled in when the method is added to a class or interface.
    pub declaring: String,
    pub name: String,
    pub params: Vec<String>,
    /// Return type, `None` for unit.
    pub returns: Option<String>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub annotations: Annotations,
}

impl MethodDecl {
    /// A public, non-static method with no parameters returning unit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            declaring: String::new(),
            name: name.into(),
            params: Vec::new(),
            returns: None,
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
            annotations: Annotations::default(),
        }
    }

    #[must_use]
    pub fn signature(&self) -> MethodSignature {
        MethodSignature {
            declaring: self.declaring.clone(),
            name: self.name.clone(),
            params: self.params.clone(),
        }
    }

    /// Public, non-static: the only declarations the engine binds through.
    #[must_use]
    pub const fn is_accessible(&self) -> bool {
        self.visibility.is_public() && !self.is_static
    }
}

/// Builder-style modifiers shared by [`MethodDecl`] and [`Method`].
pub trait Declare: Sized {
    fn decl_mut(&mut self) -> &mut MethodDecl;

    #[must_use]
    fn param(mut self, ty: impl Into<String>) -> Self {
        self.decl_mut().params.push(ty.into());
        self
    }

    #[must_use]
    fn returns(mut self, ty: impl Into<String>) -> Self {
        self.decl_mut().returns = Some(ty.into());
        self
    }

    #[must_use]
    fn visibility(mut self, visibility: Visibility) -> Self {
        self.decl_mut().visibility = visibility;
        self
    }

    #[must_use]
    fn private(self) -> Self {
        self.visibility(Visibility::Private)
    }

    #[must_use]
    fn crate_visible(self) -> Self {
        self.visibility(Visibility::Crate)
    }

    #[must_use]
    fn static_method(mut self) -> Self {
        self.decl_mut().is_static = true;
        self
    }

    /// Attach the current-property marker.
    #[must_use]
    fn config(mut self, key: impl Into<String>) -> Self {
        self.decl_mut().annotations.config = Some(key.into());
        self
    }

    /// Attach the legacy-property marker with the given keys.
    #[must_use]
    fn legacy<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let legacy = self
            .decl_mut()
            .annotations
            .legacy
            .get_or_insert_with(LegacyConfig::default);
        legacy.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Name the current property a dedicated legacy setter stands in for.
    #[must_use]
    fn replaced_by(mut self, key: impl Into<String>) -> Self {
        self.decl_mut()
            .annotations
            .legacy
            .get_or_insert_with(LegacyConfig::default)
            .replaced_by = Some(key.into());
        self
    }

    #[must_use]
    fn description(mut self, text: impl Into<String>) -> Self {
        self.decl_mut().annotations.description = Some(text.into());
        self
    }
}

impl Declare for MethodDecl {
    fn decl_mut(&mut self) -> &mut MethodDecl {
        self
    }
}

/// Reads an attribute value from an instance.
pub type GetterFn<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// Converts a raw property string and stores it on an instance.
pub type SetterFn<T> = Arc<dyn Fn(&mut T, &str) -> Result<(), ConversionError> + Send + Sync>;

/// The callable half of a method descriptor.
pub enum Invoker<T> {
    Getter(GetterFn<T>),
    Setter(SetterFn<T>),
}

impl<T> Clone for Invoker<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Getter(read) => Self::Getter(Arc::clone(read)),
            Self::Setter(write) => Self::Setter(Arc::clone(write)),
        }
    }
}

impl<T> fmt::Debug for Invoker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Getter(_) => f.write_str("Invoker::Getter(..)"),
            Self::Setter(_) => f.write_str("Invoker::Setter(..)"),
        }
    }
}

impl<T: 'static> Invoker<T> {
    /// Re-target this invoker onto a type that embeds `T`.
    #[must_use]
    pub fn project<C: 'static>(
        self,
        lens: fn(&C) -> &T,
        lens_mut: fn(&mut C) -> &mut T,
    ) -> Invoker<C> {
        match self {
            Self::Getter(read) => Invoker::Getter(Arc::new(move |outer: &C| read(lens(outer)))),
            Self::Setter(write) => Invoker::Setter(Arc::new(move |outer: &mut C, raw: &str| {
                write(lens_mut(outer), raw)
            })),
        }
    }
}

/// A declared method of a configuration type `T`.
pub struct Method<T> {
    decl: MethodDecl,
    invoker: Option<Invoker<T>>,
}

impl<T> Clone for Method<T> {
    fn clone(&self) -> Self {
        Self {
            decl: self.decl.clone(),
            invoker: self.invoker.clone(),
        }
    }
}

impl<T> fmt::Debug for Method<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("decl", &self.decl)
            .field("invoker", &self.invoker)
            .finish()
    }
}

impl<T: 'static> Method<T> {
    /// A zero-argument method returning `V`.
    ///
    /// The value is captured as JSON so it can be compared without knowing `V`.
    /// Values that fail to serialize read as `null`.
    pub fn getter<V, F>(name: impl Into<String>, read: F) -> Self
    where
        V: Serialize,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        let mut decl = MethodDecl::new(name);
        decl.returns = Some(short_type_name::<V>());
        let read: GetterFn<T> = Arc::new(move |instance: &T| {
            serde_json::to_value(read(instance)).unwrap_or(Value::Null)
        });
        Self {
            decl,
            invoker: Some(Invoker::Getter(read)),
        }
    }

    /// A one-argument method taking `V`, converted from the raw property with `FromStr`.
    pub fn setter<V, F>(name: impl Into<String>, write: F) -> Self
    where
        V: FromStr + 'static,
        V::Err: fmt::Display,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let target = short_type_name::<V>();
        let mut decl = MethodDecl::new(name);
        decl.params.push(target.clone());
        let write: SetterFn<T> = Arc::new(move |instance: &mut T, raw: &str| {
            let value = raw
                .parse::<V>()
                .map_err(|err| ConversionError::new(raw, target.clone(), err.to_string()))?;
            write(instance, value);
            Ok(())
        });
        Self {
            decl,
            invoker: Some(Invoker::Setter(write)),
        }
    }

    /// A method known only by its declared shape; it has no invoker.
    pub fn declared(name: impl Into<String>) -> Self {
        Self {
            decl: MethodDecl::new(name),
            invoker: None,
        }
    }

    #[must_use]
    pub const fn decl(&self) -> &MethodDecl {
        &self.decl
    }

    #[must_use]
    pub const fn invoker(&self) -> Option<&Invoker<T>> {
        self.invoker.as_ref()
    }

    #[must_use]
    pub fn getter_fn(&self) -> Option<&GetterFn<T>> {
        match self.invoker.as_ref()? {
            Invoker::Getter(read) => Some(read),
            Invoker::Setter(_) => None,
        }
    }

    #[must_use]
    pub fn setter_fn(&self) -> Option<&SetterFn<T>> {
        match self.invoker.as_ref()? {
            Invoker::Setter(write) => Some(write),
            Invoker::Getter(_) => None,
        }
    }

    pub(crate) fn declared_on(mut self, declaring: &str) -> Self {
        declaring.clone_into(&mut self.decl.declaring);
        self
    }

    pub(crate) fn project<C: 'static>(
        self,
        lens: fn(&C) -> &T,
        lens_mut: fn(&mut C) -> &mut T,
    ) -> Method<C> {
        Method {
            decl: self.decl,
            invoker: self.invoker.map(|invoker| invoker.project(lens, lens_mut)),
        }
    }
}

impl<T> Declare for Method<T> {
    fn decl_mut(&mut self) -> &mut MethodDecl {
        &mut self.decl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Sample {
        port: u16,
        name: Option<String>,
    }

    #[test]
    fn getter_records_return_type_and_reads_json() {
        let method = Method::getter("get_port", |s: &Sample| s.port);
        assert_eq!(method.decl().returns.as_deref(), Some("u16"));
        assert!(method.decl().params.is_empty());

        let read = method.getter_fn().expect("getter invoker");
        assert_eq!(read(&Sample { port: 8080, name: None }), serde_json::json!(8080));
    }

    #[test]
    fn setter_converts_raw_values() {
        let method = Method::setter("set_port", |s: &mut Sample, v: u16| s.port = v);
        assert_eq!(method.decl().params, vec!["u16".to_string()]);
        assert_eq!(method.decl().returns, None);

        let write = method.setter_fn().expect("setter invoker");
        let mut sample = Sample::default();
        write(&mut sample, "9090").expect("valid port");
        assert_eq!(sample.port, 9090);
    }

    #[test]
    fn setter_reports_conversion_failures() {
        let method = Method::setter("set_port", |s: &mut Sample, v: u16| s.port = v);
        let write = method.setter_fn().expect("setter invoker");
        let err = write(&mut Sample::default(), "not-a-port").unwrap_err();
        assert_eq!(err.value, "not-a-port");
        assert_eq!(err.target, "u16");
    }

    #[test]
    fn optional_getter_reads_null() {
        let method = Method::getter("get_name", |s: &Sample| s.name.clone());
        let read = method.getter_fn().expect("getter invoker");
        assert_eq!(read(&Sample::default()), Value::Null);
    }

    #[test]
    fn declare_modifiers_apply_to_decl() {
        let method = Method::<Sample>::declared("set_value")
            .param("String")
            .private()
            .static_method()
            .config("value")
            .legacy(["old-value"])
            .replaced_by("value")
            .description("a value");
        let decl = method.decl();
        assert_eq!(decl.visibility, Visibility::Private);
        assert!(decl.is_static);
        assert!(!decl.is_accessible());
        assert_eq!(decl.annotations.config.as_deref(), Some("value"));
        let legacy = decl.annotations.legacy.as_ref().expect("legacy marker");
        assert_eq!(legacy.keys, vec!["old-value".to_string()]);
        assert_eq!(legacy.replaced_by.as_deref(), Some("value"));
        assert_eq!(decl.annotations.description.as_deref(), Some("a value"));
        assert!(method.invoker().is_none());
    }

    #[test]
    fn signature_display() {
        let method = Method::<Sample>::declared("set_value").param("String").declared_on("Sample");
        assert_eq!(method.decl().signature().to_string(), "Sample::set_value(String)");
    }

    #[test]
    fn projected_invokers_reach_embedded_value() {
        struct Outer {
            inner: Sample,
        }
        let method = Method::setter("set_port", |s: &mut Sample, v: u16| s.port = v)
            .project::<Outer>(|o| &o.inner, |o| &mut o.inner);
        let mut outer = Outer {
            inner: Sample::default(),
        };
        let write = method.setter_fn().expect("setter invoker");
        write(&mut outer, "7").expect("valid port");
        assert_eq!(outer.inner.port, 7);
    }
}
