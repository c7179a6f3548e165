//! Class-level descriptors: constructors, interfaces and the configuration class itself.

use std::fmt;
use std::sync::Arc;

use crate::method::{Declare, Method, MethodDecl, Visibility};

/// Creates a fresh instance with default values.
pub type Factory<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// A declared constructor.
///
/// Only no-argument constructors can carry a factory; constructors with
/// parameters are described by shape alone.
pub struct Constructor<T> {
    params: Vec<String>,
    visibility: Visibility,
    factory: Option<Factory<T>>,
}

impl<T> Clone for Constructor<T> {
    fn clone(&self) -> Self {
        Self {
            params: self.params.clone(),
            visibility: self.visibility,
            factory: self.factory.clone(),
        }
    }
}

impl<T> fmt::Debug for Constructor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("params", &self.params)
            .field("visibility", &self.visibility)
            .field("has_factory", &self.factory.is_some())
            .finish()
    }
}

impl<T> Constructor<T> {
    /// A public no-argument constructor backed by `factory`.
    pub fn no_arg(factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            params: Vec::new(),
            visibility: Visibility::Public,
            factory: Some(Arc::new(factory)),
        }
    }

    /// A constructor known only by its parameter types.
    pub fn declared<I, S>(params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            params: params.into_iter().map(Into::into).collect(),
            visibility: Visibility::Public,
            factory: None,
        }
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[must_use]
    pub fn is_no_arg(&self) -> bool {
        self.params.is_empty()
    }

    /// Invoke the factory, if this constructor has one.
    #[must_use]
    pub fn instantiate(&self) -> Option<T> {
        self.factory.as_ref().map(|factory| factory())
    }

    /// `Class(Param, ...)`, the form used in problem messages.
    #[must_use]
    pub fn signature(&self, class: &str) -> String {
        format!("{class}({})", self.params.join(", "))
    }
}

/// A declaration-only supertype.
///
/// Interface methods never carry invokers; an implementing class supplies the
/// concrete method and inherits the interface's annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    name: String,
    methods: Vec<MethodDecl>,
    extends: Vec<Self>,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            extends: Vec::new(),
        }
    }

    /// Declare an abstract method on this interface.
    #[must_use]
    pub fn method(mut self, mut decl: MethodDecl) -> Self {
        decl.declaring.clone_from(&self.name);
        decl.is_abstract = true;
        self.methods.push(decl);
        self
    }

    #[must_use]
    pub fn extends(mut self, parent: Self) -> Self {
        self.extends.push(parent);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn methods(&self) -> &[MethodDecl] {
        &self.methods
    }

    #[must_use]
    pub fn super_interfaces(&self) -> &[Self] {
        &self.extends
    }
}

/// Everything the metadata engine knows about a configuration type.
pub struct ConfigClass<T> {
    name: String,
    visibility: Visibility,
    is_abstract: bool,
    constructors: Vec<Constructor<T>>,
    methods: Vec<Method<T>>,
    superclass: Option<Box<Self>>,
    interfaces: Vec<Interface>,
    defunct: Vec<String>,
}

impl<T> fmt::Debug for ConfigClass<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigClass")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("is_abstract", &self.is_abstract)
            .field("constructors", &self.constructors)
            .field("methods", &self.methods)
            .field("superclass", &self.superclass)
            .field("interfaces", &self.interfaces)
            .field("defunct", &self.defunct)
            .finish()
    }
}

impl<T: 'static> ConfigClass<T> {
    pub fn builder(name: impl Into<String>) -> ConfigClassBuilder<T> {
        ConfigClassBuilder {
            class: Self {
                name: name.into(),
                visibility: Visibility::Public,
                is_abstract: false,
                constructors: Vec::new(),
                methods: Vec::new(),
                superclass: None,
                interfaces: Vec::new(),
                defunct: Vec::new(),
            },
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[must_use]
    pub const fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    #[must_use]
    pub fn constructors(&self) -> &[Constructor<T>] {
        &self.constructors
    }

    /// The declared no-argument constructor, whatever its visibility.
    #[must_use]
    pub fn no_arg_constructor(&self) -> Option<&Constructor<T>> {
        self.constructors.iter().find(|ctor| ctor.is_no_arg())
    }

    /// Methods declared directly on this class.
    #[must_use]
    pub fn methods(&self) -> &[Method<T>] {
        &self.methods
    }

    #[must_use]
    pub fn superclass(&self) -> Option<&Self> {
        self.superclass.as_deref()
    }

    #[must_use]
    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    /// Property keys that used to exist and must not be bound any more.
    #[must_use]
    pub fn defunct(&self) -> &[String] {
        &self.defunct
    }

    /// This class followed by its superclass chain, most derived first.
    pub fn lineage(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |class| class.superclass())
    }

    fn project<C: 'static>(
        self,
        lens: fn(&C) -> &T,
        lens_mut: fn(&mut C) -> &mut T,
    ) -> ConfigClass<C> {
        ConfigClass {
            name: self.name,
            visibility: self.visibility,
            is_abstract: self.is_abstract,
            // constructors are not inherited
            constructors: Vec::new(),
            methods: self
                .methods
                .into_iter()
                .map(|method| method.project(lens, lens_mut))
                .collect(),
            superclass: self
                .superclass
                .map(|parent| Box::new(parent.project(lens, lens_mut))),
            interfaces: self.interfaces,
            defunct: self.defunct,
        }
    }
}

/// Fluent construction of a [`ConfigClass`].
pub struct ConfigClassBuilder<T> {
    class: ConfigClass<T>,
}

impl<T: 'static> ConfigClassBuilder<T> {
    #[must_use]
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.class.visibility = visibility;
        self
    }

    #[must_use]
    pub fn crate_visible(self) -> Self {
        self.visibility(Visibility::Crate)
    }

    #[must_use]
    pub fn abstract_class(mut self) -> Self {
        self.class.is_abstract = true;
        self
    }

    /// Declare a public no-argument constructor.
    #[must_use]
    pub fn constructor(self, factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
        self.declare_constructor(Constructor::no_arg(factory))
    }

    #[must_use]
    pub fn declare_constructor(mut self, constructor: Constructor<T>) -> Self {
        self.class.constructors.push(constructor);
        self
    }

    #[must_use]
    pub fn method(mut self, method: Method<T>) -> Self {
        self.class.methods.push(method.declared_on(&self.class.name));
        self
    }

    /// Declare a shape-only method.
    #[must_use]
    pub fn declare(self, decl: MethodDecl) -> Self {
        let mut method = Method::declared(decl.name.clone());
        *method.decl_mut() = decl;
        self.method(method)
    }

    /// Inherit from `parent`, reaching the embedded parent value through the lenses.
    #[must_use]
    pub fn extends<P: 'static>(
        mut self,
        parent: ConfigClass<P>,
        lens: fn(&T) -> &P,
        lens_mut: fn(&mut T) -> &mut P,
    ) -> Self {
        self.class.superclass = Some(Box::new(parent.project(lens, lens_mut)));
        self
    }

    #[must_use]
    pub fn implements(mut self, interface: Interface) -> Self {
        self.class.interfaces.push(interface);
        self
    }

    #[must_use]
    pub fn defunct<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class.defunct.extend(keys.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn build(self) -> ConfigClass<T> {
        self.class
    }
}

/// Registration hook for a configuration type.
///
/// Implementations describe the type once; the metadata registry caches the
/// resolved result per type.
pub trait ConfigType: Sized + 'static {
    fn describe() -> ConfigClass<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Base {
        value: Option<String>,
    }

    #[derive(Default)]
    struct Derived {
        base: Base,
    }

    fn base_class() -> ConfigClass<Base> {
        ConfigClass::builder("Base")
            .constructor(Base::default)
            .method(Method::getter("get_value", |b: &Base| b.value.clone()))
            .method(
                Method::setter("set_value", |b: &mut Base, v: String| b.value = Some(v))
                    .config("value"),
            )
            .build()
    }

    #[test]
    fn builder_stamps_declaring_class() {
        let class = base_class();
        assert_eq!(class.name(), "Base");
        assert!(class.methods().iter().all(|m| m.decl().declaring == "Base"));
        assert!(class.no_arg_constructor().is_some());
    }

    #[test]
    fn extends_projects_parent_methods() {
        let class = ConfigClass::builder("Derived")
            .constructor(Derived::default)
            .extends(base_class(), |d: &Derived| &d.base, |d: &mut Derived| &mut d.base)
            .build();

        let names: Vec<&str> = class.lineage().map(ConfigClass::name).collect();
        assert_eq!(names, vec!["Derived", "Base"]);

        let parent = class.superclass().expect("superclass");
        assert!(parent.constructors().is_empty());
        let setter = parent
            .methods()
            .iter()
            .find(|m| m.decl().name == "set_value")
            .and_then(Method::setter_fn)
            .expect("projected setter");

        let mut derived = Derived::default();
        setter(&mut derived, "hello").expect("string conversion");
        assert_eq!(derived.base.value.as_deref(), Some("hello"));
    }

    #[test]
    fn interface_methods_are_abstract() {
        let iface = Interface::new("Settable")
            .method(MethodDecl::new("set_value").param("String").config("value"));
        let decl = &iface.methods()[0];
        assert_eq!(decl.declaring, "Settable");
        assert!(decl.is_abstract);
    }

    #[test]
    fn constructor_signature_and_factory() {
        let declared = Constructor::<Base>::declared(["String"]).with_visibility(Visibility::Crate);
        assert_eq!(declared.signature("Base"), "Base(String)");
        assert!(!declared.is_no_arg());
        assert!(declared.instantiate().is_none());

        let no_arg = Constructor::no_arg(Base::default);
        assert_eq!(no_arg.signature("Base"), "Base()");
        assert!(no_arg.instantiate().is_some());
    }
}
