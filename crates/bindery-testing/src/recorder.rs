//! Recording decorator for configuration instances.
//!
//! [`RecordedConfig`] wraps a default instance and records every call made
//! through it, so the calls can later be checked against the class metadata.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Deref;

use bindery_core::ConfigType;
use bindery_metadata::configuration_metadata;
use serde::Serialize;
use serde_json::Value;

use crate::error::AssertionError;

/// One call made through a [`RecordedConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub method: String,
    /// The argument as JSON; `None` for calls that take no argument.
    pub argument: Option<Value>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.argument {
            Some(argument) => write!(f, "{}({argument})", self.method),
            None => write!(f, "{}()", self.method),
        }
    }
}

/// A configuration instance that logs each invocation.
#[derive(Debug, Clone)]
pub struct RecordedConfig<T> {
    instance: T,
    invocations: Vec<Invocation>,
}

impl<T> RecordedConfig<T> {
    pub const fn new(instance: T) -> Self {
        Self {
            instance,
            invocations: Vec::new(),
        }
    }

    /// Call a setter on the wrapped instance and record it with its argument.
    pub fn record<A, F>(&mut self, method: &str, argument: A, apply: F) -> &mut Self
    where
        A: Serialize,
        F: FnOnce(&mut T, A),
    {
        let recorded = serde_json::to_value(&argument).unwrap_or(Value::Null);
        apply(&mut self.instance, argument);
        self.invocations.push(Invocation {
            method: method.to_string(),
            argument: Some(recorded),
        });
        self
    }

    /// Call any other method on the wrapped instance and record it.
    pub fn invoke<R, F>(&mut self, method: &str, call: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.invocations.push(Invocation {
            method: method.to_string(),
            argument: None,
        });
        call(&self.instance)
    }

    #[must_use]
    pub const fn instance(&self) -> &T {
        &self.instance
    }

    #[must_use]
    pub fn into_instance(self) -> T {
        self.instance
    }

    #[must_use]
    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    /// Names of every method invoked, without repetition.
    #[must_use]
    pub fn invoked_methods(&self) -> BTreeSet<&str> {
        self.invocations.iter().map(|call| call.method.as_str()).collect()
    }
}

impl<T> Deref for RecordedConfig<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.instance
    }
}

/// Wrap a default instance of `T` for recording.
pub fn record_defaults<T: ConfigType>() -> Result<RecordedConfig<T>, AssertionError> {
    let instance = configuration_metadata::<T>().new_default()?;
    Ok(RecordedConfig::new(instance))
}
