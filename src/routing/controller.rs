//! Controller references and the registry that builds them.
//!
//! # Responsibilities
//! - Parse `Target@action` strings into a [`ControllerSpec`]
//! - Map target names to factories producing fresh controller instances
//! - Invoke a named action on an instance
//!
//! # Design Decisions
//! - Specs are validated at registration time, never at dispatch time
//! - Targets are resolved through an explicit registry, not by type name
//! - A new instance is built for every invocation; instances never outlive it

use std::collections::HashMap;
use std::fmt;

use crate::routing::types::{BoxError, HandlerError, RouterError, RouterResult};

/// Separator between target and action in a controller string.
pub const SPEC_SEPARATOR: char = '@';

/// A parsed `Target@action` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControllerSpec {
    target: String,
    action: String,
}

impl ControllerSpec {
    /// Parse a controller string.
    ///
    /// Exactly one `@` with non-empty text on both sides, otherwise
    /// [`RouterError::InvalidControllerSpec`].
    pub fn parse(spec: &str) -> RouterResult<Self> {
        let mut parts = spec.split(SPEC_SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(target), Some(action), None) if !target.is_empty() && !action.is_empty() => {
                Ok(Self {
                    target: target.to_string(),
                    action: action.to_string(),
                })
            }
            _ => Err(RouterError::InvalidControllerSpec(spec.to_string())),
        }
    }

    /// Target (controller) name.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Action (member) name.
    pub fn action(&self) -> &str {
        &self.action
    }
}

impl fmt::Display for ControllerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.target, SPEC_SEPARATOR, self.action)
    }
}

/// A handler target whose actions are invoked by name.
pub trait Controller {
    /// Run the named action.
    ///
    /// Unknown names should return [`HandlerError::UnknownAction`].
    fn call(&mut self, action: &str) -> Result<(), HandlerError>;
}

/// Builds a fresh controller instance.
pub type ControllerFactory =
    Box<dyn Fn() -> Result<Box<dyn Controller>, BoxError> + Send + Sync>;

/// Lookup table from target name to controller factory.
#[derive(Default)]
pub struct ControllerRegistry {
    factories: HashMap<String, ControllerFactory>,
}

impl ControllerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an infallible factory under `name`, replacing any previous one.
    pub fn register<F, C>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: Controller + 'static,
    {
        self.register_fallible(name, move || Ok(Box::new(factory()) as Box<dyn Controller>))
    }

    /// Register a factory that may fail to build its controller.
    pub fn register_fallible<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Result<Box<dyn Controller>, BoxError> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(controller = %name, "Controller registered");
        self.factories.insert(name, Box::new(factory));
        self
    }

    /// Whether a factory exists for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Build a new instance of `name`, or `None` if nothing is registered.
    pub fn instantiate(&self, name: &str) -> Option<Result<Box<dyn Controller>, BoxError>> {
        self.factories.get(name).map(|factory| factory())
    }

    /// Registered target names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerRegistry")
            .field("controllers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        calls: u32,
    }

    impl Controller for Counter {
        fn call(&mut self, action: &str) -> Result<(), HandlerError> {
            match action {
                "bump" => {
                    self.calls += 1;
                    Ok(())
                }
                "fail" => Err(HandlerError::failed("counter failed")),
                other => Err(HandlerError::UnknownAction(other.to_string())),
            }
        }
    }

    #[test]
    fn test_parse_valid_spec() {
        let spec = ControllerSpec::parse("UserController@index").unwrap();
        assert_eq!(spec.target(), "UserController");
        assert_eq!(spec.action(), "index");
        assert_eq!(spec.to_string(), "UserController@index");
    }

    #[test]
    fn test_parse_rejects_malformed_specs() {
        for bad in ["", "Aindex", "A@b@c", "@index", "A@", "@", "@@"] {
            let err = ControllerSpec::parse(bad).unwrap_err();
            assert!(
                matches!(err, RouterError::InvalidControllerSpec(ref s) if s == bad),
                "expected rejection of {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_registry_builds_fresh_instances() {
        let mut registry = ControllerRegistry::new();
        registry.register("Counter", || Counter { calls: 0 });

        assert!(registry.contains("Counter"));
        assert!(!registry.contains("Other"));
        assert!(registry.instantiate("Other").is_none());

        let mut first = registry.instantiate("Counter").unwrap().unwrap();
        first.call("bump").unwrap();
        assert!(matches!(first.call("nope"), Err(HandlerError::UnknownAction(a)) if a == "nope"));
        assert!(matches!(first.call("fail"), Err(HandlerError::Failed(_))));
    }

    #[test]
    fn test_registry_fallible_factory() {
        let mut registry = ControllerRegistry::new();
        registry.register_fallible("Broken", || Err("no database".into()));

        let err = registry.instantiate("Broken").unwrap().err().unwrap();
        assert_eq!(err.to_string(), "no database");
    }

    #[test]
    fn test_registry_names_sorted() {
        let mut registry = ControllerRegistry::new();
        registry
            .register("B", || Counter { calls: 0 })
            .register("A", || Counter { calls: 0 });
        assert_eq!(registry.names(), vec!["A", "B"]);
    }
}
