use super::{HandlerKey, HandlerMapping};
use crate::config::{ConflictPolicy, MappingConfig};
use crate::error::{HandlerMapError, Result};
use crate::handler::{self, ControllerRegistration, HandlerExecution};
use crate::http::{Request, RequestMethod};
use std::collections::HashMap;

/// Handler mapping built from `#[routes]` controller registrations.
///
/// # Example
///
/// ```rust,ignore
/// let mut mapping = AnnotationHandlerMapping::new(MappingConfig::default());
/// mapping.initialize(&["app::web"])?;
///
/// let mapping = Arc::new(mapping);
/// assert!(mapping.support("/ping", RequestMethod::Get));
/// ```
#[derive(Debug, Default)]
pub struct AnnotationHandlerMapping {
    on_conflict: ConflictPolicy,
    handler_executions: HashMap<HandlerKey, HandlerExecution>,
}

impl AnnotationHandlerMapping {
    pub fn new(config: MappingConfig) -> Self {
        Self {
            on_conflict: config.on_conflict,
            handler_executions: HashMap::new(),
        }
    }

    /// Builds the mapping from the configured scan roots.
    pub fn from_config(config: MappingConfig) -> Result<Self> {
        let scan_roots = config.scan_roots.clone();
        let mut mapping = Self::new(config);
        mapping.initialize(&scan_roots)?;
        Ok(mapping)
    }

    /// Rebuilds the mapping from every controller under `scan_roots`.
    ///
    /// The new table replaces the old one only when the whole scan succeeds,
    /// so narrowing the roots removes routes and a rejected scan leaves the
    /// previous contents untouched. Controllers are processed in module path
    /// order; with [`ConflictPolicy::Overwrite`] the last one processed wins
    /// a collision.
    pub fn initialize<S: AsRef<str>>(&mut self, scan_roots: &[S]) -> Result<()> {
        tracing::info!(
            roots = ?scan_roots.iter().map(|root| root.as_ref()).collect::<Vec<_>>(),
            "Initialized AnnotationHandlerMapping!"
        );
        let mut scanned = Self {
            on_conflict: self.on_conflict,
            handler_executions: HashMap::new(),
        };
        let controllers = handler::registrations()
            .into_iter()
            .filter(|registration| {
                scan_roots
                    .iter()
                    .any(|root| registration.is_under(root.as_ref()))
            });

        for registration in controllers {
            scanned.add_controller(registration)?;
        }
        self.handler_executions = scanned.handler_executions;

        tracing::info!(
            handlers = self.handler_executions.len(),
            "Handler mapping ready"
        );
        Ok(())
    }

    fn add_controller(&mut self, registration: &ControllerRegistration) -> Result<()> {
        tracing::debug!(
            controller = registration.controller,
            module = registration.module_path,
            "Scanning controller"
        );
        for handler_method in (registration.handlers)() {
            if handler_method.methods.is_empty() {
                tracing::debug!(
                    handler = %handler_method.execution,
                    path = %handler_method.path,
                    "Skipping handler without request methods"
                );
                continue;
            }
            self.register(
                &handler_method.path,
                &handler_method.methods,
                handler_method.execution,
            )?;
        }
        Ok(())
    }

    /// Maps `path` for each of `methods` to `execution`.
    pub fn register(
        &mut self,
        path: &str,
        methods: &[RequestMethod],
        execution: HandlerExecution,
    ) -> Result<()> {
        for &method in methods {
            let key = HandlerKey::new(path, method);
            if let Some(previous) = self.handler_executions.get(&key) {
                if self.on_conflict == ConflictPolicy::Reject {
                    return Err(HandlerMapError::DuplicateMapping {
                        method: method.to_string(),
                        path: path.to_string(),
                    });
                }
                tracing::warn!(
                    key = %key,
                    previous = %previous,
                    handler = %execution,
                    "Overwriting handler mapping"
                );
            }
            tracing::debug!(key = %key, handler = %execution, "Mapped handler");
            self.handler_executions.insert(key, execution);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.handler_executions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handler_executions.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &HandlerKey> {
        self.handler_executions.keys()
    }
}

impl HandlerMapping for AnnotationHandlerMapping {
    fn support(&self, path: &str, method: RequestMethod) -> bool {
        self.handler_executions
            .contains_key(&HandlerKey::new(path, method))
    }

    fn get_handler(&self, request: &Request) -> Result<&HandlerExecution> {
        let path = request.uri().path();
        let not_found = || HandlerMapError::route_not_found(request.method().as_str(), path);

        let method = RequestMethod::of(request.method()).ok_or_else(not_found)?;
        self.handler_executions
            .get(&HandlerKey::new(path, method))
            .ok_or_else(not_found)
    }
}
