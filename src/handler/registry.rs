use super::HandlerExecution;
use crate::http::RequestMethod;

/// One declared route: a path, the verbs it answers and its execution.
#[derive(Debug, Clone)]
pub struct HandlerMethod {
    pub path: String,
    pub methods: Vec<RequestMethod>,
    pub execution: HandlerExecution,
}

impl HandlerMethod {
    pub fn new(
        path: impl Into<String>,
        methods: &[RequestMethod],
        execution: HandlerExecution,
    ) -> Self {
        Self {
            path: path.into(),
            methods: methods.to_vec(),
            execution,
        }
    }
}

/// Link-time record of a controller's routes, submitted by `#[routes]`.
pub struct ControllerRegistration {
    pub module_path: &'static str,
    pub controller: &'static str,
    /// Source line of the `#[routes]` block; orders blocks of one controller.
    pub line: u32,
    pub handlers: fn() -> Vec<HandlerMethod>,
}

impl ControllerRegistration {
    pub const fn new(
        module_path: &'static str,
        controller: &'static str,
        line: u32,
        handlers: fn() -> Vec<HandlerMethod>,
    ) -> Self {
        Self {
            module_path,
            controller,
            line,
            handlers,
        }
    }

    /// Whether this controller lives in `root` or one of its submodules.
    /// An empty root covers every module.
    pub fn is_under(&self, root: &str) -> bool {
        let root = root.trim_end_matches("::");
        if root.is_empty() {
            return true;
        }
        match self.module_path.strip_prefix(root) {
            Some("") => true,
            Some(rest) => rest.starts_with("::"),
            None => false,
        }
    }
}

inventory::collect!(ControllerRegistration);

/// All controller registrations linked into the binary, in a stable order.
///
/// Link order is unspecified, so entries are sorted by module path,
/// controller name and the source line of the `#[routes]` block.
pub fn registrations() -> Vec<&'static ControllerRegistration> {
    let mut all: Vec<_> = inventory::iter::<ControllerRegistration>
        .into_iter()
        .collect();
    all.sort_by_key(|r| (r.module_path, r.controller, r.line));
    all
}
