use crate::error::Result;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

const REDIRECT_PREFIX: &str = "redirect:";

/// Result of a handler: a logical view name plus named model attributes.
///
/// Rendering is left to the hosting layer. A view named `redirect:<location>`
/// asks it to redirect instead of rendering.
///
/// # Example
/// ```
/// use handlermap::ModelAndView;
///
/// let mav = ModelAndView::new("user/detail")
///     .with_object("id", 7)
///     .unwrap();
/// assert_eq!(mav.get_object("id"), Some(&serde_json::json!(7)));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ModelAndView {
    view_name: String,
    model: BTreeMap<String, Value>,
}

impl ModelAndView {
    pub fn new(view_name: impl Into<String>) -> Self {
        Self {
            view_name: view_name.into(),
            model: BTreeMap::new(),
        }
    }

    pub fn redirect(location: impl AsRef<str>) -> Self {
        Self::new(format!("{}{}", REDIRECT_PREFIX, location.as_ref()))
    }

    /// Adds a model attribute, replacing any previous value under `name`.
    pub fn add_object(&mut self, name: impl Into<String>, value: impl Serialize) -> Result<&mut Self> {
        let value = serde_json::to_value(value)?;
        self.model.insert(name.into(), value);
        Ok(self)
    }

    pub fn with_object(mut self, name: impl Into<String>, value: impl Serialize) -> Result<Self> {
        self.add_object(name, value)?;
        Ok(self)
    }

    pub fn get_object(&self, name: &str) -> Option<&Value> {
        self.model.get(name)
    }

    pub fn view_name(&self) -> &str {
        &self.view_name
    }

    pub fn model(&self) -> &BTreeMap<String, Value> {
        &self.model
    }

    pub fn is_redirect(&self) -> bool {
        self.view_name.starts_with(REDIRECT_PREFIX)
    }

    pub fn redirect_target(&self) -> Option<&str> {
        self.view_name.strip_prefix(REDIRECT_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct User {
        id: u32,
        name: &'static str,
    }

    #[test]
    fn test_add_object_serializes_value() {
        let mut mav = ModelAndView::new("user");
        mav.add_object("user", User { id: 1, name: "gugu" }).unwrap();
        assert_eq!(
            mav.get_object("user"),
            Some(&json!({ "id": 1, "name": "gugu" }))
        );
        assert_eq!(mav.view_name(), "user");
        assert!(!mav.is_redirect());
    }

    #[test]
    fn test_same_attribute_name_replaces() {
        let mav = ModelAndView::new("v")
            .with_object("a", 1)
            .unwrap()
            .with_object("a", 2)
            .unwrap();
        assert_eq!(mav.model().len(), 1);
        assert_eq!(mav.get_object("a"), Some(&json!(2)));
    }

    #[test]
    fn test_redirect_view() {
        let mav = ModelAndView::redirect("/index.html");
        assert!(mav.is_redirect());
        assert_eq!(mav.redirect_target(), Some("/index.html"));
        assert_eq!(ModelAndView::new("index").redirect_target(), None);
    }
}
