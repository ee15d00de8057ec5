/// Default payload of a freshly created text locator.
pub const DEFAULT_LOCATOR_TEXT: &str = r#"Shape "sphere" "float radius" [1.0]"#;

/// Host type name of the pass-through text locator.
pub const TEXT_OBJECT: &str = "pbrtTextObject";

/// A locator shape. Only text locators carry a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Locator {
    pub type_name: String,
    pub text: Option<String>,
}

impl Locator {
    #[must_use]
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            text: None,
        }
    }

    #[must_use]
    pub fn text_object(text: &str) -> Self {
        Self {
            type_name: TEXT_OBJECT.to_string(),
            text: Some(text.to_string()),
        }
    }
}

impl Default for Locator {
    fn default() -> Self {
        Self::text_object(DEFAULT_LOCATOR_TEXT)
    }
}
