//! Task text template rendering.

use super::ConfigError;
use minijinja::Environment;
use serde::Serialize;

/// Template used for the text of tasks opened on a regression.
pub const DEFAULT_TASK_TEMPLATE: &str = "Build {{ number }} finished as {{ result }}.\
{% if failed_tests is defined %} {{ failed_tests }} of {{ total_tests }} test cases failed.{% endif %} \
Please fix the build.";

/// Values available to the task text template.
///
/// `failed_tests` and `total_tests` are undefined, not zero, when the build
/// reported no test results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskTextContext {
    /// Build number.
    pub number: u32,
    /// Lower-cased display result, such as `not built`.
    pub result: String,
    /// Failed test cases, when test results exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_tests: Option<u32>,
    /// Total test cases, when test results exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tests: Option<u32>,
}

/// Validated `minijinja` template for task text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTextTemplate {
    source: String,
}

impl TaskTextTemplate {
    /// Compiles `source` to check its syntax.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTaskTemplate`] when the template does
    /// not compile.
    pub fn new(source: impl Into<String>) -> Result<Self, ConfigError> {
        let template_source = source.into();
        let environment = Environment::new();
        environment
            .template_from_str(&template_source)
            .map_err(|error| ConfigError::InvalidTaskTemplate(error.to_string()))?;
        Ok(Self {
            source: template_source,
        })
    }

    /// Returns the template source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Renders the task text.
    ///
    /// # Errors
    ///
    /// Returns the `minijinja` error when rendering fails at runtime.
    pub fn render(&self, context: &TaskTextContext) -> Result<String, minijinja::Error> {
        Environment::new().render_str(&self.source, context)
    }
}

impl Default for TaskTextTemplate {
    fn default() -> Self {
        Self {
            source: DEFAULT_TASK_TEMPLATE.to_owned(),
        }
    }
}
