use indexmap::IndexMap;
use thiserror::Error;

/// A parameter or data problem shown to the user inside the chart frame
/// rather than as a hard failure.
///
/// `id` is the translation key; `text` is the interpolated English default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{text}")]
pub struct ChartProblem {
    pub id: &'static str,
    pub text: String,
    pub arguments: IndexMap<&'static str, String>,
}

impl ChartProblem {
    pub(crate) fn new(id: &'static str, template: &str) -> Self {
        Self {
            id,
            text: template.to_owned(),
            arguments: IndexMap::new(),
        }
    }

    pub(crate) fn with_arg(mut self, name: &'static str, value: impl ToString) -> Self {
        let value = value.to_string();
        self.text = self.text.replace(&format!("{{{name}}}"), &value);
        self.arguments.insert(name, value);
        self
    }
}
