//! Submitted form data.

/// Text fields of a submitted form, in submission order.
///
/// Names may repeat (multi-select inputs and checkbox groups), so this is a
/// multimap rather than a `HashMap`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedForm {
    fields: Vec<(String, String)>,
}

impl SubmittedForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// First value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// First value under `name`, trimmed; empty when the field is absent.
    pub fn trimmed(&self, name: &str) -> String {
        self.get(name).map(str::trim).unwrap_or_default().to_string()
    }

    /// Every value submitted under `name`, in order.
    pub fn get_all(&self, name: &str) -> Vec<String> {
        self.fields
            .iter()
            .filter(|(field, _)| field == name)
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// HTML checkbox semantics: checked only when the value is `on`.
    pub fn is_checked(&self, name: &str) -> bool {
        self.get(name) == Some("on")
    }
}

impl<K, V> FromIterator<(K, V)> for SubmittedForm
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = SubmittedForm::new();
        for (name, value) in iter {
            form.push(name, value);
        }
        form
    }
}
