use std::fmt;
use std::sync::Arc;

#[derive(Debug)]
struct OptionData {
    label: String,
    value: String,
}

/// One selectable choice: an immutable `label`/`value` pair.
///
/// `SelectOption` is a shared handle. Cloning yields the *same* option, while two handles created
/// by separate [`SelectOption::new`] calls are different options even if their labels and values
/// are equal. `==` compares identity, which is what selection membership and removal rely on.
/// Use [`SelectOption::same_content`] for a structural comparison.
#[derive(Clone)]
pub struct SelectOption(Arc<OptionData>);

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self(Arc::new(OptionData {
            label: label.into(),
            value: value.into(),
        }))
    }

    /// An option whose label doubles as its value.
    pub fn labeled(label: impl Into<String>) -> Self {
        let label = label.into();
        Self::new(label.clone(), label)
    }

    pub fn label(&self) -> &str {
        &self.0.label
    }

    pub fn value(&self) -> &str {
        &self.0.value
    }

    pub fn same_content(&self, other: &SelectOption) -> bool {
        self.label() == other.label() && self.value() == other.value()
    }
}

impl PartialEq for SelectOption {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for SelectOption {}

impl fmt::Debug for SelectOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectOption")
            .field("label", &self.0.label)
            .field("value", &self.0.value)
            .finish()
    }
}

/// Builds one option per label, using each label as the value.
pub fn options_from_labels<I, S>(labels: I) -> Vec<SelectOption>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    labels.into_iter().map(SelectOption::labeled).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_are_equal_twins_are_not() {
        let a = SelectOption::new("apple", "apple");
        let twin = SelectOption::new("apple", "apple");
        assert_eq!(a, a.clone());
        assert_ne!(a, twin);
        assert!(a.same_content(&twin));
    }

    #[test]
    fn labels_become_values() {
        let opts = options_from_labels(["cat", "dog"]);
        assert_eq!(opts[1].label(), "dog");
        assert_eq!(opts[1].value(), "dog");
    }
}
