//! Selection cardinality for [`crate::select::SelectView`].
//!
//! The mode is a type parameter, so a single-select view can only ever be handed (and only ever
//! hands back) an `Option<SelectOption>`, and a multi-select view a `Vec<SelectOption>`.

use std::fmt::Debug;

use crate::option::SelectOption;

pub trait SelectMode {
    /// The committed selection the host owns.
    type Value: Clone + Debug + PartialEq;

    const MULTIPLE: bool;

    /// The value committed by the clear button.
    fn cleared() -> Self::Value;

    fn selected(value: &Self::Value) -> &[SelectOption];

    fn is_selected(value: &Self::Value, option: &SelectOption) -> bool {
        Self::selected(value).contains(option)
    }

    /// The value that results from picking `option` while `value` is committed.
    fn select(value: &Self::Value, option: &SelectOption) -> Self::Value;
}

/// Zero or one selected option.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Single;

impl SelectMode for Single {
    type Value = Option<SelectOption>;

    const MULTIPLE: bool = false;

    fn cleared() -> Self::Value {
        None
    }

    fn selected(value: &Self::Value) -> &[SelectOption] {
        value.as_slice()
    }

    fn select(_value: &Self::Value, option: &SelectOption) -> Self::Value {
        Some(option.clone())
    }
}

/// Any number of options, in the order they were picked.
///
/// Picking an already selected option removes it. Membership and removal both use
/// [`SelectOption`] identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Multiple;

impl SelectMode for Multiple {
    type Value = Vec<SelectOption>;

    const MULTIPLE: bool = true;

    fn cleared() -> Self::Value {
        Vec::new()
    }

    fn selected(value: &Self::Value) -> &[SelectOption] {
        value
    }

    fn select(value: &Self::Value, option: &SelectOption) -> Self::Value {
        if value.contains(option) {
            return value.iter().filter(|v| *v != option).cloned().collect();
        }
        let mut next = value.clone();
        next.push(option.clone());
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::options_from_labels;

    #[test]
    fn single_replaces_value() {
        let opts = options_from_labels(["apple", "banana"]);
        let v = Single::select(&Some(opts[0].clone()), &opts[1]);
        assert_eq!(v, Some(opts[1].clone()));
        assert!(Single::is_selected(&v, &opts[1]));
        assert!(!Single::is_selected(&v, &opts[0]));
        assert_eq!(Single::cleared(), None);
    }

    #[test]
    fn multiple_appends_then_removes_keeping_order() {
        let opts = options_from_labels(["apple", "banana", "cat"]);
        let mut v = Multiple::cleared();
        for o in &opts {
            v = Multiple::select(&v, o);
        }
        assert_eq!(v, opts);

        v = Multiple::select(&v, &opts[1]);
        assert_eq!(v, vec![opts[0].clone(), opts[2].clone()]);
    }

    #[test]
    fn multiple_uses_identity_for_membership_and_removal() {
        let a = SelectOption::new("same", "same");
        let b = SelectOption::new("same", "same");
        let v = Multiple::select(&Vec::new(), &a);
        assert!(Multiple::is_selected(&v, &a));
        assert!(!Multiple::is_selected(&v, &b));

        let v = Multiple::select(&v, &b);
        assert_eq!(v.len(), 2);

        let v = Multiple::select(&v, &a);
        assert_eq!(v, vec![b.clone()]);
    }
}
