//! # Stateful Objects
//!
//! Routers read the target object's current-state field on every call.
//! The field may be absent (`None`), which is reported as a distinct error
//! before any dispatch lookup happens.

use crate::label::StateLabel;

/// An object exposing a current-state field.
///
/// Objects own neither routers nor tables; those belong to the class and are
/// shared by every instance.
pub trait Stateful {
    /// The label type this object's state is expressed in.
    type State: StateLabel;

    /// The current state, or `None` if the field is unset.
    fn current_state(&self) -> Option<&Self::State>;

    /// Human-readable identification used in error messages.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}
