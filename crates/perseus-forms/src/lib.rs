//! Form building and validation for Perseus.
//!
//! A [`Form`] owns named [`FormItem`]s in insertion order; each item
//! owns its label, description, and the concrete input element that
//! renders it. Submitted data moves the form through a small state
//! machine (`Unsubmitted -> Incomplete -> Valid | Invalid`) and
//! [`Form::submit`] refuses to run until validation has passed.
//!
//! Validation failures never abort the request: they mark the item
//! invalid and queue a user-facing message on the shared
//! [`MessageQueue`](perseus_core::MessageQueue).

pub mod element;
pub mod form;
pub mod item;
pub mod request;
pub mod validators;

pub use element::build_element;
pub use form::{Form, FormSettings, FormState, Method};
pub use item::{FormItem, ItemType, Validity};
pub use request::RequestData;
pub use validators::Validator;
