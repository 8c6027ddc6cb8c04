//! Store-backed properties which report their reads and writes to observers.
//!
//! Annotating a `static mut` declaration with [`observable_default`] replaces it with a type
//! implementing [`Property`]. Reading the property goes through the configured [`store::Store`]
//! (falling back to a default when nothing usable is stored), and every read and write is
//! reported to the [`observation::registrar`].
//!
//! ```
//! use observable_defaults::{Property, observable_default, store::STANDARD};
//!
//! #[observable_default(key = "launch_count", default = 0, store = STANDARD)]
//! static mut launch_count: u32;
//!
//! assert_eq!(launch_count::get(), 0);
//!
//! launch_count::update(|count| *count += 1);
//! assert_eq!(launch_count::get(), 1);
//! ```
//!
//! Properties of type `Option<T>` have no default, and setting them to `None` removes the key:
//!
//! ```
//! use observable_defaults::{Property, observable_default, store::STANDARD};
//!
//! #[observable_default(key = "nickname", store = STANDARD)]
//! static mut nickname: Option<String>;
//!
//! nickname::set(Some("ferris".to_string()));
//! assert_eq!(nickname::get().as_deref(), Some("ferris"));
//!
//! nickname::set(None);
//! assert_eq!(nickname::get(), None);
//! ```
//!
//! Without any arguments, the property is forwarded to `Defaults::name()` and
//! `Defaults::set_name(value)`, which must be in scope where the attribute is used.

pub mod observation;
pub mod store;

mod property;

pub use observable_defaults_macros::observable_default;
pub use property::Property;

pub mod prelude {
    pub use crate::{
        Property, observable_default,
        observation::{ObservationRegistrar, Observer, ObserverId, registrar, track},
        store::{MemoryStore, STANDARD, Store},
    };
}
