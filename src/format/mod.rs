//! Delivery formats and the canonical attribute model.
//!
//! Every external dataset arrives in some delivery format; a
//! [`FormatAdapter`] translates that format's raw keys and values into the
//! canonical attributes the rest of the engine works with, and answers the
//! capability questions (linear referencing, side dependence, direction
//! sensitivity) that drive how fragments are applied. Adapters are selected
//! once per import session through [`FormatTag`] and [`create_adapter`].

mod adapter;
mod agency;
mod attributes;
mod factory;
mod internal;
mod value;

pub use adapter::FormatAdapter;
pub use agency::AgencyFormat;
pub use attributes::CanonicalAttribute;
pub use factory::{create_adapter, FormatTag, UnknownFormat};
pub use internal::InternalFormat;
pub use value::{
    AttributeValue, CarriagewaySide, NormalizedValue, PathType, SafetyStrip, Surface,
};
