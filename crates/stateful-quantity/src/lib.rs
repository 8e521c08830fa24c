//! stateful-quantity — dimensioned resource amounts.
//!
//! Parses the quantity strings an orchestration platform accepts for
//! CPU and memory (`"400m"`, `"2"`, `"512Mi"`, `"1.5G"`, `"1e3"`) into an
//! exact, comparable [`Quantity`].
//!
//! # Grammar
//!
//! ```text
//! quantity := [+] number [suffix]
//! number   := digits [. digits] | . digits
//! suffix   := n | u | m | "" | k | M | G | T | P | E      (decimal SI)
//!           | Ki | Mi | Gi | Ti | Pi | Ei                 (binary SI)
//!           | (e | E) [+|-] digits                       (decimal exponent)
//! ```
//!
//! Negative amounts, empty strings and unknown suffixes are rejected
//! rather than coerced to zero.

pub mod error;
pub mod quantity;
pub mod suffix;

pub use error::{QuantityError, QuantityResult};
pub use quantity::Quantity;
pub use suffix::Format;
