//! # plotstyle-rc - Runtime Configuration for Plot Styling
//!
//! `plotstyle-rc` models the runtime configuration of a matplotlib-like
//! plotting library as an explicit value instead of process-wide hidden state.
//!
//! ## Core Concepts
//!
//! - [`Catalog`]: the option names a library version recognizes, with defaults
//! - [`RcParams`]: a configuration bound to a catalog; set, update, reset, snapshot
//! - [`StyleSheet`]: parsed matplotlibrc-format `key : value` text
//!
//! ## Quick Start
//!
//! ```rust
//! use plotstyle_rc::{RcParams, StyleSheet};
//!
//! let sheet = StyleSheet::parse(r#"
//! font.size       : 8
//! figure.figsize  : 5.6, 3.461
//! text.usetex     : True
//! "#);
//!
//! let mut rc = RcParams::defaults();
//! rc.use_style(&sheet);
//!
//! assert_eq!(rc.get_pair("figure.figsize"), Some((5.6, 3.461)));
//! assert_eq!(rc.get_bool("text.usetex"), Some(true));
//! ```
//!
//! Options unknown to the catalog are dropped rather than rejected when
//! applied in bulk, so stylesheets written for one library version load on
//! another. Single writes through [`RcParams::set`] are strict.

mod catalog;
mod error;
mod params;
mod stylesheet;

pub use catalog::Catalog;
pub use error::RcError;
pub use params::{is_style_blacklisted, parse_bool, RcParams, RcSnapshot, STYLE_BLACKLIST};
pub use stylesheet::StyleSheet;
