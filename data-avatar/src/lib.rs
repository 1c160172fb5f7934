//! # Data Avatar
//!
//! `data-avatar` models the avatar a user picks for their profile:
//!
//! - [`Catalog`]: the avatar styles and the legal values of each style's
//!   customization parameters.
//! - [`AvatarService`]: builds image URLs for a DiceBear-style rendering
//!   endpoint, memoizes them, and produces [`AvatarDescriptor`]s.
//! - [`AvatarDescriptor`]: the record persisted for a user, one variant
//!   per avatar kind.
//!
//! ```
//! use data_avatar::{AvatarService, Params};
//!
//! let service = AvatarService::with_defaults().unwrap();
//! let mut params = Params::new();
//! params.insert("primaryColor", "663399");
//!
//! let outcome = service.build_url("vibes-42", "bottts", 256, &params);
//! assert_eq!(
//!     outcome.url().as_str(),
//!     "https://api.dicebear.com/7.x/bottts/png?seed=vibes-42&size=256&primaryColor=663399"
//! );
//! ```

pub mod cache;
pub mod catalog;
pub mod config;
pub mod descriptor;
pub mod palette;
pub mod params;
pub mod service;

pub use catalog::{Catalog, ParamKind, ParamValue, ParameterDomain, StyleDescriptor};
pub use config::ServiceConfig;
pub use descriptor::{
    initials, sanitize_seed, AvatarDescriptor, AvatarKind, DicebearAvatar,
};
pub use palette::{random_color, PALETTE};
pub use params::Params;
pub use service::{AvatarService, BuildOutcome, Degradation, DESCRIPTOR_SIZE};
