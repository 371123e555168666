//! # Link Redirect
//!
//! `link-redirect` is the HTTP front end for [`link_alloc`]. It spreads visitors over a
//! list of destination links in batched round robin order and lets a single administrator
//! reconfigure the rotation from a small control panel.
//!
//! ## Listeners
//!
//! 1. **Public** ([`public_router`]): `GET /redirectLink` answers `303 See Other` with the
//!    next link, or `404 Not Found` once every link has had its quota. Anything sent to `/`
//!    is moved permanently to the HTTPS control panel.
//! 2. **Admin** ([`admin_router`]): the control panel on `/`, behind [`BasicAuthLayer`],
//!    plus an unauthenticated `/ping`.
//!
//! Submitting the panel form installs a brand new allocator; progress always restarts
//! from zero.

mod config;
mod credentials;
mod error;
mod form;
mod layer;
mod pages;
mod router;
mod service;


pub use config::Args;
pub use credentials::Credentials;
pub use error::FormError;
pub use error::ServerError;
pub use error::SettingsError;
pub use form::SetForm;
pub use form::parse_url_list;
pub use layer::BasicAuthLayer;
pub use router::AppState;
pub use router::admin_router;
pub use router::public_router;
pub use service::BasicAuthService;
