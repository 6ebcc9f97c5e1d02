//! # Perseus
//!
//! A small server-rendered web toolkit: themed rendering, a form
//! subsystem with validation, MySQL access, and mail delivery, plus the
//! supporting services a conference-registration style site needs.
//!
//! The toolkit is split into focused crates re-exported here:
//!
//! - [`core`] - the error type, severities, and the shared message queue
//! - [`conf`] - TOML settings: site, theme, databases, mail
//! - [`theme`] - the renderable tree and the Tera-backed theme engine
//! - [`forms`] - form building, request binding, and validation
//! - [`db`] - the MySQL service, query builders, and installer support
//! - [`mail`] - mail message building and delivery backends
//! - [`services`] - CSV and XML interchange helpers
//! - [`system`] - the [`System`] facade tying a site together
//!
//! ## Quick start
//!
//! ```no_run
//! use perseus::forms::{Form, FormItem, FormSettings, RequestData};
//! use perseus::system::System;
//!
//! # fn main() -> perseus::core::Result<()> {
//! let system = System::new("/srv/site")?;
//!
//! let mut form = Form::new(
//!     FormSettings::new("contact", "/contact"),
//!     system.messages(),
//! );
//! form.add_item(FormItem::text("name").with_label("Name").required());
//! form.add_item(FormItem::email("mail").with_label("E-mail").required());
//!
//! form.process_request(&RequestData::from_post_query("name=Ada&mail=ada%40example.com"));
//! if form.validate() && form.submit() {
//!     // Store the submission, send mail, queue a notice.
//! }
//! let html = system.render(&mut form)?;
//! # let _ = html;
//! # Ok(())
//! # }
//! ```

pub mod conf;
pub mod core;
pub mod db;
pub mod forms;
pub mod mail;
pub mod services;
pub mod system;
pub mod theme;

pub use crate::core::{Error, MessageQueue, Result, Severity};
pub use crate::forms::{Form, FormItem, FormSettings, RequestData};
pub use crate::system::System;
pub use crate::theme::{RenderNode, Renderable, Theme};
