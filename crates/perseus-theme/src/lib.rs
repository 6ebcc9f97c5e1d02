//! Renderable tree and theming for Perseus.
//!
//! A page is composed of [`Renderable`] nodes. Each node carries a list
//! of candidate templates (most specific last), a build-data map handed
//! to the template engine, and weighted children. Rendering is a
//! recursive two-phase process: `prepare()` populates build data and
//! children, then [`Theme::render`] walks the tree post-order, rendering
//! children in ascending weight order and folding their markup into the
//! parent's `content` before the parent's own template is applied.
//!
//! Templates are Tera files resolved over a theme search path: the site
//! override directory shadows the default theme.

pub mod attributes;
pub mod html;
pub mod node;
pub mod theme;

pub use attributes::Attributes;
pub use html::HtmlElement;
pub use node::{RenderNode, Renderable};
pub use theme::Theme;
