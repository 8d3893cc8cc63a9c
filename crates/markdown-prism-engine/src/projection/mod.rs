//! Reference rendering collaborator.
//!
//! [`ProjectedSurface`] projects a tree into an element arena the
//! synchronizer can read and drive like a real display; [`to_html`] renders
//! the same projection as HTML with node identity attributes.

mod html;
mod styled;
mod surface;

pub use html::{inline_html, to_html};
pub use styled::{StyledRun, TextStyle, styled_runs};
pub use surface::{ElementId, ProjectedSurface};
