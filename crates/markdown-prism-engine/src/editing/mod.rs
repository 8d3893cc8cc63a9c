/*!
 * # Edit-Operation Engine
 *
 * Turns user intents into new document trees.
 *
 * ## Architecture Overview
 *
 * ### 1. The Session Owns the State
 * - A [`Session`] holds the [`Tree`](crate::model::Tree), the caret, an
 *   optional selection range and the current view mode
 * - There is no global editor: every operation takes the session it acts on
 *
 * ### 2. Command-Based Editing
 * - All edits are [`Cmd`] values delivered by the input collaborator
 * - [`Session::apply`] is pure: it returns a [`Patch`] carrying the new tree,
 *   the post-edit caret and the ids of the nodes it touched
 * - [`Session::install`] commits a patch; callers may inspect or discard it
 *   first
 *
 * ### 3. Rejection Leaves No Trace
 * - A missing caret, a caret naming a node that no longer exists, or a
 *   command that makes no sense at the caret yields an [`EditError`]
 * - The session is unchanged after any error
 *
 * ### 4. Formatting-Aware Text Operations
 * - In the rendered view deletion removes one *visible* unit, so hidden
 *   markers are never deleted one character at a time
 * - Splitting inside a formatted span closes the span in the first node and
 *   reopens it in the second
 *
 * ## Module Structure
 *
 * - **`commands`**: the `Cmd` and `Format` enums
 * - **`session`**: `Session`, `EditOptions` and the apply pipeline
 * - **`patch`**: edit results
 * - **`draft`**: the working copy a command mutates, plus text deletion
 * - **`structure`**: split, merge, conversion and list operations
 * - **`range`**: selection deletion, paste and format toggling
 * - **`inline`**: marker-pair analysis used by the above
 * - **`text`**: character-offset string helpers
 *
 * ## Usage Pattern
 *
 * ```rust
 * use markdown_prism_engine::editing::{Cmd, Session};
 * use markdown_prism_engine::selection::TreeCursor;
 *
 * let mut session = Session::from_markdown("hello");
 * let id = session.tree().nodes()[0].id;
 * session.focus(TreeCursor::at(id, 5));
 *
 * let patch = session.apply(Cmd::InsertText { text: "x".into() }).unwrap();
 * assert_eq!(patch.cursor.offset, 6);
 * session.install(patch);
 *
 * assert_eq!(session.to_markdown(), "hellox\n");
 * ```
 */

pub mod commands;
mod draft;
pub mod error;
pub mod inline;
pub mod patch;
mod range;
pub mod session;
mod structure;
pub mod text;

pub use commands::{Cmd, Format};
pub use error::EditError;
pub use patch::Patch;
pub use session::{EditOptions, Session};
