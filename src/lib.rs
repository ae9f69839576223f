//! **slategrid**: keyboard-grid window placement for Slate.
//!
//! A character grid (by default the `1`–`7`, `q`–`u`, `a`–`j`, `z`–`m` block
//! of the keyboard) is laid over the screen.  Holding `alt,shift` plus one
//! grid key and pressing another moves the focused window onto the box
//! spanning the two cells.  The bottom row and right column of the grid can
//! be given fixed pixel sizes, so a dock or sidebar keeps its own slot.
//!
//! # Architecture
//!
//! * [`layout::GridLayout`]: pure geometry, cell ranges to screen
//!   rectangles built from deferred [`expr::Expr`]s.
//! * [`binding::BindingDriver`]: enumerates every chord, singleton layout
//!   and focus shortcut and registers them with a host.
//! * [`traits::Host`]: the window manager's binding registry.  Concrete
//!   backends live in [`host`].

pub mod binding;
pub mod config;
pub mod expr;
pub mod grid;
pub mod host;
pub mod layout;
pub mod operation;
pub mod traits;
