//! `ar-layout` — assigns vertical offsets so markers that land near each
//! other on screen stay readable, and fixes the draw order.
//!
//! # Crate layout
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`params`]  | `LayoutParams`                                        |
//! | [`group`]   | anchor grouping, in-group distribution, collapse      |
//! | [`resolve`] | `resolve_overlaps`: cross-group zig-zag, paint order  |
//!
//! # Passes
//!
//! ```text
//! ranked markers ─► group by anchor ─► collapse? ─► spread in band ─► zig-zag vs other groups ─► sort back-to-front
//! ```
//!
//! Input order matters: the first marker of a group is its anchor, so the
//! selector's most relevant marker anchors each cluster.

pub mod group;
pub mod params;
pub mod resolve;


pub use params::LayoutParams;
pub use resolve::resolve_overlaps;
