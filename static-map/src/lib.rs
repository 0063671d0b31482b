//! Traits connecting tag marker types to the cells of a generated container.
//!
//! Tags never exist at runtime; a tag is only the type parameter that selects
//! which [`Cell`] implementation an access resolves to.

/// A container with a fixed, compile-time number of cells.
pub trait TagSet {
    /// Number of cells, equal to the number of declared tags.
    const LEN: usize;
}

/// The one cell of a [`TagSet`] container addressed by the marker type `Tag`.
///
/// Generated containers implement this exactly once per declared tag, so an
/// access through a tag outside the declared set fails to resolve.
pub trait Cell<Tag>: TagSet {
    /// Element type shared by every cell of the container.
    type Value;

    fn cell(&self) -> &Self::Value;
    fn cell_mut(&mut self) -> &mut Self::Value;
}
