/// Number of consecutive generations a cell has been burning.
///
/// Only meaningful while the cell is on; off cells always carry `0`.
pub type Age = u32;

/// Count of completed [`crate::rules::step`] calls since the last reset.
pub type Generation = u64;
