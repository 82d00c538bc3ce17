//! Value objects shared by the snapshot builder and the differ.

mod json_path;
mod normalize;
mod slot_label;

pub use json_path::{merge_partial, value_at};
pub use normalize::{format_number, normalize, normalize_opt};
pub use slot_label::parse_slot_rank;
