pub mod marker;
pub mod rewrite;

pub use marker::{
    collapse_blank_lines, insert_above, insert_below, remove_regions, replace_literal,
    MarkerRegion, SpliceError,
};
pub use rewrite::{patch_file, write_atomic};
