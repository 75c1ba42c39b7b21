//! XML utilities for navigating parsed documents.

mod utils;

pub use utils::{find_child, get_attribute, get_tag_name, get_text, subtree_to_markup};
