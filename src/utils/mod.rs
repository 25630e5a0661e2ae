pub mod dump_tree;
pub mod time_utils;
