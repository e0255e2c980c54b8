pub mod filename_op;
pub mod timestamp_op;
