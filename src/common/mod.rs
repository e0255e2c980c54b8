pub mod file_utils;
pub mod logging_setup;
pub mod timestamp_utils;

pub use file_utils::get_valid_filename;
pub use logging_setup::{Logger, LoggingContext, BASE_LOGGER_NAME};
pub use timestamp_utils::{datetime_now, SystemClock};
