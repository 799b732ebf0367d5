//! Synthetic payloads and small utilities for API test cases.

pub mod error;
pub mod generators;
pub mod helpers;
pub mod utils;

pub use error::{HelperError, HelperResult};
pub use generators::{
    generate_test_data, random_address, random_email, random_name, random_phone, random_string,
    generate_test_data_named, Address, DataKind,
};
pub use helpers::{measure_execution_time, retry_on_failure, wait_for_condition};
pub use utils::{
    calculate_percentage, date_range, deep_merge, format_timestamp, mask_sensitive_data,
    parse_timestamp,
};
