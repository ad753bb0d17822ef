pub mod format;
pub mod host;

pub use format::{format_bytes, format_number, format_size};
pub use host::{is_local_host, is_loopback_host, machine_host_name};
