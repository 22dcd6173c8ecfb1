/// Standard Unix exit codes for the bookmarkx CLI.
///
/// These codes follow the BSD convention where possible and provide
/// meaningful feedback about the type of error that occurred.
///
/// Successful termination
pub const SUCCESS: i32 = 0;

/// Command line usage error - invalid arguments, missing required parameters, etc.
pub const USAGE: i32 = 64;

/// Input data was rejected, e.g. an empty title or a malformed URL
pub const DATAERR: i32 = 65;

/// The bookmark store file does not exist or cannot be read
pub const NOINPUT: i32 = 66;

/// The bookmark store refused or failed an operation
pub const UNAVAILABLE: i32 = 69;
