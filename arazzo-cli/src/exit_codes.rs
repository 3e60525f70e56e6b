/// Exit codes for CI/automation.
pub const SUCCESS: i32 = 0;
/// The document could not be decoded, resolved or validated.
pub const VALIDATION_FAILED: i32 = 2;
pub const RUNTIME_ERROR: i32 = 4;
