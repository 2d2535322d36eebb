// ============================================================================
// avsplice-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Result alias shared with the core library
//
// Commands return core errors unchanged so that `main` can report the error
// class, message and ffmpeg diagnostics in one place.

use avsplice_core::{CoreError, CoreResult};

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Process exit code for a failed command.
pub const EXIT_FAILURE: i32 = 1;

/// Builds the error reported when interactive input is unusable.
pub fn input_error(message: impl Into<String>) -> CoreError {
    CoreError::InvalidInput(message.into())
}
