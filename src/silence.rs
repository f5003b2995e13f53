//! Suppression of LAME's console output
//!
//! LAME prints errors, debug traces and informational messages through three
//! report hooks on each handle. Pointing all of them at one static no-op
//! keeps the library quiet; log output comes from this crate instead.

use std::os::raw::{c_char, c_int};

use crate::error::{ConfigError, ConfigResult};
use crate::ffi;
use crate::handle::Handle;

unsafe extern "C" fn silent_output(_format: *const c_char, _ap: ffi::va_list) {}

/// Install the no-op reporter for errors, debug traces and messages.
pub(crate) fn install(handle: &mut Handle) -> ConfigResult<()> {
    let raw = handle.as_ptr();
    let hooks: [unsafe extern "C" fn(*mut ffi::lame_global_flags, Option<ffi::ReportFn>) -> c_int; 3] =
        [ffi::lame_set_errorf, ffi::lame_set_debugf, ffi::lame_set_msgf];

    for hook in hooks {
        let code = unsafe { hook(raw, Some(silent_output)) };
        if code < 0 {
            return Err(ConfigError::Reporter { code });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_on_fresh_handle() {
        let mut handle = Handle::open().expect("lame_init");
        assert!(install(&mut handle).is_ok());
        // Re-installing is harmless.
        assert!(install(&mut handle).is_ok());
    }
}
