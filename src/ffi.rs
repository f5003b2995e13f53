//! The parts of `lame.h` this crate uses.
//!
//! Everything comes from the bindings in `mp3lame-sys`, which also compiles
//! and links the bundled LAME 3.100. Only the report hooks are declared here:
//! the sys crate types `lame_report_function` as variadic, which a Rust
//! callback cannot implement, so the hooks take the `va_list` form instead.

#![allow(non_camel_case_types)]

use std::os::raw::{c_char, c_int, c_void};

pub use mp3lame_sys::{
    lame_close, lame_encode_buffer, lame_encode_buffer_interleaved, lame_encode_flush,
    lame_get_VBR, lame_get_brate, lame_get_in_samplerate, lame_get_mode, lame_get_num_channels,
    lame_get_out_samplerate, lame_get_quality, lame_global_flags, lame_init, lame_init_params,
    lame_set_VBR, lame_set_bWriteVbrTag, lame_set_brate, lame_set_in_samplerate, lame_set_mode,
    lame_set_num_channels, lame_set_out_samplerate, lame_set_quality,
};

pub use mp3lame_sys::MPEG_mode::{DUAL_CHANNEL, JOINT_STEREO, MONO, NOT_SET, STEREO};
pub use mp3lame_sys::vbr_mode::{
    vbr_abr as VBR_ABR, vbr_default as VBR_DEFAULT, vbr_mt as VBR_MT, vbr_mtrh as VBR_MTRH,
    vbr_off as VBR_OFF, vbr_rh as VBR_RH,
};

/// `va_list` as it reaches a callback: pointer sized on every supported ABI.
pub type va_list = *mut c_void;

/// `lame_report_function`
pub type ReportFn = unsafe extern "C" fn(format: *const c_char, ap: va_list);

extern "C" {
    pub fn lame_set_errorf(gfp: *mut lame_global_flags, func: Option<ReportFn>) -> c_int;
    pub fn lame_set_debugf(gfp: *mut lame_global_flags, func: Option<ReportFn>) -> c_int;
    pub fn lame_set_msgf(gfp: *mut lame_global_flags, func: Option<ReportFn>) -> c_int;
}
