//! Owning wrapper around one `lame_global_flags` instance

use std::os::raw::c_int;
use std::ptr::NonNull;

use crate::error::InitError;
use crate::ffi;

/// Exclusive owner of a LAME handle.
///
/// The handle is released in `Drop`, exactly once. Setters return the raw
/// library status so the caller decides how to report it.
pub(crate) struct Handle {
    raw: NonNull<ffi::lame_global_flags>,
}

// LAME keeps no thread-local state: a handle may move between threads as long
// as only one of them uses it at a time, which `&mut self` guarantees.
unsafe impl Send for Handle {}

macro_rules! forward_int {
    ($(($set:ident, $get:ident, $lame_set:ident, $lame_get:ident)),* $(,)?) => {
        $(
            pub fn $set(&mut self, value: c_int) -> c_int {
                unsafe { ffi::$lame_set(self.raw.as_ptr(), value) }
            }

            pub fn $get(&self) -> c_int {
                unsafe { ffi::$lame_get(self.raw.as_ptr()) }
            }
        )*
    };
}

impl Handle {
    /// Acquire a fresh handle from the library.
    pub fn open() -> Result<Self, InitError> {
        let raw = unsafe { ffi::lame_init() };
        NonNull::new(raw)
            .map(|raw| Handle { raw })
            .ok_or(InitError::HandleUnavailable)
    }

    pub fn as_ptr(&mut self) -> *mut ffi::lame_global_flags {
        self.raw.as_ptr()
    }

    forward_int! {
        (set_num_channels, num_channels, lame_set_num_channels, lame_get_num_channels),
        (set_in_samplerate, in_samplerate, lame_set_in_samplerate, lame_get_in_samplerate),
        (set_out_samplerate, out_samplerate, lame_set_out_samplerate, lame_get_out_samplerate),
        (set_brate, brate, lame_set_brate, lame_get_brate),
        (set_quality, quality, lame_set_quality, lame_get_quality),
        (set_mode, mode, lame_set_mode, lame_get_mode),
        (set_vbr, vbr, lame_set_VBR, lame_get_VBR),
    }

    pub fn set_write_vbr_tag(&mut self, enable: bool) -> c_int {
        unsafe { ffi::lame_set_bWriteVbrTag(self.raw.as_ptr(), c_int::from(enable)) }
    }

    /// `lame_init_params`
    pub fn init_params(&mut self) -> c_int {
        unsafe { ffi::lame_init_params(self.raw.as_ptr()) }
    }

    /// `lame_encode_buffer` with `pcm` as both the left and the right channel.
    ///
    /// `nsamples` and `out_size` are the `c_int` forms of `pcm.len()` and
    /// `out.len()`.
    pub fn encode_mono(
        &mut self,
        pcm: &[i16],
        nsamples: c_int,
        out: &mut [u8],
        out_size: c_int,
    ) -> c_int {
        debug_assert_eq!(nsamples as usize, pcm.len());
        debug_assert_eq!(out_size as usize, out.len());
        unsafe {
            ffi::lame_encode_buffer(
                self.raw.as_ptr(),
                pcm.as_ptr(),
                pcm.as_ptr(),
                nsamples,
                out.as_mut_ptr(),
                out_size,
            )
        }
    }

    /// `lame_encode_buffer_interleaved`; `nsamples` counts samples per channel.
    pub fn encode_interleaved(
        &mut self,
        pcm: &[i16],
        nsamples: c_int,
        out: &mut [u8],
        out_size: c_int,
    ) -> c_int {
        debug_assert!(nsamples as usize * 2 <= pcm.len());
        debug_assert_eq!(out_size as usize, out.len());
        unsafe {
            // Declared `*mut` in lame.h, but the buffer is only read.
            ffi::lame_encode_buffer_interleaved(
                self.raw.as_ptr(),
                pcm.as_ptr().cast_mut(),
                nsamples,
                out.as_mut_ptr(),
                out_size,
            )
        }
    }

    /// `lame_encode_flush` into `out`, which must not exceed `c_int::MAX` bytes
    pub fn flush(&mut self, out: &mut [u8]) -> c_int {
        let size = c_int::try_from(out.len()).unwrap_or(c_int::MAX);
        unsafe { ffi::lame_encode_flush(self.raw.as_ptr(), out.as_mut_ptr(), size) }
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        unsafe {
            ffi::lame_close(self.raw.as_ptr());
        }
    }
}
