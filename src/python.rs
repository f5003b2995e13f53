//! Python bindings via pyo3.
//!
//! Exposes `pylame.Encoder` with the same methods as the Rust [`Encoder`].
//! Parameter finalization, encoding and flushing run with the GIL released.

use numpy::{AllowTypeChange, PyArrayLike1};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::encoder::Encoder;
use crate::error::{EncoderError, InputDataError};

impl From<EncoderError> for PyErr {
    fn from(err: EncoderError) -> PyErr {
        match err {
            EncoderError::InputData(_) => PyValueError::new_err(err.to_string()),
            _ => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

/// LAME MP3 encoder.
///
/// Defaults: mono, 22050 Hz input, 128 kbps, quality 5.
#[pyclass(name = "Encoder", module = "pylame")]
pub struct PyEncoder {
    inner: Encoder,
}

#[pymethods]
impl PyEncoder {
    #[new]
    fn new() -> PyResult<Self> {
        Ok(Self {
            inner: Encoder::new()?,
        })
    }

    fn set_channels(&mut self, channels: i32) -> PyResult<()> {
        Ok(self.inner.set_channels(channels)?)
    }

    /// 0 (best) to 9 (fastest)
    fn set_quality(&mut self, quality: i32) -> PyResult<()> {
        Ok(self.inner.set_quality(quality)?)
    }

    /// Target bitrate in kbps
    fn set_bitrate(&mut self, bitrate: i32) -> PyResult<()> {
        Ok(self.inner.set_bitrate(bitrate)?)
    }

    fn set_in_sample_rate(&mut self, rate: i32) -> PyResult<()> {
        Ok(self.inner.set_in_sample_rate(rate)?)
    }

    fn set_out_sample_rate(&mut self, rate: i32) -> PyResult<()> {
        Ok(self.inner.set_out_sample_rate(rate)?)
    }

    /// Encode interleaved PCM samples.
    ///
    /// Accepts a 1D int16 array, or anything numpy can convert to one (lists
    /// of ints, arrays of another numeric dtype). Returns the MP3 bytes
    /// produced by this call, possibly empty.
    fn encode<'py>(
        &mut self,
        py: Python<'py>,
        pcm_data: PyArrayLike1<'py, i16, AllowTypeChange>,
    ) -> PyResult<Bound<'py, PyBytes>> {
        let pcm = pcm_data
            .as_slice()
            .map_err(|_| EncoderError::from(InputDataError::NotContiguous))?;
        let inner = &mut self.inner;
        let encoded = py.allow_threads(|| inner.encode(pcm))?;
        Ok(PyBytes::new_bound(py, &encoded))
    }

    /// Drain the encoder and close the current stream.
    fn flush<'py>(&mut self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        let inner = &mut self.inner;
        let flushed = py.allow_threads(|| inner.flush())?;
        Ok(PyBytes::new_bound(py, &flushed))
    }

    /// Suppress LAME's console output.
    fn silence(&mut self) -> PyResult<()> {
        Ok(self.inner.silence()?)
    }

    fn __repr__(&self) -> String {
        let config = self.inner.config();
        format!(
            "Encoder(channels={}, in_sample_rate={}, bitrate={}, quality={}, encoding={})",
            config.channels,
            config.in_sample_rate,
            config.bitrate,
            config.quality,
            self.inner.is_encoding()
        )
    }
}

/// Python module definition.
#[pymodule]
fn pylame(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyEncoder>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use numpy::{get_array_module, PyArray1};
    use pyo3::types::PySlice;

    fn with_encoder<F>(f: F)
    where
        F: for<'py> FnOnce(Python<'py>, &Bound<'py, PyEncoder>),
    {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let encoder = Bound::new(py, PyEncoder::new().expect("encoder")).expect("pyclass");
            f(py, &encoder);
        });
    }

    #[test]
    fn test_encode_int16_array_returns_bytes() {
        with_encoder(|py, encoder| {
            let pcm = PyArray1::<i16>::zeros_bound(py, 12800, false);
            let encoded = encoder.call_method1("encode", (pcm,)).expect("encode");
            let encoded = encoded.downcast::<PyBytes>().expect("bytes");
            assert!(!encoded.as_bytes().is_empty());

            let flushed = encoder.call_method0("flush").expect("flush");
            assert!(flushed.is_instance_of::<PyBytes>());
        });
    }

    #[test]
    fn test_encode_converts_lists_and_other_dtypes() {
        with_encoder(|py, encoder| {
            encoder
                .call_method1("encode", (vec![0i64; 1152],))
                .expect("list of ints");
            let wide = PyArray1::<i32>::zeros_bound(py, 1152, false);
            encoder.call_method1("encode", (wide,)).expect("int32 array");
        });
    }

    #[test]
    fn test_empty_array_raises_value_error() {
        with_encoder(|py, encoder| {
            let pcm = PyArray1::<i16>::zeros_bound(py, 0, false);
            let err = encoder.call_method1("encode", (pcm,)).unwrap_err();
            assert!(err.is_instance_of::<PyValueError>(py));
        });
    }

    #[test]
    fn test_strided_array_raises_value_error() {
        with_encoder(|py, encoder| {
            let np = get_array_module(py).expect("numpy");
            let pcm = np.call_method1("zeros", (4608, "int16")).expect("zeros");
            let strided = pcm
                .get_item(PySlice::new_bound(py, 0, 4608, 2))
                .expect("slice");
            let err = encoder.call_method1("encode", (strided,)).unwrap_err();
            assert!(err.is_instance_of::<PyValueError>(py));
            assert!(err.value_bound(py).to_string().contains("contiguous"));
        });
    }

    #[test]
    fn test_flush_before_encode_raises_runtime_error() {
        with_encoder(|py, encoder| {
            let err = encoder.call_method0("flush").unwrap_err();
            assert!(err.is_instance_of::<PyRuntimeError>(py));
            assert_eq!(
                err.value_bound(py).to_string(),
                "State error: Not currently encoding"
            );
        });
    }
}
