//! Stream Lifecycle Tests
//!
//! Lazy finalization on the first encode, flush closing the stream, and reuse
//! of one encoder across several streams.

use pylame::error::{EncoderError, StateError};
use pylame::{Encoder, EncoderConfig};

#[test]
fn test_flush_before_encode_is_state_error() {
    let mut encoder = Encoder::new().expect("Failed to create encoder");
    match encoder.flush() {
        Err(EncoderError::State(StateError::NotEncoding)) => {}
        other => panic!("Expected a state error, got {:?}", other.map(|b| b.len())),
    }
}

#[test]
fn test_flush_twice_is_state_error() {
    let mut encoder = Encoder::new().expect("Failed to create encoder");
    encoder.encode(&vec![0i16; 4410]).expect("encode");
    encoder.flush().expect("first flush");
    assert!(matches!(
        encoder.flush(),
        Err(EncoderError::State(StateError::NotEncoding))
    ));
}

#[test]
fn test_failed_encode_leaves_flush_illegal() {
    let mut encoder = Encoder::new().expect("Failed to create encoder");
    assert!(encoder.encode(&[]).is_err());
    assert!(matches!(
        encoder.flush(),
        Err(EncoderError::State(StateError::NotEncoding))
    ));
}

#[test]
fn test_encode_flush_cycles_reuse_encoder() {
    let mut encoder = Encoder::new().expect("Failed to create encoder");

    for cycle in 0..3 {
        let mut mp3 = encoder.encode(&vec![0i16; 4410]).expect("encode");
        assert!(encoder.is_encoding());
        let tail = encoder.flush().expect("flush");
        assert!(tail.len() <= pylame::FLUSH_BUFFER_SIZE);
        assert!(!encoder.is_encoding());
        mp3.extend(tail);
        assert!(!mp3.is_empty(), "cycle {} produced no output", cycle);
    }

    assert_eq!(encoder.stats().streams_completed, 3);
    assert_eq!(encoder.stats().encode_calls, 3);
}

#[test]
fn test_channel_change_mid_stream_has_no_effect() {
    let mut encoder = Encoder::new().expect("Failed to create encoder");
    encoder.encode(&vec![0i16; 1152]).expect("encode");

    encoder.set_channels(2).expect("channels");
    assert_eq!(encoder.channels(), 2);

    // The open stream is still mono, so an odd sample count is fine.
    encoder
        .encode(&vec![0i16; 1153])
        .expect("mono stream should ignore the new channel count");
}

#[test]
fn test_channel_change_after_flush_takes_effect() {
    let mut encoder = Encoder::new().expect("Failed to create encoder");
    encoder.encode(&vec![0i16; 1152]).expect("encode");
    encoder.flush().expect("flush");

    encoder.set_channels(2).expect("channels");
    assert!(matches!(
        encoder.encode(&vec![0i16; 1153]),
        Err(EncoderError::InputData(_))
    ));

    encoder
        .encode(&vec![0i16; 2304])
        .expect("stereo stream after flush");
    assert!(encoder.is_encoding());
    assert_eq!(encoder.config().channels, 2);
}

#[test]
fn test_reconfigured_stream_keeps_earlier_settings() {
    let config = EncoderConfig::new().in_sample_rate(44100).quality(2);
    let mut encoder = Encoder::with_config(&config).expect("Failed to create encoder");
    encoder.encode(&vec![0i16; 4410]).expect("encode");
    encoder.flush().expect("flush");

    encoder.set_bitrate(64).expect("bitrate");
    encoder.encode(&vec![0i16; 4410]).expect("encode");

    assert_eq!(encoder.in_sample_rate(), 44100);
    assert_eq!(encoder.config(), &config.clone().bitrate(64));
}

#[test]
fn test_flush_output_is_exact_length() {
    let mut encoder = Encoder::new().expect("Failed to create encoder");
    encoder.set_in_sample_rate(44100).expect("rate");
    let encoded = encoder.encode(&vec![0i16; 44100]).expect("encode");
    let flushed = encoder.flush().expect("flush");

    let stats = encoder.stats();
    assert_eq!(stats.bytes_encoded, encoded.len() as u64);
    assert_eq!(stats.bytes_flushed, flushed.len() as u64);
    assert_eq!(stats.total_bytes(), (encoded.len() + flushed.len()) as u64);
}

#[cfg(feature = "diagnostics")]
#[test]
fn test_report_reflects_stream() {
    let mut encoder = Encoder::new().expect("Failed to create encoder");
    encoder.encode(&vec![0i16; 4410]).expect("encode");

    let report = encoder.report();
    assert!(report.encoding);
    assert_eq!(report.stats.encode_calls, 1);
    assert_eq!(report.config, EncoderConfig::default());

    let json = report.to_json().expect("serialize");
    assert!(json.contains("\"samples_per_channel\": 4410"));
}
