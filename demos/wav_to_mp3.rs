//! WAV to MP3 conversion demo
//!
//! Reads a 16-bit PCM WAV file, feeds it to the encoder in fixed-size chunks
//! and flushes after the last one.
//!
//! Usage: cargo run --example wav_to_mp3 -- <input.wav> <output.mp3> [bitrate] [quality]

use std::env;
use std::fs::File;
use std::io::Write;
use std::process;

use pylame::Encoder;

/// Samples per channel handed to the encoder per call
const CHUNK_SIZE: usize = 12800;

/// Read WAV file using hound and return PCM data, sample rate, and channel count
fn read_wav_file(path: &str) -> Result<(Vec<i16>, u32, u16), Box<dyn std::error::Error>> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    if spec.sample_format != hound::SampleFormat::Int {
        return Err("Only integer PCM format is supported".into());
    }

    if spec.bits_per_sample != 16 {
        return Err("Only 16-bit samples are supported".into());
    }

    let samples: Result<Vec<i16>, _> = reader.samples::<i16>().collect();
    let samples = samples?;

    if samples.is_empty() {
        return Err("No audio data found in WAV file".into());
    }

    Ok((samples, spec.sample_rate, spec.channels))
}

fn convert(
    input: &str,
    output: &str,
    bitrate: i32,
    quality: i32,
) -> Result<(), Box<dyn std::error::Error>> {
    let (pcm, sample_rate, channels) = read_wav_file(input)?;

    let mut encoder = Encoder::new()?;
    encoder.set_bitrate(bitrate)?;
    encoder.set_in_sample_rate(sample_rate as i32)?;
    encoder.set_channels(i32::from(channels))?;
    encoder.set_quality(quality)?;

    let chunk_len = CHUNK_SIZE * channels as usize;
    let chunks = pcm.chunks(chunk_len);
    let num_chunks = chunks.len();
    println!("num_chunks: {}", num_chunks);

    let mut mp3_data = Vec::new();
    for chunk in chunks {
        mp3_data.extend(encoder.encode(chunk)?);
    }
    mp3_data.extend(encoder.flush()?);

    File::create(output)?.write_all(&mp3_data)?;

    let stats = encoder.stats();
    println!(
        "Encoded {} samples/channel at {} Hz into {} bytes",
        stats.samples_per_channel,
        sample_rate,
        stats.total_bytes()
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Error)
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: {} <input.wav> <output.mp3> [bitrate] [quality]",
            args.first().map(String::as_str).unwrap_or("wav_to_mp3")
        );
        process::exit(1);
    }

    let bitrate = args.get(3).and_then(|v| v.parse().ok()).unwrap_or(128);
    let quality = args.get(4).and_then(|v| v.parse().ok()).unwrap_or(7);

    if let Err(err) = convert(&args[1], &args[2], bitrate, quality) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
