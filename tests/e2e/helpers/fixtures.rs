use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::Cursor;

/// Opaque stand-in for synthesized audio: `len` copies of `fill`
pub fn fake_audio(len: usize, fill: u8) -> Vec<u8> {
    vec![fill; len]
}

/// A real mono 16-bit WAV file holding `samples`
pub fn wav_bytes(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut buffer = Vec::new();
    {
        let mut writer =
            WavWriter::new(Cursor::new(&mut buffer), spec).expect("Failed to create WAV writer");
        for &sample in samples {
            writer.write_sample(sample).expect("Failed to write sample");
        }
        writer.finalize().expect("Failed to finalize WAV");
    }
    buffer
}

pub fn wav_samples(bytes: &[u8]) -> Vec<i16> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes)).expect("Invalid WAV");
    reader
        .samples::<i16>()
        .map(|sample| sample.expect("Invalid sample"))
        .collect()
}
