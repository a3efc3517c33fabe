use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::{FilterError, Result};

/// Multi-channel recording split into one sample vector per channel
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    pub sample_rate: u32,
    pub channels: Vec<Vec<f64>>,
}

impl Recording {
    pub fn num_frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }
}

/// Read a WAV file, de-interleaving the channels
///
/// Integer samples are scaled to the range [-1, 1).
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<Recording> {
    let mut reader = WavReader::open(path.as_ref()).map_err(wav_error)?;
    let spec = reader.spec();
    let num_channels = spec.channels as usize;
    if num_channels == 0 {
        return Err(FilterError::Wav("file has no channels".into()));
    }

    let interleaved: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<_, _>>()
            .map_err(wav_error)?,
        SampleFormat::Int => {
            let max_val = 2_f64.powi(spec.bits_per_sample as i32 - 1);
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / max_val))
                .collect::<std::result::Result<_, _>>()
                .map_err(wav_error)?
        }
    };

    let mut channels = vec![Vec::with_capacity(interleaved.len() / num_channels); num_channels];
    for frame in interleaved.chunks_exact(num_channels) {
        for (channel, &sample) in channels.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }

    Ok(Recording {
        sample_rate: spec.sample_rate,
        channels,
    })
}

/// Write channels as an interleaved 32-bit float WAV file
pub fn write_wav<P: AsRef<Path>>(path: P, recording: &Recording) -> Result<()> {
    let num_channels = u16::try_from(recording.channels.len())
        .map_err(|_| FilterError::Wav("too many channels".into()))?;
    let spec = WavSpec {
        channels: num_channels,
        sample_rate: recording.sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path.as_ref(), spec).map_err(wav_error)?;
    for frame in 0..recording.num_frames() {
        for channel in &recording.channels {
            let sample = channel.get(frame).copied().unwrap_or(0.0);
            writer.write_sample(sample as f32).map_err(wav_error)?;
        }
    }

    writer.finalize().map_err(wav_error)?;
    Ok(())
}

fn wav_error(e: hound::Error) -> FilterError {
    FilterError::Wav(e.to_string())
}
