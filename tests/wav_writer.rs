//! Writer for WAV files

use std::path::Path;

use hound::*;

/// Control rate of the rendered test signals.
pub const SAMPLE_RATE: u32 = 1000;

/// Writes sample data as WAV file in 32-bit float format, normalized to the
/// largest magnitude in the data.
pub fn write(
    filename: impl AsRef<std::path::Path> + core::fmt::Display,
    samples: &[i32],
) -> std::io::Result<()> {
    let path = format!("out/{filename}");
    let path = Path::new(path.as_str());

    // Create parent directories to the path if they don't exist.
    let parent = path.parent().unwrap();
    std::fs::create_dir_all(parent).ok();

    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();

    let peak = samples
        .iter()
        .map(|s| s.unsigned_abs())
        .max()
        .unwrap_or(1)
        .max(1);

    for sample in samples {
        writer.write_sample(*sample as f32 / peak as f32).unwrap();
    }

    Ok(())
}
