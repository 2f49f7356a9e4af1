/// Sample format conversion between decoded clips, devices, and PCM files.
///
/// Converts channel layouts and resamples with linear interpolation.
#[derive(Debug, Clone)]
pub struct SampleConverter {
    target_sample_rate: u32,
    target_channels: u16,
}

impl SampleConverter {
    pub fn new(target_sample_rate: u32, target_channels: u16) -> Self {
        Self {
            target_sample_rate,
            target_channels,
        }
    }

    /// Convert interleaved samples to the target channel count and rate.
    pub fn convert(&self, samples: &[f32], channels: u16, sample_rate: u32) -> Vec<f32> {
        let remapped = remap_channels(samples, channels, self.target_channels);
        self.resample(&remapped, sample_rate)
    }

    /// Linear interpolation resampling of interleaved audio already in the
    /// target channel layout.
    ///
    /// Returns input unchanged if rates match.
    pub fn resample(&self, samples: &[f32], source_sample_rate: u32) -> Vec<f32> {
        if source_sample_rate == self.target_sample_rate || samples.is_empty() || source_sample_rate == 0 {
            return samples.to_vec();
        }

        let channels = self.target_channels.max(1) as usize;
        let frame_count = samples.len() / channels;
        let ratio = self.target_sample_rate as f64 / source_sample_rate as f64;
        let output_frames = (frame_count as f64 * ratio) as usize;
        if output_frames == 0 {
            return Vec::new();
        }

        let mut output = vec![0.0f32; output_frames * channels];
        for i in 0..output_frames {
            let source_index = i as f64 / ratio;
            let index = source_index as usize;
            let fraction = (source_index - index as f64) as f32;

            for ch in 0..channels {
                if index + 1 < frame_count {
                    output[i * channels + ch] = samples[index * channels + ch] * (1.0 - fraction)
                        + samples[(index + 1) * channels + ch] * fraction;
                } else if index < frame_count {
                    output[i * channels + ch] = samples[index * channels + ch];
                }
            }
        }
        output
    }
}

/// Change the channel count of interleaved audio.
///
/// Mono targets average all channels; mono sources are duplicated; other
/// layouts map channels in order and repeat sources for extra outputs.
pub fn remap_channels(samples: &[f32], from: u16, to: u16) -> Vec<f32> {
    if from == to || from == 0 || to == 0 {
        return samples.to_vec();
    }
    if to == 1 {
        return downmix_to_mono(samples, from as usize);
    }

    let from = from as usize;
    let to = to as usize;
    let frame_count = samples.len() / from;
    let mut output = Vec::with_capacity(frame_count * to);
    for frame in samples.chunks_exact(from) {
        for ch in 0..to {
            output.push(frame[ch % from]);
        }
    }
    output
}

/// Downmix interleaved multi-channel audio to mono by averaging channels per frame.
pub fn downmix_to_mono(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    let scale = 1.0 / channels as f32;
    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() * scale)
        .collect()
}

/// Scale a normalized sample to a signed integer of `bit_depth` bits.
///
/// Out-of-range samples are clamped.
pub fn pcm_value(sample: f32, bit_depth: u16) -> i32 {
    let clamped = sample.clamp(-1.0, 1.0) as f64;
    let max = match bit_depth {
        24 => 8_388_607.0,
        32 => i32::MAX as f64,
        _ => i16::MAX as f64,
    };
    (clamped * max) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pcm_value_scales_to_bit_depth() {
        assert_eq!(pcm_value(0.0, 16), 0);
        assert_eq!(pcm_value(1.0, 16), i16::MAX as i32);
        assert_eq!(pcm_value(-1.0, 24), -8_388_607);
        assert_eq!(pcm_value(1.0, 32), i32::MAX);
    }

    #[test]
    fn pcm_value_clamps_out_of_range() {
        assert_eq!(pcm_value(2.0, 16), i16::MAX as i32);
        assert_eq!(pcm_value(-3.0, 16), -(i16::MAX as i32));
    }

    #[test]
    fn downmix_stereo_to_mono() {
        let mono = downmix_to_mono(&[0.2, 0.8, 0.4, 0.6], 2);
        assert_eq!(mono.len(), 2);
        assert_relative_eq!(mono[0], 0.5);
        assert_relative_eq!(mono[1], 0.5);
    }

    #[test]
    fn mono_is_duplicated_to_stereo() {
        assert_eq!(remap_channels(&[0.1, 0.2], 1, 2), vec![0.1, 0.1, 0.2, 0.2]);
    }

    #[test]
    fn stereo_is_repeated_into_quad() {
        assert_eq!(
            remap_channels(&[1.0, 2.0], 2, 4),
            vec![1.0, 2.0, 1.0, 2.0]
        );
    }

    #[test]
    fn resample_same_rate_is_passthrough() {
        let converter = SampleConverter::new(48000, 1);
        let samples = vec![1.0, 2.0, 3.0];
        assert_eq!(converter.resample(&samples, 48000), samples);
    }

    #[test]
    fn resample_upsample_2x() {
        let converter = SampleConverter::new(48000, 1);
        let result = converter.resample(&[0.0, 1.0], 24000);
        assert_eq!(result.len(), 4);
        assert_relative_eq!(result[0], 0.0);
        assert_relative_eq!(result[1], 0.5);
        assert_relative_eq!(result[2], 1.0);
    }

    #[test]
    fn convert_mono_22k_to_stereo_44k() {
        let converter = SampleConverter::new(44100, 2);
        let result = converter.convert(&[0.0, 1.0], 1, 22050);
        assert_eq!(result.len(), 8);
        assert_relative_eq!(result[2], 0.5);
        assert_relative_eq!(result[3], 0.5);
    }
}
