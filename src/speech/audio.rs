//! Microphone capture and audio conditioning for speech recognition
//!
//! Records one fixed-length window from the default input device, then
//! conditions it for the recognizer: DC-offset removal, resampling to
//! 16 kHz, peak normalization. Compiled in with the `voice-input` feature.

use crate::{AskpodError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::StreamConfig;
use crossbeam_channel::bounded;
use rubato::{FastFixedIn, PolynomialDegree, Resampler};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Sample rate the recognizer expects
pub const RECOGNIZER_SAMPLE_RATE: u32 = 16_000;

/// Record one capture window from the default input device.
///
/// Returns mono samples and the device sample rate. Blocks for the full
/// window; intended to run on the capture pipeline worker.
pub fn record_window(duration_secs: f32) -> Result<(Vec<f32>, u32)> {
    let host = cpal::default_host();

    let device = host
        .default_input_device()
        .ok_or_else(|| AskpodError::CaptureError("No input device available".into()))?;

    info!(
        "Using input device: {}",
        device.name().unwrap_or_else(|_| "Unknown".to_string())
    );

    let config: StreamConfig = device
        .default_input_config()
        .map_err(|e| AskpodError::CaptureError(format!("Failed to get input config: {}", e)))?
        .into();

    let sample_rate = config.sample_rate.0;
    let channels = config.channels as usize;

    let (audio_tx, audio_rx) = bounded::<Vec<f32>>(256);

    let err_fn = |err| {
        error!("Audio input stream error: {}", err);
    };

    let stream = device
        .build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                // Average all channels to create mono
                let samples = if channels == 1 {
                    data.to_vec()
                } else {
                    data.chunks(channels)
                        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
                        .collect()
                };

                if let Err(e) = audio_tx.try_send(samples) {
                    debug!("Failed to send audio data: {}", e);
                }
            },
            err_fn,
            None,
        )
        .map_err(|e| AskpodError::CaptureError(format!("Failed to build input stream: {}", e)))?;

    stream
        .play()
        .map_err(|e| AskpodError::CaptureError(format!("Failed to start input stream: {}", e)))?;

    let deadline = Instant::now() + Duration::from_secs_f32(duration_secs);
    let mut collected = Vec::with_capacity((sample_rate as f32 * duration_secs) as usize);

    while Instant::now() < deadline {
        if let Ok(chunk) = audio_rx.recv_timeout(Duration::from_millis(50)) {
            collected.extend_from_slice(&chunk);
        }
    }

    drop(stream);
    while let Ok(chunk) = audio_rx.try_recv() {
        collected.extend_from_slice(&chunk);
    }

    debug!(
        "Recorded {} samples ({:.2}s at {}Hz)",
        collected.len(),
        collected.len() as f32 / sample_rate as f32,
        sample_rate
    );

    Ok((collected, sample_rate))
}

/// Condition recorded audio for the recognizer.
pub fn prepare_for_recognition(input: &[f32], input_sample_rate: u32) -> Result<Vec<f32>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let no_dc = remove_dc_offset(input);

    let resampled = if input_sample_rate != RECOGNIZER_SAMPLE_RATE {
        resample(&no_dc, input_sample_rate, RECOGNIZER_SAMPLE_RATE)?
    } else {
        no_dc
    };

    Ok(normalize_audio(&resampled))
}

/// Normalize audio to a peak amplitude just below 1.0
pub fn normalize_audio(samples: &[f32]) -> Vec<f32> {
    if samples.is_empty() {
        return Vec::new();
    }

    let peak = samples
        .iter()
        .map(|&s| s.abs())
        .fold(0.0f32, |max, val| max.max(val));

    if peak == 0.0 || peak.is_nan() {
        return samples.to_vec();
    }

    let target_peak = 0.95;
    let gain = target_peak / peak;

    samples.iter().map(|&s| s * gain).collect()
}

/// Remove the DC offset by subtracting the mean
pub fn remove_dc_offset(samples: &[f32]) -> Vec<f32> {
    if samples.is_empty() {
        return Vec::new();
    }

    let mean: f32 = samples.iter().sum::<f32>() / samples.len() as f32;
    samples.iter().map(|&s| s - mean).collect()
}

/// Resample mono audio between sample rates
pub fn resample(input: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate {
        return Ok(input.to_vec());
    }

    let ratio = to_rate as f64 / from_rate as f64;
    const CHUNK_SIZE: usize = 1024;

    let mut resampler =
        FastFixedIn::<f32>::new(ratio, 1.0, PolynomialDegree::Septic, CHUNK_SIZE, 1)
            .map_err(|e| AskpodError::CaptureError(format!("Resampler setup failed: {}", e)))?;

    let mut output = Vec::with_capacity((input.len() as f64 * ratio) as usize + CHUNK_SIZE);
    let mut pos = 0;

    while pos + CHUNK_SIZE <= input.len() {
        let frames = resampler
            .process(&[&input[pos..pos + CHUNK_SIZE]], None)
            .map_err(|e| AskpodError::CaptureError(format!("Resampling failed: {}", e)))?;
        output.extend_from_slice(&frames[0]);
        pos += CHUNK_SIZE;
    }

    if pos < input.len() {
        let frames = resampler
            .process_partial(Some(&[&input[pos..]]), None)
            .map_err(|e| AskpodError::CaptureError(format!("Resampling failed: {}", e)))?;
        output.extend_from_slice(&frames[0]);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_audio() {
        let input = vec![0.5, -0.3, 0.8, -0.2];
        let output = normalize_audio(&input);
        let peak = output.iter().map(|&s| s.abs()).fold(0.0, f32::max);
        assert!((peak - 0.95).abs() < 0.01);
    }

    #[test]
    fn test_remove_dc_offset() {
        let input = vec![1.0, 1.1, 0.9, 1.0];
        let output = remove_dc_offset(&input);
        let mean: f32 = output.iter().sum::<f32>() / output.len() as f32;
        assert!(mean.abs() < 0.0001);
    }

    #[test]
    fn test_resample_halves_sample_count() {
        let input: Vec<f32> = (0..32_000)
            .map(|i| (i as f32 * 0.01).sin() * 0.5)
            .collect();
        let output = resample(&input, 32_000, 16_000).unwrap();

        // Polynomial resamplers trim a little at the edges
        let expected = input.len() / 2;
        assert!((output.len() as i64 - expected as i64).unsigned_abs() < 256);
    }

    #[test]
    fn test_prepare_empty_input() {
        assert!(prepare_for_recognition(&[], 44_100).unwrap().is_empty());
    }
}
