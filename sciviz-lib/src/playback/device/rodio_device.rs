//! Output device backed by the system's default audio output.

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamBuilder, Sink};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{info, warn};

use crate::asset::AudioAsset;
use crate::constants::{OUTPUT_STREAM_OPEN_RETRIES, OUTPUT_STREAM_OPEN_RETRY_MS};

use super::{DeviceError, OutputDevice, SessionId};

/// Default-output device handing out one `Sink` per session.
///
/// The device clock starts when the device is created and keeps running
/// across suspend/resume.
pub struct RodioDevice {
    stream: Option<OutputStream>,
    sinks: Vec<(SessionId, Sink)>,
    ended: Vec<SessionId>,
    epoch: Instant,
    volume: f32,
}

impl RodioDevice {
    /// Open the default output stream.
    pub fn open() -> Result<Self, DeviceError> {
        let stream = open_stream()?;
        Ok(Self {
            stream: Some(stream),
            sinks: Vec::new(),
            ended: Vec::new(),
            epoch: Instant::now(),
            volume: 1.0,
        })
    }

    /// Set the gain applied to new and running streams.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.max(0.0);
        for (_, sink) in &self.sinks {
            sink.set_volume(self.volume);
        }
    }
}

fn open_stream() -> Result<OutputStream, DeviceError> {
    let mut last_error = String::new();
    for attempt in 1..=OUTPUT_STREAM_OPEN_RETRIES {
        match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                stream.log_on_drop(false);
                return Ok(stream);
            }
            Err(err) => {
                warn!(
                    "open_default_stream attempt {}/{} failed: {}",
                    attempt, OUTPUT_STREAM_OPEN_RETRIES, err
                );
                last_error = err.to_string();
                if attempt < OUTPUT_STREAM_OPEN_RETRIES {
                    thread::sleep(Duration::from_millis(OUTPUT_STREAM_OPEN_RETRY_MS));
                }
            }
        }
    }
    Err(DeviceError::Unavailable(last_error))
}

impl OutputDevice for RodioDevice {
    fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    fn is_suspended(&self) -> bool {
        self.stream.is_none()
    }

    fn resume(&mut self) -> Result<(), DeviceError> {
        if self.stream.is_none() {
            info!("Reopening output stream");
            self.stream = Some(open_stream()?);
        }
        Ok(())
    }

    fn start(
        &mut self,
        session: SessionId,
        asset: &Arc<AudioAsset>,
        offset: f64,
    ) -> Result<(), DeviceError> {
        let stream = self.stream.as_ref().ok_or(DeviceError::Suspended)?;
        let samples = asset.samples_from(offset);
        if samples.is_empty() {
            return Err(DeviceError::StartFailed(format!(
                "offset {:.3}s is past the end of the asset",
                offset
            )));
        }

        let mixer = stream.mixer().clone();
        let sink = Sink::connect_new(&mixer);
        sink.set_volume(self.volume);
        sink.append(SamplesBuffer::new(
            asset.channels(),
            asset.sample_rate(),
            samples.to_vec(),
        ));
        sink.play();

        self.sinks.push((session, sink));
        Ok(())
    }

    fn stop(&mut self, session: SessionId) -> Result<(), DeviceError> {
        let index = self
            .sinks
            .iter()
            .position(|(id, _)| *id == session)
            .ok_or(DeviceError::InactiveStream(session))?;
        let (id, sink) = self.sinks.remove(index);
        sink.stop();
        self.ended.push(id);
        Ok(())
    }

    fn take_ended(&mut self) -> Vec<SessionId> {
        let mut index = 0;
        while index < self.sinks.len() {
            if self.sinks[index].1.empty() {
                let (id, _) = self.sinks.remove(index);
                self.ended.push(id);
            } else {
                index += 1;
            }
        }
        std::mem::take(&mut self.ended)
    }

    fn close(&mut self) {
        for (id, sink) in self.sinks.drain(..) {
            sink.stop();
            self.ended.push(id);
        }
        if self.stream.take().is_some() {
            info!("Released output stream");
        }
    }
}

impl Drop for RodioDevice {
    fn drop(&mut self) {
        self.close();
    }
}
