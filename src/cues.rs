use std::{fs, io::Cursor, time::Duration};

use anyhow::Result;
use log::{debug, info, warn};
use rodio::{source::SineWave, Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::game_config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Looping sound while a stroke is being drawn
    Draw,
    /// A new best score
    Success,
    /// The stroke did not go around the dot
    Failure,
}

/// Plays the game's sound cues. Failures are reported, never fatal: the
/// caller logs them and carries on.
pub trait CuePlayer {
    fn play(&mut self, cue: Cue) -> Result<()>;
    fn stop(&mut self, cue: Cue) -> Result<()>;
}

/// Stands in for audio output by logging each cue.
#[derive(Debug, Default)]
pub struct LogCuePlayer;

impl CuePlayer for LogCuePlayer {
    fn play(&mut self, cue: Cue) -> Result<()> {
        debug!("Play cue {:?}", cue);
        Ok(())
    }

    fn stop(&mut self, cue: Cue) -> Result<()> {
        debug!("Stop cue {:?}", cue);
        Ok(())
    }
}

const DRAW_TONE_HZ: f32 = 330.;
const SUCCESS_TONE_HZ: f32 = 880.;
const FAILURE_TONE_HZ: f32 = 165.;
const SUCCESS_LENGTH: Duration = Duration::from_millis(250);
const FAILURE_LENGTH: Duration = Duration::from_millis(400);
const TONE_AMPLITUDE: f32 = 0.2;

pub type CueSource = Box<dyn Source<Item = f32> + Send>;

/// Encoded clips, kept in memory and decoded again for every play.
#[derive(Debug, Default, Clone)]
pub struct CueClips {
    pub draw: Option<Vec<u8>>,
    pub success: Option<Vec<u8>>,
    pub failure: Option<Vec<u8>>,
}

impl CueClips {
    pub fn from_config(config: &GameConfig) -> Self {
        CueClips {
            draw: read_clip(config.draw_sound.as_deref()),
            success: read_clip(config.success_sound.as_deref()),
            failure: read_clip(config.failure_sound.as_deref()),
        }
    }

    pub fn get(&self, cue: Cue) -> Option<&[u8]> {
        match cue {
            Cue::Draw => self.draw.as_deref(),
            Cue::Success => self.success.as_deref(),
            Cue::Failure => self.failure.as_deref(),
        }
    }
}

fn read_clip(path: Option<&str>) -> Option<Vec<u8>> {
    let path = path?;
    match fs::read(path) {
        Ok(bytes) => {
            debug!("Loaded sound clip {} ({} bytes)", path, bytes.len());
            Some(bytes)
        }
        Err(e) => {
            warn!("Could not read sound clip {}: {}; using a tone", path, e);
            None
        }
    }
}

/// The sound for `cue`: the clip if there is one, else a tone. The draw cue
/// never ends by itself.
pub fn cue_source(cue: Cue, clip: Option<&[u8]>) -> Result<CueSource> {
    let source: CueSource = match (cue, clip) {
        (Cue::Draw, Some(bytes)) => Box::new(
            Decoder::new(Cursor::new(bytes.to_vec()))?
                .convert_samples::<f32>()
                .repeat_infinite(),
        ),
        (_, Some(bytes)) => {
            Box::new(Decoder::new(Cursor::new(bytes.to_vec()))?.convert_samples::<f32>())
        }
        (Cue::Draw, None) => Box::new(SineWave::new(DRAW_TONE_HZ).amplify(TONE_AMPLITUDE)),
        (Cue::Success, None) => Box::new(
            SineWave::new(SUCCESS_TONE_HZ)
                .take_duration(SUCCESS_LENGTH)
                .amplify(TONE_AMPLITUDE),
        ),
        (Cue::Failure, None) => Box::new(
            SineWave::new(FAILURE_TONE_HZ)
                .take_duration(FAILURE_LENGTH)
                .amplify(TONE_AMPLITUDE),
        ),
    };
    Ok(source)
}

/// Plays cues on the default output device. The draw cue gets its own sink
/// so it can be stopped; the others are fire and forget.
pub struct RodioCuePlayer {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    clips: CueClips,
    volume: f32,
    draw_sink: Option<Sink>,
}

impl RodioCuePlayer {
    pub fn new(clips: CueClips, volume: f32) -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(RodioCuePlayer {
            _stream: stream,
            handle,
            clips,
            volume,
            draw_sink: None,
        })
    }
}

impl CuePlayer for RodioCuePlayer {
    fn play(&mut self, cue: Cue) -> Result<()> {
        let source = cue_source(cue, self.clips.get(cue))?;
        let sink = Sink::try_new(&self.handle)?;
        sink.set_volume(self.volume);
        sink.append(source);
        debug!("Play cue {:?}", cue);

        match cue {
            Cue::Draw => {
                if let Some(previous) = self.draw_sink.replace(sink) {
                    previous.stop();
                }
            }
            Cue::Success | Cue::Failure => sink.detach(),
        }
        Ok(())
    }

    fn stop(&mut self, cue: Cue) -> Result<()> {
        match cue {
            Cue::Draw => {
                if let Some(sink) = self.draw_sink.take() {
                    sink.stop();
                    debug!("Stop cue {:?}", cue);
                }
            }
            Cue::Success | Cue::Failure => {}
        }
        Ok(())
    }
}

/// Real audio if an output device opens, otherwise cues are only logged.
pub fn cue_player_for(config: &GameConfig) -> Box<dyn CuePlayer> {
    match RodioCuePlayer::new(CueClips::from_config(config), config.cue_volume) {
        Ok(player) => {
            info!("Audio output ready");
            Box::new(player)
        }
        Err(e) => {
            warn!("No audio output ({}); cues will only be logged", e);
            Box::new(LogCuePlayer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A mono 16-bit PCM WAV file holding `samples`
    fn wav_bytes(samples: &[i16]) -> Vec<u8> {
        let data_len = (samples.len() * 2) as u32;
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVEfmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
        bytes.extend_from_slice(&8000u32.to_le_bytes());
        bytes.extend_from_slice(&16000u32.to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        for s in samples {
            bytes.extend_from_slice(&s.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn outcome_tones_end_and_draw_tone_keeps_going() {
        let success = cue_source(Cue::Success, None).unwrap().count();
        let failure = cue_source(Cue::Failure, None).unwrap().count();
        assert!(success > 0 && success < failure);
        assert!(failure < 48_000);

        let draw = cue_source(Cue::Draw, None).unwrap().take(96_000).count();
        assert_eq!(draw, 96_000);
    }

    #[test]
    fn clips_replace_tones() {
        let clip = wav_bytes(&[0, 1000, -1000, 0].repeat(25));
        assert_eq!(cue_source(Cue::Failure, Some(clip.as_slice())).unwrap().count(), 100);

        let looped = cue_source(Cue::Draw, Some(clip.as_slice())).unwrap().take(1000).count();
        assert_eq!(looped, 1000);
    }

    #[test]
    fn undecodable_clip_is_an_error() {
        assert!(cue_source(Cue::Success, Some(&b"definitely not audio"[..])).is_err());
    }

    #[test]
    fn clips_are_read_from_config_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("yay.wav");
        let clip = wav_bytes(&[0; 10]);
        fs::write(&path, &clip).unwrap();

        let config = GameConfig {
            success_sound: Some(path.to_string_lossy().into_owned()),
            failure_sound: Some(dir.path().join("missing.wav").to_string_lossy().into_owned()),
            ..Default::default()
        };
        let clips = CueClips::from_config(&config);
        assert_eq!(clips.get(Cue::Success), Some(clip.as_slice()));
        assert_eq!(clips.get(Cue::Failure), None);
        assert_eq!(clips.get(Cue::Draw), None);
    }

    #[test]
    fn log_player_never_fails() {
        let mut player = LogCuePlayer;
        assert!(player.play(Cue::Draw).is_ok());
        assert!(player.stop(Cue::Draw).is_ok());
    }
}
