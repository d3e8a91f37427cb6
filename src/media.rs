use crate::statics;
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Image,
}

/// Extension lists deciding which viewer a media file opens in.
/// Matching is case-insensitive and ignores a leading dot in the configured list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFilter {
    video: Vec<String>,
    image: Vec<String>,
}

impl Default for MediaFilter {
    fn default() -> Self {
        Self::new(
            statics::DEFAULT_VIDEO_EXTENSIONS.iter().copied(),
            statics::DEFAULT_IMAGE_EXTENSIONS.iter().copied(),
        )
    }
}

impl MediaFilter {
    pub fn new<V, I, S>(video: V, image: I) -> Self
    where
        V: IntoIterator<Item = S>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let norm = |s: S| s.as_ref().trim_start_matches('.').to_ascii_lowercase();
        Self {
            video: video.into_iter().map(norm).collect(),
            image: image.into_iter().map(norm).collect(),
        }
    }

    pub fn classify(&self, path: &Path) -> Option<MediaKind> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if self.video.contains(&ext) {
            Some(MediaKind::Video)
        } else if self.image.contains(&ext) {
            Some(MediaKind::Image)
        } else {
            None
        }
    }

    pub fn video_extensions(&self) -> &[String] {
        &self.video
    }

    pub fn image_extensions(&self) -> &[String] {
        &self.image
    }

    pub fn all_extensions(&self) -> Vec<&str> {
        self.video
            .iter()
            .chain(self.image.iter())
            .map(String::as_str)
            .collect()
    }
}

/// Playback position source used for timestamp stamping.
/// Decoding lives elsewhere; anything that can report a position fits.
pub trait PlaybackClock {
    fn position_ms(&self) -> u64;
    fn duration_ms(&self) -> Option<u64>;
    fn is_playing(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, ms: u64);

    fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }
}

/// A clock that advances with wall time while playing.
#[derive(Debug, Clone, Default)]
pub struct WallClock {
    base_ms: u64,
    started: Option<Instant>,
    duration_ms: Option<u64>,
}

impl WallClock {
    pub fn new(duration_ms: Option<u64>) -> Self {
        Self {
            duration_ms,
            ..Default::default()
        }
    }

    fn clamp(&self, ms: u64) -> u64 {
        self.duration_ms.map_or(ms, |d| ms.min(d))
    }
}

impl PlaybackClock for WallClock {
    fn position_ms(&self) -> u64 {
        let elapsed = self
            .started
            .map_or(0, |t| u64::try_from(t.elapsed().as_millis()).unwrap_or(u64::MAX));
        self.clamp(self.base_ms.saturating_add(elapsed))
    }

    fn duration_ms(&self) -> Option<u64> {
        self.duration_ms
    }

    fn is_playing(&self) -> bool {
        self.started.is_some()
    }

    fn play(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        self.base_ms = self.position_ms();
        self.started = None;
    }

    fn seek(&mut self, ms: u64) {
        self.base_ms = self.clamp(ms);
        if self.started.is_some() {
            self.started = Some(Instant::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MediaFilter, MediaKind, PlaybackClock, WallClock};
    use std::path::Path;

    #[test]
    fn classify_is_case_insensitive() {
        let filter = MediaFilter::default();
        assert_eq!(
            filter.classify(Path::new("clip.MP4")),
            Some(MediaKind::Video)
        );
        assert_eq!(
            filter.classify(Path::new("shot.jpeg")),
            Some(MediaKind::Image)
        );
        assert_eq!(filter.classify(Path::new("notes.txt")), None);
        assert_eq!(filter.classify(Path::new("no_extension")), None);
    }

    #[test]
    fn custom_lists_accept_leading_dots() {
        let filter = MediaFilter::new([".webm"], ["WEBP"]);
        assert_eq!(
            filter.classify(Path::new("a.webm")),
            Some(MediaKind::Video)
        );
        assert_eq!(
            filter.classify(Path::new("a.webp")),
            Some(MediaKind::Image)
        );
        assert_eq!(filter.classify(Path::new("a.mp4")), None);
    }

    #[test]
    fn paused_clock_holds_seek_position() {
        let mut clock = WallClock::new(Some(10_000));
        clock.seek(4_000);
        assert_eq!(clock.position_ms(), 4_000);
        assert!(!clock.is_playing());

        clock.seek(50_000);
        assert_eq!(clock.position_ms(), 10_000);
    }

    #[test]
    fn toggle_starts_and_stops() {
        let mut clock = WallClock::new(None);
        clock.seek(1_000);
        clock.toggle();
        assert!(clock.is_playing());
        assert!(clock.position_ms() >= 1_000);
        clock.toggle();
        assert!(!clock.is_playing());
        let held = clock.position_ms();
        assert_eq!(clock.position_ms(), held);
    }
}
