use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    Title,
    Stinger,
    Menu,
    Adventure,
    Battle,
    Boss,
}

impl Track {
    pub const ALL: [Track; 6] = [
        Track::Title,
        Track::Stinger,
        Track::Menu,
        Track::Adventure,
        Track::Battle,
        Track::Boss,
    ];

    pub fn path<'a>(&self, config: &'a MusicConfig) -> &'a str {
        match self {
            Self::Title => &config.title,
            Self::Stinger => &config.stinger,
            Self::Menu => &config.menu,
            Self::Adventure => &config.adventure,
            Self::Battle => &config.battle,
            Self::Boss => &config.boss,
        }
    }

    /// Everything loops except the stinger.
    pub fn looped(&self) -> bool {
        !matches!(self, Self::Stinger)
    }
}

/// Plays one track at a time.
pub trait MusicPlayer {
    /// Stop whatever is playing and start `track`.
    fn play(&mut self, track: Track);
    fn stop(&mut self);
    #[cfg(test)]
    fn is_silent(&self) -> bool {
        false
    }
}

/// Stand-in used when no audio could be loaded.
#[derive(Debug, Default)]
pub struct Silent;

impl MusicPlayer for Silent {
    fn play(&mut self, track: Track) {
        log::info!("Audio not available, would play {:?}", track);
    }

    fn stop(&mut self) {}

    #[cfg(test)]
    fn is_silent(&self) -> bool {
        true
    }
}

pub struct Jukebox {
    assets: Rc<Assets>,
    volume: f64,
    playing: Option<geng::SoundEffect>,
}

impl Jukebox {
    /// A jukebox over the loaded tracks, or a silent player if none loaded.
    pub fn new_or_silent(assets: &Rc<Assets>, volume: f64) -> Box<dyn MusicPlayer> {
        if assets.music.is_empty() {
            log::warn!("No music loaded, playing silence");
            return Box::new(Silent);
        }
        Box::new(Self {
            assets: assets.clone(),
            volume,
            playing: None,
        })
    }
}

impl MusicPlayer for Jukebox {
    fn play(&mut self, track: Track) {
        self.stop();
        let Some(sound) = self.assets.music.get(&track) else {
            log::debug!("Track {:?} is not loaded, skipping", track);
            return;
        };
        let mut effect = sound.play();
        effect.set_volume(self.volume as _);
        self.playing = Some(effect);
    }

    fn stop(&mut self) {
        if let Some(mut effect) = self.playing.take() {
            effect.stop();
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Records what was played, shared with the test through the returned log.
    pub struct Recorder(pub Rc<RefCell<Vec<Option<Track>>>>);

    impl Recorder {
        pub fn new() -> (Self, Rc<RefCell<Vec<Option<Track>>>>) {
            let log = Rc::new(RefCell::new(Vec::new()));
            (Self(log.clone()), log)
        }
    }

    impl MusicPlayer for Recorder {
        fn play(&mut self, track: Track) {
            self.0.borrow_mut().push(Some(track));
        }

        fn stop(&mut self) {
            self.0.borrow_mut().push(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::{ActiveScreen, Input, ScreenManager};

    fn no_music() -> Rc<Assets> {
        Rc::new(Assets {
            music: HashMap::new(),
        })
    }

    #[test]
    fn no_loaded_music_falls_back_to_silence() {
        let mut player = Jukebox::new_or_silent(&no_music(), 0.8);
        assert!(player.is_silent());
        for track in Track::ALL {
            player.play(track);
        }
        player.stop();
    }

    #[test]
    fn screens_run_without_audio() {
        let config = crate::config::test_config();
        let music = Jukebox::new_or_silent(&no_music(), config.music.volume);
        let mut manager = ScreenManager::new(&config, music, 7);

        manager.handle_input(Input::Click(vec2(320.0, 215.0)));
        for _ in 0..=config.title.stinger_delay + 1 {
            manager.tick();
        }
        assert!(matches!(manager.current(), ActiveScreen::MainMenu(_)));

        for key in [geng::Key::Enter, geng::Key::Escape, geng::Key::Space] {
            manager.handle_input(Input::Key(key));
            manager.tick();
        }
        assert!(matches!(manager.current(), ActiveScreen::Battle(_)));
        manager.update(config.tick_duration() * 3.0);
    }
}
