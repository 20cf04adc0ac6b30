use crate::prelude::*;

pub struct Assets {
    /// Music that loaded successfully. A missing track plays as silence.
    pub music: HashMap<Track, geng::Sound>,
}

impl Assets {
    pub async fn load(manager: &geng::asset::Manager, config: &MusicConfig) -> Self {
        let mut music = HashMap::new();
        for track in Track::ALL {
            let path = run_dir().join("assets").join(track.path(config));
            let sound =
                <geng::Sound as geng::asset::Load>::load(manager, &path, &Default::default())
                    .await;
            match sound {
                Ok(mut sound) => {
                    sound.set_looped(track.looped());
                    music.insert(track, sound);
                }
                Err(err) => {
                    log::warn!("Failed to load {:?} music from {:?}: {:#}", track, path, err);
                }
            }
        }
        Self { music }
    }
}
