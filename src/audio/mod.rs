//! Audio module - fire-and-forget sound cues through kira.

use bevy::prelude::*;
use bevy_kira_audio::prelude::{Audio, AudioControl, AudioSource};

use crate::core::SoundCueEvent;
use crate::sim::{SimSet, SoundCue};

/// Sound plugin - loads cue clips and plays them as the simulation asks.
///
/// Needs `bevy_kira_audio::AudioPlugin` on the app.
pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_sound_assets)
            .add_systems(Update, play_sound_cues.in_set(SimSet::Present));
    }
}

/// One clip per cue.
#[derive(Resource)]
struct SoundAssets {
    cast: Handle<AudioSource>,
    explosion: Handle<AudioSource>,
    melee_hit: Handle<AudioSource>,
    death: Handle<AudioSource>,
    player_hurt: Handle<AudioSource>,
    door_open: Handle<AudioSource>,
    level_up: Handle<AudioSource>,
}

impl SoundAssets {
    fn clip(&self, cue: SoundCue) -> &Handle<AudioSource> {
        match cue {
            SoundCue::Cast => &self.cast,
            SoundCue::Explosion => &self.explosion,
            SoundCue::MeleeHit => &self.melee_hit,
            SoundCue::Death => &self.death,
            SoundCue::PlayerHurt => &self.player_hurt,
            SoundCue::DoorOpen => &self.door_open,
            SoundCue::LevelUp => &self.level_up,
        }
    }
}

/// Asset path of a cue's clip.
fn clip_path(cue: SoundCue) -> &'static str {
    match cue {
        SoundCue::Cast => "sounds/cast.ogg",
        SoundCue::Explosion => "sounds/explosion.ogg",
        SoundCue::MeleeHit => "sounds/melee_hit.ogg",
        SoundCue::Death => "sounds/death.ogg",
        SoundCue::PlayerHurt => "sounds/player_hurt.ogg",
        SoundCue::DoorOpen => "sounds/door_open.ogg",
        SoundCue::LevelUp => "sounds/level_up.ogg",
    }
}

fn load_sound_assets(mut commands: Commands, asset_server: Res<AssetServer>) {
    let load = |cue| asset_server.load(clip_path(cue));
    commands.insert_resource(SoundAssets {
        cast: load(SoundCue::Cast),
        explosion: load(SoundCue::Explosion),
        melee_hit: load(SoundCue::MeleeHit),
        death: load(SoundCue::Death),
        player_hurt: load(SoundCue::PlayerHurt),
        door_open: load(SoundCue::DoorOpen),
        level_up: load(SoundCue::LevelUp),
    });
    info!("Sound cues queued for loading");
}

/// A clip that failed to load simply stays silent.
fn play_sound_cues(
    mut cues: EventReader<SoundCueEvent>,
    sounds: Option<Res<SoundAssets>>,
    audio: Res<Audio>,
) {
    let Some(sounds) = sounds else {
        cues.clear();
        return;
    };
    for SoundCueEvent(cue) in cues.read() {
        audio.play(sounds.clip(*cue).clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_cue_has_its_own_clip() {
        let cues = [
            SoundCue::Cast,
            SoundCue::Explosion,
            SoundCue::MeleeHit,
            SoundCue::Death,
            SoundCue::PlayerHurt,
            SoundCue::DoorOpen,
            SoundCue::LevelUp,
        ];
        let mut paths: Vec<_> = cues.iter().map(|cue| clip_path(*cue)).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), cues.len());
        assert!(paths.iter().all(|p| p.ends_with(".ogg")));
    }
}
