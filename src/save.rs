use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::game::Game;
use crate::object::Object;

// save format changelog:
// v1: json envelope {version, game, objects}
pub const SAVE_VERSION: u32 = 1;

/// Why loading or writing the save file failed.
#[derive(thiserror::Error, Debug)]
pub enum SaveError {
    #[error("no saved game at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a usable save: {reason}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        reason: DecodeFailure,
    },

    #[error("could not encode the game: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum DecodeFailure {
    #[error("malformed content: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("save format version {found}, only version {supported} can be read")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("{0}")]
    Invalid(String),
}

#[derive(Serialize)]
struct SaveRef<'a> {
    version: u32,
    game: &'a Game,
    objects: &'a [Object],
}

// the version was already checked by the probe
#[derive(Deserialize)]
struct SaveData {
    game: Game,
    objects: Vec<Object>,
}

// read before the full decode, other fields are ignored
#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

fn io_error(path: &Path, source: io::Error) -> SaveError {
    SaveError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes the game and all objects to `path`, replacing any earlier save.
///
/// The whole state is encoded before the file system is touched, then written
/// to a sibling temporary file and renamed over the target, so a failure at any
/// point leaves the previous save intact.
pub fn save_game(path: &Path, game: &Game, objects: &[Object]) -> Result<(), SaveError> {
    let data = SaveRef {
        version: SAVE_VERSION,
        game,
        objects,
    };
    let bytes = serde_json::to_vec(&data).map_err(SaveError::Encode)?;

    let tmp = temp_path(path);
    let written = File::create(&tmp).and_then(|mut file| {
        file.write_all(&bytes)?;
        file.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(io_error(path, e));
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_error(path, e));
    }

    info!(
        "saved {} objects on dungeon level {} ({} bytes)",
        objects.len(),
        game.dungeon_level,
        bytes.len()
    );
    Ok(())
}

/// Reads a save written by `save_game`. Nothing is returned unless the file
/// decodes completely and describes a playable game.
pub fn load_game(path: &Path) -> Result<(Game, Vec<Object>), SaveError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SaveError::NotFound {
            path: path.to_path_buf(),
        },
        _ => io_error(path, e),
    })?;
    let decode_error = |reason| SaveError::Decode {
        path: path.to_path_buf(),
        reason,
    };

    let probe: VersionProbe =
        serde_json::from_slice(&bytes).map_err(|e| decode_error(DecodeFailure::Malformed(e)))?;
    if probe.version != SAVE_VERSION {
        return Err(decode_error(DecodeFailure::UnsupportedVersion {
            found: probe.version,
            supported: SAVE_VERSION,
        }));
    }

    let data: SaveData =
        serde_json::from_slice(&bytes).map_err(|e| decode_error(DecodeFailure::Malformed(e)))?;
    data.game
        .validate(&data.objects)
        .map_err(|reason| decode_error(DecodeFailure::Invalid(reason)))?;

    debug!("loaded {} objects from {}", data.objects.len(), path.display());
    Ok((data.game, data.objects))
}

// delete the save, a missing file is not an error
pub fn remove_save(path: &Path) -> Result<(), SaveError> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!("removed save {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_error(path, e)),
    }
}
