use std::{fs, io, path::Path};

use log::info;

use super::PersistedModel;
use crate::{NetErr, Result, arch::DeepNet};

/// Serializes a network into human readable JSON.
///
/// # Returns
/// A `ModelCorrupt` error if any parameter is NaN or infinite, JSON can't hold those.
pub fn to_bytes(net: &DeepNet) -> Result<Vec<u8>> {
    let model = PersistedModel::from(net);
    model.check_finite()?;

    serde_json::to_vec_pretty(&model).map_err(|e| NetErr::ModelCorrupt(e.to_string()))
}

/// Deserializes a network out of the JSON produced by `to_bytes`.
///
/// # Returns
/// A `ModelNotFound` error if `bytes` is empty or holds `null`, a `ModelCorrupt` error if it
/// doesn't decode into a valid network.
pub fn from_bytes(bytes: &[u8]) -> Result<DeepNet> {
    decode(bytes, "empty model source")
}

/// Writes `net` to `path`, replacing whatever was there.
///
/// Nothing is written if the network can't be serialized.
pub fn save<P: AsRef<Path>>(net: &DeepNet, path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_bytes(net)?)?;

    info!(path:% = path.display(), layers:? = net.layers(); "model saved");
    Ok(())
}

/// Reads a network back from `path`.
///
/// # Returns
/// A `ModelNotFound` error if the file doesn't exist or is empty, a `ModelCorrupt` error if its
/// contents aren't a valid network.
pub fn load<P: AsRef<Path>>(path: P) -> Result<DeepNet> {
    let path = path.as_ref();

    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => NetErr::ModelNotFound(path.display().to_string()),
        _ => NetErr::Io(e),
    })?;

    let net = decode(&bytes, &path.display().to_string())?;

    info!(path:% = path.display(), layers:? = net.layers(); "model loaded");
    Ok(net)
}

fn decode(bytes: &[u8], source: &str) -> Result<DeepNet> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(NetErr::ModelNotFound(source.to_string()));
    }

    let model: Option<PersistedModel> =
        serde_json::from_slice(bytes).map_err(|e| NetErr::ModelCorrupt(e.to_string()))?;

    match model {
        Some(model) => DeepNet::try_from(model),
        None => Err(NetErr::ModelNotFound(source.to_string())),
    }
}

impl DeepNet {
    /// Writes this network to `path` as JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save(self, path)
    }

    /// Reads a network previously written with `DeepNet::save`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load(path)
    }
}
