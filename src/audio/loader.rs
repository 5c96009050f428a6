use std::fs;
use std::io::Cursor;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use rodio::Decoder;

use super::types::{AudioClip, AudioLoadError, LoadCompletion};

#[derive(Debug)]
pub(super) struct LoadRequest {
    pub generation: u64,
    pub reference: String,
}

/// Spawn the loader thread. Requests are served in order; every request
/// produces exactly one `LoadCompletion` on `completions`.
pub(super) fn spawn_loader(
    completions: Sender<LoadCompletion>,
    timeout: Duration,
) -> Sender<LoadRequest> {
    let (tx, rx) = mpsc::channel::<LoadRequest>();
    thread::spawn(move || serve(rx, completions, timeout));
    tx
}

fn serve(rx: Receiver<LoadRequest>, completions: Sender<LoadCompletion>, timeout: Duration) {
    let client = match reqwest::blocking::Client::builder().timeout(timeout).build() {
        Ok(c) => Some(c),
        Err(e) => {
            log::warn!("http client unavailable, remote previews will fail: {e}");
            None
        }
    };

    while let Ok(req) = rx.recv() {
        let result = load_clip(client.as_ref(), &req.reference);
        if let Err(e) = &result {
            log::warn!("audio load failed for {}: {e}", req.reference);
        }
        let done = LoadCompletion {
            generation: req.generation,
            result,
        };
        if completions.send(done).is_err() {
            // Nobody is listening anymore.
            break;
        }
    }
}

fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

pub(super) fn load_clip(
    client: Option<&reqwest::blocking::Client>,
    reference: &str,
) -> Result<AudioClip, AudioLoadError> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(AudioLoadError::EmptyReference);
    }

    let bytes: Vec<u8> = if is_remote(reference) {
        let client =
            client.ok_or_else(|| AudioLoadError::Http("no http client".to_string()))?;
        client
            .get(reference)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.bytes())
            .map_err(|e| AudioLoadError::Http(e.to_string()))?
            .to_vec()
    } else {
        fs::read(reference)?
    };

    let bytes: Arc<[u8]> = bytes.into();
    probe(&bytes)?;

    Ok(AudioClip {
        reference: reference.to_string(),
        bytes,
    })
}

/// Make sure the bytes decode before they reach the audio thread.
pub(super) fn probe(bytes: &Arc<[u8]>) -> Result<(), AudioLoadError> {
    Decoder::new(Cursor::new(bytes.clone()))
        .map(|_| ())
        .map_err(|e| AudioLoadError::Decode(e.to_string()))
}
