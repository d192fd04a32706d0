//! Backend worker: owns the tokio runtime and the HTTP clients, services
//! UI commands one at a time.

use client_core::{fetch_batch, CharacterApi};
use crossbeam_channel::{Receiver, Sender};
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::events::{PortraitImage, UiEvent};

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::WorkerFailed {
                    message: format!("backend worker startup failure: {err}"),
                });
                return;
            }
        };

        runtime.block_on(async move {
            let base_url = match Url::parse(&settings.api_base_url) {
                Ok(url) => url,
                Err(err) => {
                    tracing::error!(
                        api_base_url = %settings.api_base_url,
                        "configured API base URL is invalid: {err}"
                    );
                    let _ = ui_tx.try_send(UiEvent::WorkerFailed {
                        message: format!("invalid API base URL '{}': {err}", settings.api_base_url),
                    });
                    return;
                }
            };

            let api = CharacterApi::new(base_url);
            let portraits = reqwest::Client::new();
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::LoadBatch {
                        generation,
                        start_page,
                        desired_count,
                    } => {
                        let event = match fetch_batch(&api, start_page, desired_count).await {
                            Ok(characters) => UiEvent::BatchLoaded {
                                generation,
                                characters,
                            },
                            Err(err) => {
                                tracing::error!("batch fetch failed: {err}");
                                UiEvent::BatchFailed {
                                    generation,
                                    message: err.to_string(),
                                }
                            }
                        };
                        let _ = ui_tx.try_send(event);
                    }
                    BackendCommand::FetchPortrait { url } => {
                        let event = match fetch_portrait(&portraits, &url).await {
                            Ok(image) => UiEvent::PortraitLoaded { url, image },
                            Err(reason) => {
                                tracing::warn!(%url, "portrait fetch failed: {reason}");
                                UiEvent::PortraitFailed { url, reason }
                            }
                        };
                        let _ = ui_tx.try_send(event);
                    }
                }
            }
        });
    });
}

async fn fetch_portrait(http: &reqwest::Client, url: &str) -> Result<PortraitImage, String> {
    let bytes = http
        .get(url)
        .send()
        .await
        .map_err(|err| err.to_string())?
        .error_for_status()
        .map_err(|err| err.to_string())?
        .bytes()
        .await
        .map_err(|err| err.to_string())?;

    let decoded = image::load_from_memory(&bytes).map_err(|err| err.to_string())?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PortraitImage {
        width: width as usize,
        height: height as usize,
        rgba: rgba.into_raw(),
    })
}
