//! Server Room client binary.
//!
//! Composition root: loads the save record, resumes a session at the saved
//! difficulty and lets the guard autopilot play one night.
//!
//! ```bash
//! SERVER_ROOM_DIFFICULTY=hard SERVER_ROOM_SPEED=20 cargo run -p server-room-client
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use game_core::room_info;
use runtime::{
    EntityEvent, Event, FileSaveRepository, HeatEvent, SaveRepository, Session, Topic,
    format_clock,
};
use server_room_client::{ClientConfig, GuardPolicy, NightOutcome, NightRunner, logging};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    logging::setup_logging()?;
    let config = ClientConfig::from_env();

    let repository = FileSaveRepository::new(config.save_dir())
        .context("Failed to open save directory")?;
    let mut record = repository
        .load_or_default()
        .context("Failed to load save record")?;
    if let Some(difficulty) = config.difficulty {
        record.difficulty = difficulty;
    }

    tracing::info!(
        night = record.night,
        difficulty = %record.difficulty,
        "Save loaded from {}",
        repository.path().display()
    );

    let mut builder = Session::builder().resume(&record);
    if let Some(seed) = config.seed {
        builder = builder.seed(seed);
    }
    let session = builder.build()?;

    let watchers = [
        spawn_watcher(session.subscribe(Topic::Heat)),
        spawn_watcher(session.subscribe(Topic::Entity)),
    ];

    let mut runner = NightRunner::new(
        session,
        GuardPolicy::default(),
        config.game_frame_ms(),
        config.night_ms(),
    );
    runner.begin();

    tracing::info!("Night {} begins", record.night);
    let outcome = tokio::select! {
        outcome = runner.run(Duration::from_millis(config.frame_ms)) => Some(outcome),
        _ = tokio::signal::ctrl_c() => None,
    };

    // Dropping the session closes the bus and lets the watchers finish.
    for watcher in watchers {
        let _ = watcher.await;
    }

    match outcome {
        Some(NightOutcome::Survived) => {
            record = record.next_night();
            repository.save(&record)?;
            tracing::info!("06:00 AM. Survived, night {} unlocked", record.night);
        }
        Some(NightOutcome::Attacked { at }) => {
            tracing::info!("Caught at {}. Progress kept at night {}", format_clock(at), record.night);
        }
        None => {
            tracing::info!("Interrupted, nothing saved");
        }
    }

    Ok(())
}

fn spawn_watcher(mut rx: broadcast::Receiver<Event>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => log_event(event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Event watcher lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn log_event(event: Event) {
    match event {
        Event::Heat(HeatEvent::Changed { percent }) => {
            tracing::trace!("Heat {}%", percent);
        }
        Event::Heat(HeatEvent::OverheatStarted) => tracing::warn!("SYSTEM OVERHEAT"),
        Event::Heat(HeatEvent::OverheatEnded) => tracing::info!("Cameras back online"),
        Event::Entity(EntityEvent::Moved { location, at }) => {
            let name = room_info(location).map_or("unknown", |info| info.name);
            tracing::info!("[{}] Motion near {} ({})", format_clock(at), location, name);
        }
        Event::Entity(EntityEvent::Attacked { at, level }) => {
            tracing::warn!("[{}] The entity is in the room (level {})", format_clock(at), level);
        }
    }
}
