use crate::config::TripSource;
use crate::error::{Result, TripError};
use crate::trip::{mock_trips, Trip};
use chrono::Utc;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum Task {
    LoadTrips { source: TripSource },
}

#[derive(Debug, Clone)]
pub enum TaskResult {
    TripsLoaded { trips: Vec<Trip> },
    Error { message: String },
}

pub async fn run_worker(mut task_receiver: mpsc::Receiver<Task>, result_sender: mpsc::Sender<TaskResult>) {
    while let Some(task) = task_receiver.recv().await {
        let result = match task {
            Task::LoadTrips { source } => {
                log::debug!("worker: loading trips from {:?}", source);
                match load_trips(&source).await {
                    Ok(trips) => TaskResult::TripsLoaded { trips },
                    Err(e) => TaskResult::Error { message: e.to_string() },
                }
            }
        };

        if result_sender.send(result).await.is_err() {
            // Main thread has dropped the receiver, exit worker
            break;
        }
    }
    log::debug!("worker: task channel closed");
}

/// Load a one-shot trip collection from `source`
pub async fn load_trips(source: &TripSource) -> Result<Vec<Trip>> {
    let trips = match source {
        TripSource::Mock => mock_trips(Utc::now()),
        TripSource::File(path) => {
            let content = tokio::fs::read_to_string(path).await?;
            let trips = serde_json::from_str::<Vec<Trip>>(&content)?;
            for trip in &trips {
                trip.validate()?;
            }
            trips
        }
    };

    if trips.is_empty() {
        return Err(TripError::EmptyCollection);
    }
    Ok(trips)
}
