//! Worker threads fed by a task channel.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::{debug, warn};

use super::{FetchResult, FetchTask, ImageFetcher};
use crate::cache::{ImageCache, SpriteData};
use crate::cards::CardData;
use crate::error::{TrackerError, TrackerResult};

/// A fixed set of worker threads that fetch card images into an
/// [`ImageCache`].
///
/// Tasks go in through [`submit`](Self::submit); results come back through
/// [`try_receive`](Self::try_receive), which never blocks.
pub struct FetchPool {
    tasks: Option<Sender<FetchTask>>,
    results: Receiver<FetchResult>,
    workers: Vec<JoinHandle<()>>,
    generation: u64,
    in_flight: usize,
}

impl FetchPool {
    /// Start `workers` threads (at least one).
    pub fn new(
        workers: usize,
        fetcher: Arc<dyn ImageFetcher>,
        cache: ImageCache,
    ) -> TrackerResult<Self> {
        let (task_tx, task_rx) = unbounded::<FetchTask>();
        let (result_tx, result_rx) = unbounded::<FetchResult>();

        let handles = (0..workers.max(1))
            .map(|n| {
                let tasks = task_rx.clone();
                let results = result_tx.clone();
                let fetcher = Arc::clone(&fetcher);
                let cache = cache.clone();
                thread::Builder::new()
                    .name(format!("image-fetch-{}", n))
                    .spawn(move || worker_loop(&tasks, &results, fetcher.as_ref(), &cache))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            tasks: Some(task_tx),
            results: result_rx,
            workers: handles,
            generation: 0,
            in_flight: 0,
        })
    }

    /// Queue a fetch, stamped with the current generation.
    pub fn submit(&mut self, index: usize, card: CardData) -> TrackerResult<()> {
        let tasks = self.tasks.as_ref().ok_or(TrackerError::PoolClosed)?;
        tasks
            .send(FetchTask {
                generation: self.generation,
                index,
                card,
            })
            .map_err(|_| TrackerError::PoolClosed)?;
        self.in_flight += 1;
        Ok(())
    }

    /// Take one finished result, if any. Never blocks.
    pub fn try_receive(&mut self) -> Option<FetchResult> {
        match self.results.try_recv() {
            Ok(result) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.in_flight = 0;
                None
            }
        }
    }

    /// Start a new generation. Later submits carry the returned value.
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Tasks submitted but not yet received back.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Stop accepting tasks and wait for the workers to finish what is queued.
    pub fn shutdown(mut self) {
        self.tasks.take();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("image fetch worker panicked");
            }
        }
    }
}

impl Drop for FetchPool {
    fn drop(&mut self) {
        // Workers finish the queued tasks and exit; they are not joined,
        // and whatever they fetch after this point is discarded.
        self.tasks.take();
    }
}

impl std::fmt::Debug for FetchPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchPool")
            .field("workers", &self.workers.len())
            .field("generation", &self.generation)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}

fn worker_loop(
    tasks: &Receiver<FetchTask>,
    results: &Sender<FetchResult>,
    fetcher: &dyn ImageFetcher,
    cache: &ImageCache,
) {
    for task in tasks.iter() {
        debug!("fetching image for {}", task.card.name());
        let outcome = fetch_into_cache(fetcher, cache, &task.card);
        if let Err(err) = &outcome {
            warn!("image fetch for '{}' failed: {}", task.card.name(), err);
        }

        let result = FetchResult {
            generation: task.generation,
            index: task.index,
            card: task.card,
            outcome,
        };
        if results.send(result).is_err() {
            return;
        }
    }
}

fn fetch_into_cache(
    fetcher: &dyn ImageFetcher,
    cache: &ImageCache,
    card: &CardData,
) -> TrackerResult<SpriteData> {
    let id = card.require_id()?;
    let bytes = fetcher.fetch(card)?;
    cache.save(id, &bytes)
}
