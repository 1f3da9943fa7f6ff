/*!
 * fairq demo - Contention Scenario
 *
 * Producers register waiters while releasers hand out tickets in FIFO order.
 * Completions run on a background thread pool; final counters are logged as JSON.
 */

use std::error::Error;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::info;

use fairq::{init_tracing, FairWaitQueue, SchedulerConfig, ThreadPoolScheduler, WaitQueueConfig};

const PRODUCERS: usize = 8;
const WAITERS_PER_PRODUCER: usize = 1000;
const RELEASERS: usize = 2;

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let scheduler_config = SchedulerConfig::from_env()?;
    info!(workers = scheduler_config.workers, "Starting completion scheduler");
    let scheduler = Arc::new(ThreadPoolScheduler::new(scheduler_config)?);

    let queue = Arc::new(FairWaitQueue::<u64>::with_config(
        WaitQueueConfig::high_contention().named("demo"),
        scheduler.clone(),
    ));

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|_| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                (0..WAITERS_PER_PRODUCER)
                    .map(|_| queue.enqueue())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let total = (PRODUCERS * WAITERS_PER_PRODUCER) as u64;
    let tickets = Arc::new(AtomicU64::new(0));
    let releasers: Vec<_> = (0..RELEASERS)
        .map(|_| {
            let queue = Arc::clone(&queue);
            let tickets = Arc::clone(&tickets);
            thread::spawn(move || loop {
                let ticket = tickets.fetch_add(1, Ordering::SeqCst);
                if ticket >= total {
                    break;
                }
                while !queue.dequeue_one(ticket) {
                    thread::yield_now();
                }
            })
        })
        .collect();

    let mut futures = Vec::with_capacity(PRODUCERS * WAITERS_PER_PRODUCER);
    for producer in producers {
        futures.extend(producer.join().map_err(|_| "producer thread panicked")?);
    }
    for releaser in releasers {
        releaser.join().map_err(|_| "releaser thread panicked")?;
    }

    let mut resolved = 0u64;
    for future in futures {
        if future.blocking_wait().is_ok() {
            resolved += 1;
        }
    }

    info!(resolved, total, "All waiters resolved");
    info!(stats = %serde_json::to_string(&queue.stats())?, "Final queue statistics");

    scheduler.shutdown()?;
    Ok(())
}
