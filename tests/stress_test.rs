/*!
 * Wait Queue Stress Tests
 *
 * Many enqueuing threads against concurrent releasers: nothing lost,
 * nothing resolved twice
 */

use fairq::{FairWaitQueue, QueueStats, SchedulerConfig, ThreadPoolScheduler, WaitQueueConfig};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

const PRODUCERS: usize = 8;
const WAITERS_PER_PRODUCER: usize = 1000;
const TOTAL: usize = PRODUCERS * WAITERS_PER_PRODUCER;

fn spawn_producers(
    queue: &Arc<FairWaitQueue<u64>>,
) -> Vec<thread::JoinHandle<Vec<fairq::WaitFuture<u64>>>> {
    (0..PRODUCERS)
        .map(|_| {
            let queue = Arc::clone(queue);
            thread::spawn(move || {
                (0..WAITERS_PER_PRODUCER)
                    .map(|_| queue.enqueue())
                    .collect()
            })
        })
        .collect()
}

fn spawn_releasers(
    queue: &Arc<FairWaitQueue<u64>>,
    releasers: usize,
) -> Vec<thread::JoinHandle<()>> {
    let released = Arc::new(AtomicUsize::new(0));
    let next_value = Arc::new(AtomicU64::new(0));

    (0..releasers)
        .map(|_| {
            let queue = Arc::clone(queue);
            let released = Arc::clone(&released);
            let next_value = Arc::clone(&next_value);
            thread::spawn(move || {
                while released.load(Ordering::SeqCst) < TOTAL {
                    let value = next_value.fetch_add(1, Ordering::SeqCst);
                    if queue.dequeue_one(value) {
                        released.fetch_add(1, Ordering::SeqCst);
                    } else {
                        thread::yield_now();
                    }
                }
            })
        })
        .collect()
}

#[test]
fn test_concurrent_enqueue_and_release() {
    let scheduler = Arc::new(ThreadPoolScheduler::with_defaults().unwrap());
    let queue = Arc::new(FairWaitQueue::<u64>::with_config(
        WaitQueueConfig::high_contention(),
        scheduler.clone(),
    ));

    let producers = spawn_producers(&queue);
    let releasers = spawn_releasers(&queue, 2);

    let futures: Vec<_> = producers
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    for handle in releasers {
        handle.join().unwrap();
    }

    let mut values: Vec<u64> = futures
        .into_iter()
        .map(|future| future.blocking_wait().expect("every waiter is released"))
        .collect();
    assert_eq!(values.len(), TOTAL);

    // Every released value reached exactly one waiter
    values.sort_unstable();
    values.dedup();
    assert_eq!(values.len(), TOTAL);

    assert!(queue.is_empty());
    assert_eq!(
        queue.stats(),
        QueueStats {
            enqueued: TOTAL as u64,
            dequeued: TOTAL as u64,
            canceled: 0,
            pending: 0,
        }
    );
}

#[test]
fn test_single_releaser_preserves_per_producer_order() {
    let scheduler = Arc::new(ThreadPoolScheduler::new(SchedulerConfig::single_worker()).unwrap());
    let queue = Arc::new(FairWaitQueue::<u64>::new(scheduler.clone()));

    let producers = spawn_producers(&queue);
    let releasers = spawn_releasers(&queue, 1);

    let per_producer: Vec<Vec<_>> = producers
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    for handle in releasers {
        handle.join().unwrap();
    }

    for futures in per_producer {
        let values: Vec<u64> = futures
            .into_iter()
            .map(|future| future.blocking_wait().unwrap())
            .collect();
        assert!(
            values.windows(2).all(|pair| pair[0] < pair[1]),
            "an earlier waiter of the same producer was released later"
        );
    }
}

#[test]
fn test_concurrent_cancel_and_release_account_for_everyone() {
    let scheduler = Arc::new(ThreadPoolScheduler::with_defaults().unwrap());
    let queue = Arc::new(FairWaitQueue::<u64>::new(scheduler.clone()));

    let futures: Vec<_> = (0..2000).map(|_| queue.enqueue()).collect();
    let ids: Vec<_> = futures.iter().map(|f| f.id()).collect();

    let canceller = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || ids.into_iter().filter(|id| queue.cancel_one(*id)).count())
    };
    let releaser = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            let mut released = 0;
            while queue.dequeue_one(1) {
                released += 1;
            }
            released
        })
    };

    let cancelled = canceller.join().unwrap();
    let released = releaser.join().unwrap();
    let leftover = queue.dequeue_all(2);
    assert_eq!(cancelled + released + leftover, 2000);

    let outcomes: Vec<_> = futures.into_iter().map(|f| f.blocking_wait()).collect();
    assert_eq!(outcomes.iter().filter(|o| o.is_err()).count(), cancelled);
    assert_eq!(outcomes.iter().filter(|o| o.is_ok()).count(), released + leftover);
}

#[test]
fn test_stats_stay_balanced_under_contention() {
    let scheduler = Arc::new(ThreadPoolScheduler::with_defaults().unwrap());
    let queue = Arc::new(FairWaitQueue::<u64>::new(scheduler.clone()));
    let done = Arc::new(AtomicBool::new(false));

    let sampler = {
        let queue = Arc::clone(&queue);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut samples = 0usize;
            loop {
                let finished = done.load(Ordering::SeqCst);
                let stats = queue.stats();
                assert_eq!(
                    stats.enqueued,
                    stats.dequeued + stats.canceled + stats.pending as u64,
                    "unbalanced snapshot {:?}",
                    stats
                );
                samples += 1;
                if finished {
                    break samples;
                }
            }
        })
    };

    let producers = spawn_producers(&queue);
    let releasers = spawn_releasers(&queue, 2);
    let futures: Vec<_> = producers
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    for handle in releasers {
        handle.join().unwrap();
    }
    done.store(true, Ordering::SeqCst);

    assert!(sampler.join().unwrap() > 0);
    for future in futures {
        assert!(future.blocking_wait().is_ok());
    }
}
