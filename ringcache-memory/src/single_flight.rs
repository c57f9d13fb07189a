//  Copyright 2026 ringcache authors
//
//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;

use parking_lot::Mutex;
use tokio::sync::oneshot;

/// A waiter's flight leader was dropped before it could deliver a result —
/// the leader's task was aborted, or its own future was cancelled mid-flight
/// by its caller (a `select!`, a `timeout`, ...), so the `oneshot::Sender`
/// held in the registry was dropped without ever sending.
///
/// Converted to the caller's error type via `E: From<FlightLost>` rather
/// than unwrapped, so a waiter that outlives its leader returns an error
/// instead of panicking — spec.md §5: a load must complete, or fail cleanly,
/// even if some other caller that joined the same flight has given up.
#[derive(Debug, Clone)]
pub struct FlightLost;

impl fmt::Display for FlightLost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("single-flight leader was dropped before completing")
    }
}

impl std::error::Error for FlightLost {}

/// Deduplicates concurrent invocations keyed by a plain string.
///
/// Generalizes the teacher's per-shard `waiters: HashMap<K, Vec<oneshot::Sender<Entry>>>`
/// coalescing (`foyer-memory`'s cache fetch path) into a standalone,
/// reusable primitive: the first caller for a key becomes the flight leader
/// and actually drives the future; every caller arriving while that flight is
/// in progress registers a `oneshot` receiver and is woken with a clone of
/// the leader's result instead of invoking the work again.
///
/// The flight's descriptor (its waiter list) is removed from the registry
/// before any waiter is released, so a call arriving after completion always
/// starts a fresh flight — results are not memoized beyond the flight itself.
pub struct SingleFlight<T, E> {
    flights: Mutex<HashMap<String, Vec<oneshot::Sender<Result<T, E>>>>>,
}

impl<T, E> Default for SingleFlight<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> SingleFlight<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static + From<tokio::task::JoinError> + From<FlightLost>,
{
    pub fn new() -> Self {
        Self {
            flights: Mutex::new(HashMap::new()),
        }
    }

    /// Runs `work` at most once for `key` among all concurrently overlapping
    /// callers; every caller gets the same `(value, error)` outcome.
    ///
    /// A panic inside `work` is caught (the work runs on a dedicated task)
    /// and converted to `E` via `E: From<tokio::task::JoinError>` rather than
    /// left to poison the registry — the flight's descriptor is always
    /// removed on the way out, panic or not. If the leader itself is dropped
    /// before it can notify (its task was aborted, or its caller's future
    /// was cancelled), waiters receive `E::from(FlightLost)` instead of
    /// panicking.
    pub async fn work<F, Fut>(&self, key: &str, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        {
            let mut guard = self.flights.lock();
            if let Some(waiters) = guard.get_mut(key) {
                tracing::trace!(%key, "joining an in-flight load");
                let (tx, rx) = oneshot::channel();
                waiters.push(tx);
                drop(guard);
                return match rx.await {
                    Ok(result) => result,
                    Err(_) => Err(E::from(FlightLost)),
                };
            }
            guard.insert(key.to_string(), Vec::new());
        }

        let result = match tokio::spawn(work()).await {
            Ok(result) => result,
            Err(join_err) => Err(E::from(join_err)),
        };

        let waiters = {
            let mut guard = self.flights.lock();
            guard.remove(key).unwrap_or_default()
        };
        for tx in waiters {
            let _ = tx.send(result.clone());
        }
        result
    }

    /// Number of keys with a flight currently in progress. Exposed for tests
    /// and diagnostics only.
    pub fn in_flight_count(&self) -> usize {
        self.flights.lock().len()
    }
}
