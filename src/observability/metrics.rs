//! Metrics collection.
//!
//! # Metrics
//! - `router_dispatch_total` (counter): dispatches by method
//! - `router_handlers_invoked_total` (counter): successful handler runs by method
//! - `router_dispatch_no_match_total` (counter): dispatches with no matching route
//! - `router_handler_failures_total` (counter): failed handlers by handler name
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; installing a recorder or exporter
//!   is up to the host application. Without one, every call is a no-op.

pub fn record_dispatch(method: &str) {
    metrics::counter!("router_dispatch_total", "method" => method.to_string()).increment(1);
}

pub fn record_handler_invoked(method: &str) {
    metrics::counter!("router_handlers_invoked_total", "method" => method.to_string())
        .increment(1);
}

pub fn record_no_match(method: &str) {
    metrics::counter!("router_dispatch_no_match_total", "method" => method.to_string())
        .increment(1);
}

pub fn record_handler_failure(handler: &str) {
    metrics::counter!("router_handler_failures_total", "handler" => handler.to_string())
        .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics::{
        Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
    };
    use std::sync::Mutex;

    /// Remembers the name and labels of every counter registered through it.
    #[derive(Default)]
    struct KeyCapture {
        keys: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl Recorder for KeyCapture {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            let labels = key
                .labels()
                .map(|l| (l.key().to_string(), l.value().to_string()))
                .collect();
            self.keys.lock().unwrap().push((key.name().to_string(), labels));
            Counter::noop()
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    #[test]
    fn test_counter_names_and_labels() {
        let recorder = KeyCapture::default();
        metrics::with_local_recorder(&recorder, || {
            record_dispatch("GET");
            record_handler_invoked("GET");
            record_no_match("POST");
            record_handler_failure("A@index");
        });

        let keys = recorder.keys.lock().unwrap();
        let pair = |k: &str, v: &str| vec![(k.to_string(), v.to_string())];
        assert_eq!(
            *keys,
            vec![
                ("router_dispatch_total".to_string(), pair("method", "GET")),
                ("router_handlers_invoked_total".to_string(), pair("method", "GET")),
                ("router_dispatch_no_match_total".to_string(), pair("method", "POST")),
                ("router_handler_failures_total".to_string(), pair("handler", "A@index")),
            ]
        );
    }
}
