#![cfg(feature = "tracing")]

//! Structured log events emitted during one archive gesture.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use pullbox_core::clock::ManualClock;
use pullbox_widgets::pull_archive::{PullConfig, PullToArchive};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Debug, Default)]
struct PullTraceState {
    messages: Vec<String>,
    state_targets: Vec<String>,
    step_events: usize,
}

struct PullTraceCapture {
    state: Arc<Mutex<PullTraceState>>,
}

impl<S> Layer<S> for PullTraceCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        struct FieldVisitor {
            message: Option<String>,
            to: Option<String>,
        }
        impl tracing::field::Visit for FieldVisitor {
            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                match field.name() {
                    "message" => self.message = Some(value.to_owned()),
                    "to" => self.to = Some(value.to_owned()),
                    _ => {}
                }
            }

            fn record_debug(
                &mut self,
                field: &tracing::field::Field,
                value: &dyn std::fmt::Debug,
            ) {
                let text = format!("{value:?}").trim_matches('"').to_owned();
                match field.name() {
                    "message" => self.message = Some(text),
                    "to" => self.to = Some(text),
                    _ => {}
                }
            }
        }
        let mut visitor = FieldVisitor {
            message: None,
            to: None,
        };
        event.record(&mut visitor);
        let Some(message) = visitor.message else {
            return;
        };
        let mut state = self.state.lock().expect("pull trace state lock");
        if message == "pull state changed" {
            if let Some(to) = visitor.to {
                state.state_targets.push(to);
            }
        }
        if message == "keyframe step" {
            state.step_events += 1;
        }
        state.messages.push(message);
    }
}

#[test]
fn archive_gesture_emits_structured_events() {
    let state = Arc::new(Mutex::new(PullTraceState::default()));
    let subscriber = tracing_subscriber::registry().with(PullTraceCapture {
        state: Arc::clone(&state),
    });
    let _guard = tracing::subscriber::set_default(subscriber);
    tracing::callsite::rebuild_interest_cache();

    let clock = ManualClock::new();
    let mut control = PullToArchive::build(PullConfig::default(), clock.clone());
    control.set_width(375.0);
    clock.advance(Duration::from_millis(600));
    control.on_scroll_offset_changed(100.0);
    assert!(control.on_drag_ended());
    for _ in 0..200 {
        control.tick(Duration::from_millis(16));
    }

    let state = state.lock().expect("pull trace state lock");
    assert_eq!(
        state.state_targets,
        ["can_release", "releasing", "done"],
        "state changes: {:?}",
        state.state_targets
    );
    assert_eq!(state.step_events, 5);
    for expected in [
        "release sequence started",
        "archive release accepted",
        "release sequence completed",
        "archive release completed",
    ] {
        assert!(
            state.messages.iter().any(|m| m == expected),
            "missing {expected:?} in {:?}",
            state.messages
        );
    }
}

#[test]
fn debounced_flip_is_traced_not_applied() {
    let state = Arc::new(Mutex::new(PullTraceState::default()));
    let subscriber = tracing_subscriber::registry().with(PullTraceCapture {
        state: Arc::clone(&state),
    });
    let _guard = tracing::subscriber::set_default(subscriber);
    tracing::callsite::rebuild_interest_cache();

    let clock = ManualClock::new();
    let mut control = PullToArchive::build(PullConfig::default(), clock.clone());
    control.set_width(375.0);
    control.on_scroll_offset_changed(100.0);

    let state = state.lock().expect("pull trace state lock");
    assert!(state.state_targets.is_empty());
    assert!(state.messages.iter().any(|m| m == "state change debounced"));
}
