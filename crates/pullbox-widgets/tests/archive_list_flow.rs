//! Full archive cycles through the list host.

use std::time::Duration;

use pullbox_core::clock::ManualClock;
use pullbox_widgets::{ArchiveList, InteractionState, ListRow, PullConfig};

const FRAME: Duration = Duration::from_millis(16);

fn settle(list: &mut ArchiveList<ManualClock>, clock: &ManualClock) {
    for _ in 0..400 {
        clock.advance(FRAME);
        if !list.tick(FRAME) {
            break;
        }
    }
}

fn drag(list: &mut ArchiveList<ManualClock>, clock: &ManualClock, depth: f64) -> bool {
    for step in 1..=10 {
        clock.advance(Duration::from_millis(60));
        list.scroll_to(-depth * f64::from(step) / 10.0);
    }
    list.end_dragging()
}

#[test]
fn archive_cycle_inserts_one_summary_row() {
    let clock = ManualClock::new();
    let mut list = ArchiveList::new(375.0, PullConfig::default(), clock.clone());

    assert!(drag(&mut list, &clock, 120.0));
    assert_eq!(list.state(), InteractionState::Releasing);
    assert_eq!(list.content_inset_top(), 80.0);
    assert!(list.summary().is_none());

    settle(&mut list, &clock);
    assert_eq!(list.row_count(), 3);
    assert_eq!(list.summary().map(|s| s.count), Some(34));
    assert_eq!(list.content_inset_top(), 0.0);
    assert_eq!(list.state(), InteractionState::Pulling);
}

#[test]
fn second_cycle_does_not_duplicate_summary() {
    let clock = ManualClock::new();
    let mut list = ArchiveList::new(375.0, PullConfig::default(), clock.clone());
    assert!(drag(&mut list, &clock, 120.0));
    settle(&mut list, &clock);

    clock.advance(Duration::from_secs(1));
    assert!(drag(&mut list, &clock, 120.0));
    settle(&mut list, &clock);
    assert_eq!(list.row_count(), 3);
}

#[test]
fn shallow_drag_leaves_list_untouched() {
    let clock = ManualClock::new();
    let mut list = ArchiveList::new(375.0, PullConfig::default(), clock.clone())
        .with_rows(vec![ListRow::new("Ann", "hi")]);
    assert!(!drag(&mut list, &clock, 50.0));
    settle(&mut list, &clock);
    assert_eq!(list.row_count(), 1);
    assert!(list.summary().is_none());
    assert_eq!(list.content_inset_top(), 0.0);
}

#[test]
fn summary_row_lifts_control_height() {
    let clock = ManualClock::new();
    let mut list = ArchiveList::new(375.0, PullConfig::default(), clock.clone());
    assert!(drag(&mut list, &clock, 120.0));
    settle(&mut list, &clock);
    list.scroll_to(-30.0);
    assert_eq!(list.control().size().height, 110.0);
}
