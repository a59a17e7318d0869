/*!
 * Tests for the playback sequencer
 */

use std::sync::Arc;
use std::time::Duration;

use tilawa::playback::{AdvanceAction, PlaybackPosition, RecordingDevice, Sequencer, SettlingDelays};

use crate::common;

fn sequencer_over(content: Arc<tilawa::ContentCache>) -> (Sequencer, Arc<RecordingDevice>) {
    let device = Arc::new(RecordingDevice::new());
    let sequencer = Sequencer::new(content, device.clone(), SettlingDelays::default());
    (sequencer, device)
}

/// Every non-empty section starts at its first item
#[test]
fn test_selectSection_forEverySection_shouldStartAtZero() {
    let content = common::staircase(6);
    let (mut sequencer, device) = sequencer_over(content.clone());

    for section in content.sections() {
        let position = sequencer.select_section(section.id);
        assert_eq!(position, Some(PlaybackPosition::new(section.id, Some(0))));
        assert_eq!(device.played().last().cloned(), Some(format!("audio://{}/1", section.id)));
    }
    assert_eq!(device.play_count(), 6);
}

/// Every item except the last advances within the section after one second
#[test]
fn test_onPlaybackFinished_forEveryInnerItem_shouldAdvanceAfterItemDelay() {
    let content = common::staircase(5);
    let (mut sequencer, device) = sequencer_over(content.clone());

    for section in content.sections() {
        let len = content.section_len(section.id);
        for i in 0..len.saturating_sub(1) {
            sequencer.select_section(section.id);
            sequencer.select_item(i);
            let played_before = device.play_count();

            let advance = sequencer.on_playback_finished().expect("inner item should advance");
            assert_eq!(advance.delay, Duration::from_secs(1));
            assert_eq!(advance.action, AdvanceAction::PlayItem { section: section.id, index: i + 1 });
            assert_eq!(sequencer.position(), PlaybackPosition::new(section.id, Some(i + 1)));
            assert_eq!(device.play_count(), played_before);

            assert!(sequencer.fire(advance));
            assert_eq!(
                device.played().last().cloned(),
                Some(format!("audio://{}/{}", section.id, i + 2))
            );
        }
    }
}

/// The last item of a section moves on to the next section after two seconds
#[test]
fn test_onPlaybackFinished_atEveryLastItem_shouldEnterNextSection() {
    let content = common::staircase(4);
    let (mut sequencer, _device) = sequencer_over(content.clone());

    for section in content.sections() {
        let last = content.section_len(section.id) - 1;
        sequencer.select_section(section.id);
        sequencer.select_item(last);

        match sequencer.on_playback_finished() {
            Some(advance) => {
                let next = content.next_section_after(section.id).unwrap().id;
                assert_eq!(advance.delay, Duration::from_secs(2));
                assert_eq!(advance.action, AdvanceAction::EnterSection { section: next });
                assert!(sequencer.fire(advance));
                assert_eq!(sequencer.position(), PlaybackPosition::new(next, Some(0)));
            }
            None => {
                assert_eq!(section.id, 4, "only the last section may stop");
                assert_eq!(sequencer.position(), PlaybackPosition::new(4, Some(3)));
            }
        }
    }
}

/// Custom delays are carried by the scheduled advances
#[test]
fn test_customDelays_shouldBeUsed() {
    let device = Arc::new(RecordingDevice::new());
    let delays = SettlingDelays {
        item: Duration::from_millis(300),
        section: Duration::from_millis(700),
    };
    let mut sequencer = Sequencer::new(common::two_sections(), device, delays);

    sequencer.select_section(1);
    let advance = sequencer.on_playback_finished().unwrap();
    assert_eq!(advance.delay, Duration::from_millis(300));
    sequencer.fire(advance);

    let advance = sequencer.on_playback_finished().unwrap();
    assert_eq!(advance.delay, Duration::from_millis(700));
}

/// A manual item selection during the item delay wins
#[test]
fn test_selectItem_duringItemDelay_shouldDiscardPendingAdvance() {
    let (mut sequencer, device) = sequencer_over(common::staircase(3));
    sequencer.select_section(3);

    let pending = sequencer.on_playback_finished().unwrap();
    sequencer.select_item(0);
    let generation = sequencer.generation();

    assert!(!sequencer.fire(pending));
    assert_eq!(sequencer.position(), PlaybackPosition::new(3, Some(0)));
    assert_eq!(sequencer.generation(), generation);
    assert_eq!(device.played(), vec!["audio://3/1", "audio://3/1"]);
}

/// A manual section selection during the section delay wins
#[test]
fn test_selectSection_duringSectionDelay_shouldDiscardPendingAdvance() {
    let (mut sequencer, device) = sequencer_over(common::staircase(3));
    sequencer.select_section(1);

    let pending = sequencer.on_playback_finished().unwrap();
    assert_eq!(pending.action, AdvanceAction::EnterSection { section: 2 });

    sequencer.select_section(3);
    assert!(!sequencer.fire(pending));
    assert_eq!(sequencer.position(), PlaybackPosition::new(3, Some(0)));
    assert_eq!(device.played(), vec!["audio://1/1", "audio://3/1"]);
}

/// An idle sequencer ignores playback notifications
#[test]
fn test_onPlaybackFinished_whenIdle_shouldDoNothing() {
    let (mut sequencer, device) = sequencer_over(common::two_sections());
    assert!(sequencer.on_playback_finished().is_none());
    assert!(sequencer.position().is_idle());
    assert_eq!(device.play_count(), 0);
}
