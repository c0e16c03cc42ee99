use std::sync::Arc;
use std::thread;
use std::time::Duration;

use vsview_core::store::{ImageSlot, ImageStore, ProcessedImage, SlotState};

fn image(tag: u32) -> ProcessedImage<String> {
    ProcessedImage {
        texture: format!("texture-{tag}"),
        width: tag,
        height: tag * 2,
    }
}

#[test]
fn test_new_slot_is_empty() {
    let slot = ImageSlot::<String>::new();
    assert!(!slot.is_ready());
    assert!(slot.state().is_none());
    assert!(slot.image().is_none());
    assert!(slot.error().is_none());
}

#[test]
fn test_publish_makes_ready() {
    let slot = ImageSlot::new();
    assert!(slot.publish(image(3)));
    assert!(slot.is_ready());
    let img = slot.image().unwrap();
    assert_eq!(img.texture, "texture-3");
    assert_eq!((img.width, img.height), (3, 6));
}

#[test]
fn test_ready_never_reverts() {
    let slot = ImageSlot::new();
    slot.publish(image(1));
    assert!(!slot.publish(image(2)));
    assert!(!slot.fail("late failure"));
    assert_eq!(slot.image().unwrap().width, 1);
    assert!(slot.error().is_none());
}

#[test]
fn test_failed_slot_never_becomes_ready() {
    let slot = ImageSlot::new();
    assert!(slot.fail("no output node"));
    assert!(!slot.publish(image(1)));
    assert!(!slot.is_ready());
    assert_eq!(slot.error(), Some("no output node"));
}

#[test]
fn test_wait_returns_after_publish() {
    let slot = Arc::new(ImageSlot::new());
    let writer = {
        let slot = Arc::clone(&slot);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            slot.publish(image(7));
        })
    };

    match slot.wait() {
        SlotState::Ready(img) => assert_eq!(img.width, 7),
        SlotState::Failed(msg) => panic!("unexpected failure: {msg}"),
    }
    writer.join().unwrap();
}

#[test]
fn test_wait_timeout_expires_on_empty_slot() {
    let slot = ImageSlot::<String>::new();
    assert!(slot.wait_timeout(Duration::from_millis(10)).is_none());
}

#[test]
fn test_wait_timeout_sees_failure() {
    let slot = ImageSlot::<String>::new();
    slot.fail("boom");
    assert!(matches!(
        slot.wait_timeout(Duration::from_millis(10)),
        Some(SlotState::Failed(_))
    ));
}

#[test]
fn test_store_slots() {
    let store = ImageStore::<String>::with_slots(3);
    assert_eq!(store.len(), 3);
    assert!(!store.is_empty());
    assert!(store.slot(2).is_some());
    assert!(store.slot(3).is_none());
    assert!(store.iter().all(|s| !s.is_ready()));
}
