//! Shared arrays handed across threads.

use std::thread;

use soft3d_core::prelude::*;

#[test]
fn test_readers_on_other_threads_see_same_buffer() {
    let arr = SharedArray::from_vec((0..1000).collect::<Vec<i32>>());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let view = arr.share();
            thread::spawn(move || view.as_slice().iter().map(|&v| i64::from(v)).sum::<i64>())
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), 499_500);
    }
    assert_eq!(arr.ref_count(), 1);
}

#[test]
fn test_writer_thread_detaches() {
    let arr = SharedArray::filled(8, 1.0f32);
    let mut writer = arr.share();

    let written = thread::spawn(move || {
        writer.set(3, 9.0);
        writer
    })
    .join()
    .unwrap();

    assert_eq!(arr[3], 1.0);
    assert_eq!(written[3], 9.0);
    assert!(!arr.ptr_eq(&written));
}

#[test]
fn test_last_handle_dropped_on_other_thread_releases() {
    let arr = SharedArray::<u8>::new(16);
    let weak = arr.downgrade();
    thread::spawn(move || drop(arr)).join().unwrap();
    assert!(weak.is_released());
    assert!(weak.upgrade().is_none());
}
