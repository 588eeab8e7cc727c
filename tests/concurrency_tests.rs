// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Shared schemas decoded from many threads.

mod common;

use std::sync::Arc;
use std::thread;

use common::{fixture_path, pose_stamped_bytes, pose_stamped_schema, Wire};
use robomsg::{
    decode, Message, MessageDecoder, MsgSchemaProvider, SchemaProvider, Time,
};

fn stamped_bytes(seq: u32) -> Vec<u8> {
    Wire::new()
        .u32(seq)
        .time(Time::new(seq, 0))
        .string(&format!("frame_{seq}"))
        .f64(seq as f64)
        .f64(0.0)
        .f64(0.0)
        .f64(0.0)
        .f64(0.0)
        .f64(0.0)
        .f64(1.0)
        .bytes()
}

#[test]
fn test_shared_schema_across_threads() {
    let schema = pose_stamped_schema();
    let expected = decode(&schema, &pose_stamped_bytes()).unwrap();

    thread::scope(|scope| {
        for _ in 0..8 {
            let schema = Arc::clone(&schema);
            let expected = &expected;
            scope.spawn(move || {
                let data = pose_stamped_bytes();
                for _ in 0..100 {
                    assert_eq!(&decode(&schema, &data).unwrap(), expected);
                }
            });
        }
    });
}

#[test]
fn test_batch_matches_sequential() {
    let schema = pose_stamped_schema();
    let mut buffers: Vec<Vec<u8>> = (0..64).map(stamped_bytes).collect();
    // One truncated buffer; its failure must not affect the others.
    buffers[10].truncate(9);

    let decoder = MessageDecoder::new();
    let batch = decoder.decode_batch(&schema, &buffers);
    assert_eq!(batch.len(), buffers.len());

    for (index, (result, buffer)) in batch.iter().zip(&buffers).enumerate() {
        let sequential = decoder.decode(&schema, buffer);
        assert_eq!(result, &sequential, "buffer {index}");
        if index == 10 {
            assert!(result.as_ref().unwrap_err().is_truncation());
        } else {
            let (message, _) = result.as_ref().unwrap();
            assert_eq!(
                message.get_path("header.seq").and_then(Message::as_u64),
                Some(index as u64)
            );
        }
    }
}

#[test]
fn test_provider_shared_across_threads() {
    let provider = MsgSchemaProvider::from_file(
        "geometry_msgs/PoseStamped",
        fixture_path("pose_stamped.msg"),
    )
    .unwrap();

    let schemas: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| provider.schema("geometry_msgs/PoseStamped").unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for schema in &schemas {
        assert_eq!(schema, &schemas[0]);
    }
    let (message, _) = decode(&schemas[0], &stamped_bytes(5)).unwrap();
    assert_eq!(
        message.get_path("header.frame_id").and_then(Message::as_str),
        Some("frame_5")
    );
}
