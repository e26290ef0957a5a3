// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{ChunkFrameStream, RegisterMap, StreamMode};
use crate::chunk::StackChunk;
use crate::frame::FrameDescriptor;
use contfreeze_abi::{FrameKind, Word, WordOffset};

fn compiled(pc: u64) -> FrameDescriptor {
    FrameDescriptor::new(
        FrameKind::Compiled,
        Word::new(pc),
        WordOffset::new(4),
        WordOffset::new(1),
        WordOffset::ZERO,
        true,
        false,
    )
}

fn interpreted(pc: u64) -> FrameDescriptor {
    FrameDescriptor::new(
        FrameKind::Interpreted,
        Word::new(pc),
        WordOffset::new(4),
        WordOffset::new(1),
        WordOffset::ZERO,
        false,
        false,
    )
}

#[test]
fn compiled_only_chunk_reports_compiled_only_mode() {
    let mut chunk = StackChunk::new(None);
    chunk.prepend_frames(vec![compiled(1), compiled(2)], WordOffset::ZERO);
    let stream = ChunkFrameStream::new(&chunk);
    assert_eq!(stream.mode(), StreamMode::CompiledOnly);
}

#[test]
fn mixed_chunk_reports_mixed_mode() {
    let mut chunk = StackChunk::new(None);
    chunk.prepend_frames(vec![compiled(1), interpreted(2)], WordOffset::ZERO);
    let stream = ChunkFrameStream::new(&chunk);
    assert_eq!(stream.mode(), StreamMode::Mixed);
}

#[test]
fn stream_walks_top_to_bottom_and_terminates() {
    let mut chunk = StackChunk::new(None);
    chunk.prepend_frames(vec![compiled(10), compiled(20)], WordOffset::ZERO);
    let mut stream = ChunkFrameStream::new(&chunk);
    let mut register_map = RegisterMap::default();

    assert_eq!(stream.current_pc(), Some(Word::new(10)));
    assert!(!stream.is_done());
    stream.next(&mut register_map);
    assert_eq!(stream.current_pc(), Some(Word::new(20)));
    stream.next(&mut register_map);
    assert!(stream.is_done());
    assert_eq!(stream.current_pc(), None);
}

#[test]
fn is_compiled_reflects_the_current_frame_kind() {
    let mut chunk = StackChunk::new(None);
    chunk.prepend_frames(vec![compiled(1), interpreted(2)], WordOffset::ZERO);
    let mut stream = ChunkFrameStream::new(&chunk);
    let mut register_map = RegisterMap::default();
    assert!(stream.is_compiled());
    stream.next(&mut register_map);
    assert!(!stream.is_compiled());
}

#[test]
fn to_frame_returns_a_copy_of_the_current_frame() {
    let mut chunk = StackChunk::new(None);
    chunk.prepend_frames(vec![compiled(42)], WordOffset::ZERO);
    let stream = ChunkFrameStream::new(&chunk);
    assert_eq!(stream.to_frame().map(|f| f.pc()), Some(Word::new(42)));
}
